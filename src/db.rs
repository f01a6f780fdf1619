use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;
use indoc::indoc;
use log::info;

use crate::models::NewPost;
use crate::schema::posts;

/// Embedded schema for the `posts` store. Every statement is idempotent so
/// the script can run on each startup. The server-oriented PostgreSQL
/// rendition of the same table lives in `db/schema.postgres.sql`.
const CREATE_POSTS_TABLE: &str = indoc! {"
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY,
        message_id INTEGER UNIQUE NOT NULL,
        content TEXT NOT NULL,
        media_type TEXT DEFAULT 'text',
        category TEXT DEFAULT 'general',
        timestamp TEXT DEFAULT CURRENT_TIMESTAMP
    );

    CREATE INDEX IF NOT EXISTS idx_posts_message_id ON posts(message_id);
    CREATE INDEX IF NOT EXISTS idx_posts_category ON posts(category);
    CREATE INDEX IF NOT EXISTS idx_posts_timestamp ON posts(timestamp);
"};

pub const SEED_POSTS: &[NewPost<'static>] = &[
    NewPost {
        message_id: 1,
        content: "Welcome to Telegram Mini App!",
        media_type: Some("text"),
        category: Some("general"),
        timestamp: None,
    },
    NewPost {
        message_id: 2,
        content: "Important announcement",
        media_type: Some("text"),
        category: Some("important"),
        timestamp: None,
    },
    NewPost {
        message_id: 3,
        content: "Daily news update",
        media_type: Some("text"),
        category: Some("news"),
        timestamp: None,
    },
];

/// Create the posts table and indexes if missing, then seed. Safe to run
/// any number of times.
pub fn run_migrations(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(CREATE_POSTS_TABLE)?;
    let seeded = seed_posts(conn)?;
    if seeded > 0 {
        info!("inserted {} seed posts", seeded);
    }
    Ok(())
}

/// Insert the seed rows, skipping any message_id already present. Returns
/// how many rows actually landed.
pub fn seed_posts(conn: &mut SqliteConnection) -> QueryResult<usize> {
    let mut inserted = 0;
    for post in SEED_POSTS {
        if insert_post(conn, post)? {
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Conflict-ignoring insert: a duplicate `message_id` is a no-op, never an
/// error and never an overwrite. Returns whether a row was inserted.
pub fn insert_post(conn: &mut SqliteConnection, post: &NewPost) -> QueryResult<bool> {
    let inserted = diesel::insert_into(posts::table)
        .values(post)
        .on_conflict(posts::message_id)
        .do_nothing()
        .execute(conn)?;
    Ok(inserted > 0)
}

#[cfg(test)]
mod test {
    use diesel::prelude::*;
    use diesel::result::{DatabaseErrorKind, Error};

    use super::{insert_post, run_migrations, seed_posts};
    use crate::models::{NewPost, Post};
    use crate::schema::posts;

    fn test_conn() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").expect("in-memory sqlite");
        run_migrations(&mut conn).expect("migrations");
        conn
    }

    fn new_post(message_id: i32, content: &str) -> NewPost<'_> {
        NewPost {
            message_id,
            content,
            media_type: None,
            category: None,
            timestamp: None,
        }
    }

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = test_conn();
        run_migrations(&mut conn).expect("second run");

        let total: i64 = posts::table.count().get_result(&mut conn).unwrap();
        assert_eq!(total, 3);
    }

    #[test]
    fn seeding_twice_leaves_three_rows() {
        let mut conn = test_conn();
        let inserted = seed_posts(&mut conn).unwrap();
        assert_eq!(inserted, 0);

        let total: i64 = posts::table.count().get_result(&mut conn).unwrap();
        assert_eq!(total, 3);
    }

    #[test]
    fn duplicate_message_id_does_not_overwrite() {
        let mut conn = test_conn();
        let dup = new_post(1, "rewritten content");

        let inserted = insert_post(&mut conn, &dup).unwrap();
        assert!(!inserted);

        let stored: Post = Post::by_message_id(1).first(&mut conn).unwrap();
        assert_eq!(stored.content, "Welcome to Telegram Mini App!");
    }

    #[test]
    fn omitted_classification_fields_use_column_defaults() {
        let mut conn = test_conn();
        assert!(insert_post(&mut conn, &new_post(42, "no classification")).unwrap());

        let stored: Post = Post::by_message_id(42).first(&mut conn).unwrap();
        assert_eq!(stored.media_type.as_deref(), Some("text"));
        assert_eq!(stored.category.as_deref(), Some("general"));
        assert!(stored.timestamp.is_some());
    }

    #[test]
    fn null_content_violates_not_null() {
        let mut conn = test_conn();
        let result = diesel::sql_query("INSERT INTO posts (message_id, content) VALUES (99, NULL)")
            .execute(&mut conn);

        assert!(matches!(
            result,
            Err(Error::DatabaseError(DatabaseErrorKind::NotNullViolation, _))
        ));
    }

    #[test]
    fn recent_returns_seed_posts_newest_first() {
        let mut conn = test_conn();
        let ordered: Vec<Post> = Post::recent().load(&mut conn).unwrap();
        let ids: Vec<i32> = ordered.iter().map(|p| p.message_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn explicit_timestamps_order_before_tiebreak() {
        let mut conn = test_conn();
        let old = NewPost {
            message_id: 50,
            content: "from the archive",
            media_type: None,
            category: None,
            timestamp: Some("2020-01-01 00:00:00"),
        };
        assert!(insert_post(&mut conn, &old).unwrap());

        let ordered: Vec<Post> = Post::recent().load(&mut conn).unwrap();
        assert_eq!(ordered.last().unwrap().message_id, 50);
    }

    #[test]
    fn since_excludes_older_posts() {
        let mut conn = test_conn();
        let old = NewPost {
            message_id: 51,
            content: "stale",
            media_type: None,
            category: None,
            timestamp: Some("2020-01-01 00:00:00"),
        };
        assert!(insert_post(&mut conn, &old).unwrap());

        let fresh: Vec<Post> = Post::since("2021-01-01 00:00:00").load(&mut conn).unwrap();
        assert!(fresh.iter().all(|p| p.message_id != 51));
        assert_eq!(fresh.len(), 3);
    }

    #[test]
    fn in_category_filters_seed_rows() {
        let mut conn = test_conn();
        let news: Vec<Post> = Post::in_category("news").load(&mut conn).unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].message_id, 3);
    }
}
