use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::Deserialize;

use crate::schema::posts;

#[derive(Debug, Queryable)]
pub struct Post {
    pub id: i32,
    pub message_id: i32,
    pub content: String,
    pub media_type: Option<String>,
    pub category: Option<String>,
    pub timestamp: Option<String>,
}

pub type BoxedPostQuery<'a> = posts::BoxedQuery<'a, Sqlite>;

impl Post {
    /// Newest-first. Seed rows share a CURRENT_TIMESTAMP second, so `id`
    /// breaks ties to keep the ordering stable.
    pub fn recent() -> BoxedPostQuery<'static> {
        posts::table
            .order((posts::timestamp.desc(), posts::id.desc()))
            .into_boxed()
    }

    pub fn in_category(category: &str) -> BoxedPostQuery<'_> {
        Self::recent().filter(posts::category.eq(category))
    }

    pub fn by_message_id(message_id: i32) -> BoxedPostQuery<'static> {
        posts::table
            .filter(posts::message_id.eq(message_id))
            .into_boxed()
    }

    /// Posts at or after a cutoff in the stored `%Y-%m-%d %H:%M:%S` form
    /// (the text ordering matches the chronological one).
    pub fn since(cutoff: &str) -> BoxedPostQuery<'_> {
        Self::recent().filter(posts::timestamp.ge(cutoff))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost<'a> {
    pub message_id: i32,
    pub content: &'a str,
    pub media_type: Option<&'a str>,
    pub category: Option<&'a str>,
    pub timestamp: Option<&'a str>,
}

/// A post document supplied out of band (stdin import). Omitted
/// classification fields fall through to the column defaults.
#[derive(Debug, Deserialize)]
pub struct PostImport {
    pub message_id: i32,
    pub content: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl PostImport {
    pub fn as_new_post(&self) -> NewPost<'_> {
        NewPost {
            message_id: self.message_id,
            content: &self.content,
            media_type: self.media_type.as_deref(),
            category: self.category.as_deref(),
            timestamp: self.timestamp.as_deref(),
        }
    }
}
