use std::sync::Arc;

use axum::extract::Query;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2;
use diesel::SqliteConnection;
use serde::Deserialize;

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::errors::ApiError;
use crate::handler::{ChannelDB, WithDB};
use crate::models::Post;
use crate::schema::posts;
use crate::view_models::{self, Envelope, PageMeta, Pagination, PostsPage};

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l > 0 && l <= MAX_PAGE_LIMIT => l,
        _ => DEFAULT_PAGE_LIMIT,
    }
}

fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.filter(|o| *o >= 0).unwrap_or(0)
}

fn count_posts(conn: &mut SqliteConnection, category: Option<&str>) -> QueryResult<i64> {
    match category {
        Some(cat) => posts::table
            .filter(posts::category.eq(cat))
            .count()
            .get_result(conn),
        None => posts::table.count().get_result(conn),
    }
}

pub async fn get_posts_handler(
    pool: Arc<r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    Query(params): Query<PostsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let db = ChannelDB::new(pool);
    let mut conn = db.dbconn()?;

    let query = match params.category.as_deref() {
        Some(cat) => Post::in_category(cat),
        None => Post::recent(),
    };
    let rows: Vec<Post> = query
        .limit(limit)
        .offset(offset)
        .load(&mut conn)
        .map_err(|e| db.handle_errors(e))?;

    let total = count_posts(&mut conn, params.category.as_deref())
        .map_err(|e| db.handle_errors(e))?;

    let data: Vec<view_models::Post> = rows.into_iter().map(view_models::Post::new_from).collect();
    let count = data.len();

    Ok(Json(PostsPage {
        success: true,
        data,
        pagination: Pagination {
            limit,
            offset,
            total,
            has_more: offset + (count as i64) < total,
        },
        meta: PageMeta {
            category_filter: params.category,
            count,
            timestamp: Utc::now().to_rfc3339(),
        },
    }))
}

pub async fn get_post_handler(
    message_id: i32,
    pool: Arc<r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>>,
) -> Result<impl IntoResponse, ApiError> {
    let db = ChannelDB::new(pool);
    let mut conn = db.dbconn()?;

    let post: Post = Post::by_message_id(message_id)
        .first(&mut conn)
        .map_err(|e| db.handle_errors(e))?;

    Ok(Json(Envelope::new(view_models::Post::new_from(post))))
}
