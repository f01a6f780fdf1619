use serde::Serialize;

use crate::constants::{DEFAULT_CATEGORY, DEFAULT_MEDIA_TYPE};
use crate::models::Post as DBPost;
use crate::post_util;

#[derive(Debug, Serialize)]
pub struct Post {
    pub id: i32,
    pub message_id: i32,
    pub content: String,
    pub media_type: String,
    pub category: String,
    pub timestamp: Option<String>,
}

impl Post {
    /// A stored row shaped for the API: classification NULLs resolve to the
    /// documented defaults and the timestamp becomes RFC 3339.
    pub fn new_from(post: DBPost) -> Self {
        Post {
            id: post.id,
            message_id: post.message_id,
            content: post.content,
            media_type: post.media_type.unwrap_or_else(|| DEFAULT_MEDIA_TYPE.into()),
            category: post.category.unwrap_or_else(|| DEFAULT_CATEGORY.into()),
            timestamp: post.timestamp.as_deref().map(post_util::to_rfc3339),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub category_filter: Option<String>,
    pub count: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct PostsPage {
    pub success: bool,
    pub data: Vec<Post>,
    pub pagination: Pagination,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_posts: i64,
    pub media_types: std::collections::BTreeMap<String, i64>,
    pub collected_at: String,
}

/// Plain `{"success": true, "data": ...}` envelope for endpoints without
/// pagination.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Envelope {
            success: true,
            data,
        }
    }
}
