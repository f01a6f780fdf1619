use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2;
use diesel::SqliteConnection;

use crate::constants::DEFAULT_MEDIA_TYPE;
use crate::errors::ApiError;
use crate::handler::{ChannelDB, WithDB};
use crate::schema::posts;
use crate::view_models::{Envelope, Stats};

pub async fn get_stats_handler(
    pool: Arc<r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>>,
) -> Result<impl IntoResponse, ApiError> {
    let db = ChannelDB::new(pool);
    let mut conn = db.dbconn()?;

    let total_posts: i64 = posts::table
        .count()
        .get_result(&mut conn)
        .map_err(|e| db.handle_errors(e))?;

    let counts: Vec<(Option<String>, i64)> = posts::table
        .group_by(posts::media_type)
        .select((posts::media_type, count_star()))
        .load(&mut conn)
        .map_err(|e| db.handle_errors(e))?;

    let mut media_types: BTreeMap<String, i64> = BTreeMap::new();
    for (media_type, count) in counts {
        let key = media_type.unwrap_or_else(|| DEFAULT_MEDIA_TYPE.into());
        *media_types.entry(key).or_insert(0) += count;
    }

    Ok(Json(Envelope::new(Stats {
        total_posts,
        media_types,
        collected_at: Utc::now().to_rfc3339(),
    })))
}
