use std::sync::Arc;

use axum::response::IntoResponse;
use axum::Json;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2;
use diesel::SqliteConnection;

use crate::errors::ApiError;
use crate::handler::{ChannelDB, WithDB};
use crate::schema::posts;
use crate::view_models::{CategoryCount, Envelope};

pub async fn get_categories_handler(
    pool: Arc<r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>>,
) -> Result<impl IntoResponse, ApiError> {
    let db = ChannelDB::new(pool);
    let mut conn = db.dbconn()?;

    let counts: Vec<(Option<String>, i64)> = posts::table
        .group_by(posts::category)
        .select((posts::category, count_star()))
        .load(&mut conn)
        .map_err(|e| db.handle_errors(e))?;

    // Rows written around the API (NULL category) are not listed as a
    // filterable category.
    let data: Vec<CategoryCount> = counts
        .into_iter()
        .filter_map(|(name, count)| name.map(|name| CategoryCount { name, count }))
        .collect();

    Ok(Json(Envelope::new(data)))
}
