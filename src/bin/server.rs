use std::env;
use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, Query};
use axum::routing::{on, MethodFilter};
use axum::Router;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use channelpost_rs::config::ChannelSiteConfig;
use channelpost_rs::constants::*;
use channelpost_rs::handlers;
use channelpost_rs::handlers::PostsQuery;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
    let config = ChannelSiteConfig::from_file(std::path::Path::new(&config_path))
        .map_err(|e| anyhow!("error loading config from {}: {:?}", config_path, e))?;

    let dbpool = Arc::new(channelpost_rs::new_dbconn_pool(&config.database_url)?);
    info!("created dbpool from {:?}", config.database_url);

    let get_or_head = MethodFilter::GET.or(MethodFilter::HEAD);

    let mut app = Router::new()
        .route(
            "/posts",
            on(get_or_head, {
                let dbpool = dbpool.clone();
                move |query: Query<PostsQuery>| handlers::get_posts_handler(dbpool.clone(), query)
            }),
        )
        .route(
            "/posts/:message_id",
            on(get_or_head, {
                let dbpool = dbpool.clone();
                move |Path(message_id): Path<i32>| {
                    handlers::get_post_handler(message_id, dbpool.clone())
                }
            }),
        )
        .route(
            "/categories",
            on(get_or_head, {
                let dbpool = dbpool.clone();
                move || handlers::get_categories_handler(dbpool.clone())
            }),
        )
        .route(
            "/stats",
            on(get_or_head, {
                let dbpool = dbpool.clone();
                move || handlers::get_stats_handler(dbpool.clone())
            }),
        )
        .route("/health", on(get_or_head, handlers::get_health_handler));

    if let Some(frontend_dir) = &config.frontend_dir {
        info!("serving frontend from {:?}", frontend_dir);
        app = app.fallback_service(ServeDir::new(frontend_dir));
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
