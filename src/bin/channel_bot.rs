use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use channelpost_rs::config::ChannelSiteConfig;
use channelpost_rs::constants::*;
use channelpost_rs::db;
use channelpost_rs::handler::{ChannelDB, WithDB};
use channelpost_rs::telegram::ChannelClient;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
    let config = ChannelSiteConfig::from_file(std::path::Path::new(&config_path))
        .map_err(|e| anyhow!("error loading config from {}: {:?}", config_path, e))?;
    let token = env::var(BOT_TOKEN_VAR)
        .map_err(|e| anyhow!("error reading env var {}: {:?}", BOT_TOKEN_VAR, e))?;

    let dbpool = Arc::new(channelpost_rs::new_dbconn_pool(&config.database_url)?);
    let store = ChannelDB::new(dbpool);
    let client = ChannelClient::new(&config.channel.api_base, &token);

    info!("archiving channel {} via long poll", config.channel.channel_id);

    let mut offset: i64 = 0;
    loop {
        let updates = match client
            .get_updates(offset, config.channel.poll_timeout_secs)
            .await
        {
            Ok(updates) => updates,
            Err(e) => {
                error!("getUpdates failed: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let message = match update.channel_post {
                Some(message) => message,
                None => continue,
            };

            if message.chat.id != config.channel.channel_id {
                info!("ignoring post from chat {}", message.chat.id);
                continue;
            }

            let post = message.classify();
            let new_post = post.as_new_post();
            match store.run_txn(|conn| db::insert_post(conn, &new_post)) {
                Ok(true) => {
                    info!(
                        "saved post {} ({}/{})",
                        post.message_id, post.media_type, post.category
                    );
                    if let Some(admin) = config.channel.admin_user_id {
                        let preview: String = post.content.chars().take(100).collect();
                        let note = format!("Saved post {}\n{}", post.message_id, preview);
                        if let Err(e) = client.send_message(admin, &note).await {
                            warn!("failed to notify admin: {}", e);
                        }
                    }
                }
                Ok(false) => info!("post {} already stored, skipping", post.message_id),
                Err(e) => error!("error saving post {}: {:?}", post.message_id, e),
            }
        }
    }
}
