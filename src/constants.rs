pub const DEFAULT_MEDIA_TYPE: &str = "text";
pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 1000;
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const SERVICE_NAME: &str = "telegram-posts-api";
pub const CONFIG_FILE_VAR: &str = "CHANNELPOST_RS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "channelpost.toml";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
