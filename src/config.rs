use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChannelSiteConfig {
    pub database_url: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory of prebuilt frontend assets to serve for unmatched paths.
    #[serde(default)]
    pub frontend_dir: Option<String>,

    pub channel: ChannelConfig,
}

#[derive(Debug, Deserialize)]
pub struct ChannelConfig {
    /// Chat id of the channel to archive. Posts from any other chat are ignored.
    pub channel_id: i64,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Optional user to notify after each stored post.
    #[serde(default)]
    pub admin_user_id: Option<i64>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3030".into()
}

fn default_api_base() -> String {
    crate::DEFAULT_TELEGRAM_API_BASE.into()
}

fn default_poll_timeout() -> u64 {
    crate::DEFAULT_POLL_TIMEOUT_SECS
}

impl ChannelSiteConfig {
    pub fn from_file(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod test {
    use super::ChannelSiteConfig;

    #[test]
    fn minimal_config_fills_defaults() {
        let raw = "database_url = \"posts.db\"\n\n[channel]\nchannel_id = -1001\n";
        let config: ChannelSiteConfig = toml::from_str(raw).unwrap();

        assert_eq!(config.database_url, "posts.db");
        assert_eq!(config.bind_addr, "0.0.0.0:3030");
        assert!(config.frontend_dir.is_none());
        assert_eq!(config.channel.channel_id, -1001);
        assert_eq!(config.channel.api_base, "https://api.telegram.org");
        assert_eq!(config.channel.poll_timeout_secs, 30);
        assert!(config.channel.admin_user_id.is_none());
    }
}
