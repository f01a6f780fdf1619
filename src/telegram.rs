use log::debug;
use serde::Deserialize;

use crate::errors::IngestError;
use crate::models::NewPost;
use crate::post_util;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub channel_post: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Sticker {
    #[serde(default)]
    pub emoji: Option<String>,
}

/// The slice of the Bot API message object we archive. Media attachments
/// only matter by presence, so they stay untyped.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i32,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub photo: Option<serde_json::Value>,
    #[serde(default)]
    pub video: Option<serde_json::Value>,
    #[serde(default)]
    pub document: Option<serde_json::Value>,
    #[serde(default)]
    pub audio: Option<serde_json::Value>,
    #[serde(default)]
    pub voice: Option<serde_json::Value>,
    #[serde(default)]
    pub animation: Option<serde_json::Value>,
    #[serde(default)]
    pub sticker: Option<Sticker>,
}

impl Message {
    pub fn media_type(&self) -> &'static str {
        if self.photo.is_some() {
            "photo"
        } else if self.video.is_some() {
            "video"
        } else if self.document.is_some() {
            "document"
        } else if self.audio.is_some() {
            "audio"
        } else if self.voice.is_some() {
            "audio"
        } else if self.animation.is_some() {
            "video"
        } else if self.sticker.is_some() {
            "sticker"
        } else {
            "text"
        }
    }

    /// Text body, falling back to the caption, then the sticker emoji.
    /// A bare attachment without any of those archives as empty content.
    pub fn content(&self) -> String {
        if let Some(text) = &self.text {
            text.clone()
        } else if let Some(caption) = &self.caption {
            caption.clone()
        } else if let Some(sticker) = &self.sticker {
            sticker.emoji.clone().unwrap_or_else(|| "Sticker".into())
        } else {
            String::new()
        }
    }

    pub fn classify(&self) -> ChannelPost {
        let content = self.content();
        let media_type = self.media_type();
        let category = post_util::categorize(&content, media_type);
        ChannelPost {
            message_id: self.message_id,
            content,
            media_type,
            category,
        }
    }
}

/// A channel message reduced to the columns we store.
#[derive(Debug)]
pub struct ChannelPost {
    pub message_id: i32,
    pub content: String,
    pub media_type: &'static str,
    pub category: &'static str,
}

impl ChannelPost {
    pub fn as_new_post(&self) -> NewPost<'_> {
        NewPost {
            message_id: self.message_id,
            content: &self.content,
            media_type: Some(self.media_type),
            category: Some(self.category),
            timestamp: None,
        }
    }
}

pub struct ChannelClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ChannelClient {
    pub fn new(api_base: &str, token: &str) -> Self {
        ChannelClient {
            http_client: reqwest::Client::new(),
            base_url: format!("{}/bot{}", api_base, token),
        }
    }

    /// Long-poll for channel posts. `offset` acknowledges everything below
    /// it, so re-delivery only happens on a crash between poll and store.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, IngestError> {
        let resp: ApiResponse<Vec<Update>> = self
            .http_client
            .get(format!("{}/getUpdates", self.base_url))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
                ("allowed_updates", "[\"channel_post\"]".to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(IngestError::Api(
                resp.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        let updates = resp.result.unwrap_or_default();
        debug!("getUpdates returned {} updates", updates.len());
        Ok(updates)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), IngestError> {
        let resp: ApiResponse<serde_json::Value> = self
            .http_client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(IngestError::Api(
                resp.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Update;

    #[test]
    fn photo_with_caption_classifies_as_media() {
        let raw = r#"{
            "update_id": 100,
            "channel_post": {
                "message_id": 5,
                "chat": {"id": -1001},
                "caption": "vacation pics",
                "photo": [{"file_id": "abc", "width": 90, "height": 90}]
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        let message = update.channel_post.unwrap();

        assert_eq!(message.media_type(), "photo");
        let post = message.classify();
        assert_eq!(post.category, "media");
        assert_eq!(post.content, "vacation pics");
    }

    #[test]
    fn text_with_alert_keyword_is_important() {
        let raw = r#"{
            "update_id": 101,
            "channel_post": {
                "message_id": 6,
                "chat": {"id": -1001},
                "text": "alert: downtime at noon"
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        let post = update.channel_post.unwrap().classify();

        assert_eq!(post.media_type, "text");
        assert_eq!(post.category, "important");
    }

    #[test]
    fn bare_sticker_uses_emoji_as_content() {
        let raw = r#"{
            "update_id": 102,
            "channel_post": {
                "message_id": 7,
                "chat": {"id": -1001},
                "sticker": {"emoji": "🎉"}
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        let post = update.channel_post.unwrap().classify();

        assert_eq!(post.media_type, "sticker");
        assert_eq!(post.content, "🎉");
        assert_eq!(post.category, "media");
    }

    #[test]
    fn non_post_update_has_no_channel_post() {
        let raw = r#"{"update_id": 103, "message": {"message_id": 1}}"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert!(update.channel_post.is_none());
    }
}
