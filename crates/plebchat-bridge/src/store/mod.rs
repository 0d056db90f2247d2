//! Store delivery channel: append-only writes to the shared message
//! collection.

use async_trait::async_trait;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use thiserror::Error;

mod firebase;

pub use firebase::FirebaseStore;

/// A record appended to the shared message collection.
///
/// Field names are the store-side wire contract shared with the chat app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    pub name: String,
    pub text: String,
    pub timestamp: ServerTimestamp,
    pub is_discord: bool,
    pub discord_avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

/// Server-value sentinel: the store assigns the actual ordering value on
/// append, so the relay never fabricates timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerTimestamp;

impl Serialize for ServerTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(".sv", "timestamp")?;
        map.end()
    }
}

/// Errors from the store transport.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Append-only write to the message collection. Durability and ordering
/// are the store's own guarantees; the relay fires and forgets.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, record: StoreRecord) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_store_field_names() {
        let record = StoreRecord {
            name: "Bob".to_string(),
            text: "yo".to_string(),
            timestamp: ServerTimestamp,
            is_discord: true,
            discord_avatar: "https://cdn.example.com/bob.png".to_string(),
            image_data: None,
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name"], "Bob");
        assert_eq!(value["text"], "yo");
        assert_eq!(value["isDiscord"], true);
        assert_eq!(value["discordAvatar"], "https://cdn.example.com/bob.png");
        assert_eq!(value["timestamp"], serde_json::json!({ ".sv": "timestamp" }));
        assert!(value.get("imageData").is_none());
    }

    #[test]
    fn record_includes_image_url_when_present() {
        let record = StoreRecord {
            name: "Bob".to_string(),
            text: String::new(),
            timestamp: ServerTimestamp,
            is_discord: true,
            discord_avatar: String::new(),
            image_data: Some("https://cdn.example.com/pic.png".to_string()),
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["imageData"], "https://cdn.example.com/pic.png");
    }
}
