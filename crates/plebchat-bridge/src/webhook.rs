//! Outbound delivery channel: webhook POST to the platform.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Payload for the platform webhook call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub content: String,
}

/// Errors from the webhook transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// One-shot webhook transport. No retry, no backoff; the caller surfaces
/// failure directly.
#[async_trait]
pub trait OutboundDelivery: Send + Sync {
    async fn deliver(&self, payload: WebhookPayload) -> Result<(), DeliveryError>;
}

/// Webhook adapter posting JSON to a configured URL.
///
/// The HTTP client is process-scoped and injected at startup; its request
/// timeout bounds the delivery call.
pub struct DiscordWebhook {
    client: Client,
    url: Url,
}

impl DiscordWebhook {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl OutboundDelivery for DiscordWebhook {
    async fn deliver(&self, payload: WebhookPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Api { status, message });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_omits_absent_avatar() {
        let payload = WebhookPayload {
            username: "Pleb Chat".to_string(),
            avatar_url: None,
            content: "-=Alice=-\nhi".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["username"], "Pleb Chat");
        assert_eq!(value["content"], "-=Alice=-\nhi");
        assert!(value.get("avatar_url").is_none());
    }

    #[test]
    fn payload_includes_configured_avatar() {
        let payload = WebhookPayload {
            username: "Pleb Chat".to_string(),
            avatar_url: Some("https://cdn.example.com/avatar.png".to_string()),
            content: "-=Alice=-\nhi".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["avatar_url"], "https://cdn.example.com/avatar.png");
    }
}
