//! Transport-neutral event types delivered to the subscription consumer.

use async_trait::async_trait;

/// A single message event observed on the platform.
///
/// Carries everything the consumer needs to decide provenance, channel
/// eligibility, and content. No serenity types leak past this boundary.
#[derive(Debug, Clone)]
pub struct ChannelEvent {
    /// Whether the platform flags the author as a bot. Webhook posts
    /// (including the bridge's own) arrive with this flag set.
    pub author_is_bridge: bool,
    pub channel_id: u64,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
    pub attachments: Vec<EventAttachment>,
}

/// An attachment on a platform message.
#[derive(Debug, Clone)]
pub struct EventAttachment {
    pub url: String,
    pub content_type: Option<String>,
}

/// Consumer side of the subscription: invoked once per inbound event.
///
/// Each invocation is independent. The gateway has no negative
/// acknowledgment to offer the platform, so implementations handle their
/// own failures and return; the gateway keeps delivering subsequent
/// events regardless.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, event: ChannelEvent);
}
