//! Platform → application relay direction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use plebchat_gateway_discord::{ChannelEvent, EventAttachment, EventSink};

use super::guard::Provenance;
use super::message::{ImageRef, Message};
use crate::store::{MessageStore, ServerTimestamp, StoreRecord};

/// Relays human-authored platform events into the shared store.
///
/// Every event is independent: a failed forward is logged and swallowed
/// so the subscription keeps processing. Holds only read-only
/// configuration, so concurrent deliveries need no locking.
pub struct InboundRelay {
    channel_id: u64,
    store: Arc<dyn MessageStore>,
}

impl InboundRelay {
    pub fn new(channel_id: u64, store: Arc<dyn MessageStore>) -> Self {
        Self { channel_id, store }
    }
}

#[async_trait]
impl EventSink for InboundRelay {
    async fn deliver(&self, event: ChannelEvent) {
        // Provenance first: bridge echoes must be dropped before anything
        // is constructed from them.
        if Provenance::classify(event.author_is_bridge).is_bridge() {
            debug!(channel = event.channel_id, "Dropping bridge-authored event");
            return;
        }
        if event.channel_id != self.channel_id {
            debug!(
                channel = event.channel_id,
                "Ignoring event outside the bridged channel"
            );
            return;
        }

        let image = first_image_url(&event.attachments).map(ImageRef::Url);
        let message = match Message::platform(&event.author_name, Some(&event.content), image) {
            Ok(message) => message,
            Err(e) => {
                debug!(author = %event.author_name, "Skipping event with nothing to relay: {e}");
                return;
            }
        };

        let record = StoreRecord {
            name: message.sender().to_string(),
            text: message.text().to_string(),
            timestamp: ServerTimestamp,
            is_discord: true,
            discord_avatar: event.author_avatar,
            image_data: message.image().map(|image| image.as_str().to_string()),
        };

        if let Err(e) = self.store.append(record).await {
            warn!(author = %message.sender(), "Failed to forward platform message: {e}");
        }
    }
}

/// URL of the first attachment carrying an image content type.
///
/// At most one image per message crosses the bridge; later image
/// attachments are ignored.
fn first_image_url(attachments: &[EventAttachment]) -> Option<String> {
    attachments
        .iter()
        .find(|attachment| {
            attachment
                .content_type
                .as_deref()
                .is_some_and(|content_type| content_type.starts_with("image/"))
        })
        .map(|attachment| attachment.url.clone())
}
