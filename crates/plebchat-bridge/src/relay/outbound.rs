//! Application → platform relay direction.

use std::sync::Arc;

use super::error::RelayError;
use super::message::{self, ImageRef, Message};
use crate::webhook::{OutboundDelivery, WebhookPayload};

/// Display name the bridge posts under on the platform side.
pub const BRIDGE_USERNAME: &str = "Pleb Chat";

/// Relays messages from the chat application to the platform webhook.
///
/// Holds no per-message state. One delivery attempt per call, no retry;
/// failures surface to the HTTP caller.
pub struct OutboundRelay {
    delivery: Option<Arc<dyn OutboundDelivery>>,
    avatar_url: Option<String>,
}

impl OutboundRelay {
    /// `delivery` is `None` when no webhook endpoint is configured; the
    /// relay then refuses every request with a configuration error.
    pub fn new(delivery: Option<Arc<dyn OutboundDelivery>>, avatar_url: Option<String>) -> Self {
        Self {
            delivery,
            avatar_url,
        }
    }

    pub async fn relay(
        &self,
        sender: &str,
        text: Option<&str>,
        image: Option<ImageRef>,
    ) -> Result<(), RelayError> {
        let message = Message::application(sender, text, image)?;

        let Some(delivery) = &self.delivery else {
            return Err(RelayError::Configuration(
                "outbound delivery URL is not configured".to_string(),
            ));
        };

        let payload = WebhookPayload {
            username: BRIDGE_USERNAME.to_string(),
            avatar_url: self.avatar_url.clone(),
            content: message::webhook_content(&message),
        };

        delivery.deliver(payload).await?;
        Ok(())
    }
}
