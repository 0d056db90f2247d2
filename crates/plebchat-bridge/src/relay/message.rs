//! Canonical message model shared by both relay directions.

use super::error::RelayError;

/// Which side of the bridge a message was first authored on. Set once at
/// construction, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Application,
    Platform,
}

/// Reference to an attached image.
///
/// Image bytes are never re-uploaded: application payloads stay opaque
/// and platform attachments travel by URL only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Url(String),
    Data(String),
}

impl ImageRef {
    /// The underlying reference value, URL or opaque payload alike.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(value) | Self::Data(value) => value,
        }
    }
}

/// A single relayed message.
///
/// Constructed fresh on ingress, handed to a delivery adapter, then
/// dropped. The store assigns the ordering timestamp on append, so no
/// timestamp lives here.
#[derive(Debug, Clone)]
pub struct Message {
    sender: String,
    text: String,
    image: Option<ImageRef>,
    origin: Origin,
}

impl Message {
    /// Build a message authored in the chat application.
    pub fn application(
        sender: &str,
        text: Option<&str>,
        image: Option<ImageRef>,
    ) -> Result<Self, RelayError> {
        Self::new(sender, text, image, Origin::Application)
    }

    /// Build a message authored on the platform.
    pub fn platform(
        sender: &str,
        text: Option<&str>,
        image: Option<ImageRef>,
    ) -> Result<Self, RelayError> {
        Self::new(sender, text, image, Origin::Platform)
    }

    // Both paths apply the same rules: sender must be non-empty, and at
    // least one of text/image must be present. Absent text becomes "".
    fn new(
        sender: &str,
        text: Option<&str>,
        image: Option<ImageRef>,
        origin: Origin,
    ) -> Result<Self, RelayError> {
        if sender.is_empty() {
            return Err(RelayError::Validation("name is required".to_string()));
        }
        let text = text.unwrap_or_default().to_string();
        if text.is_empty() && image.is_none() {
            return Err(RelayError::Validation(
                "message needs text or an image".to_string(),
            ));
        }
        Ok(Self {
            sender: sender.to_string(),
            text,
            image,
            origin,
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

/// Render the platform-facing content line for a message.
///
/// Attached images are announced textually; binary data never crosses
/// the bridge.
pub fn webhook_content(message: &Message) -> String {
    let mut content = format!("-={}=-\n{}", message.sender(), message.text());
    if message.image().is_some() {
        if message.text().is_empty() {
            content.push_str("📸 *[Image]*");
        } else {
            content.push_str("\n📸 *[Image attached]*");
        }
    }
    content
}
