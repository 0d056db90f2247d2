//! Core relay logic: canonical message model, loop guard, and the two
//! relay directions.

mod error;
mod guard;
mod inbound;
mod message;
mod outbound;

pub use error::RelayError;
pub use guard::Provenance;
pub use inbound::InboundRelay;
pub use message::{ImageRef, Message, Origin, webhook_content};
pub use outbound::{BRIDGE_USERNAME, OutboundRelay};
