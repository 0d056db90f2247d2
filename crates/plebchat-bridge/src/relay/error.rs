//! Relay error taxonomy.

use thiserror::Error;

use crate::webhook::DeliveryError;

/// Errors surfaced by the outbound relay to its HTTP caller.
///
/// `Validation` is user-correctable (400). `Configuration` and `Delivery`
/// are operator-facing (500). The inbound direction has no caller to
/// answer, so its failures are logged and swallowed instead of taking
/// this shape.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}
