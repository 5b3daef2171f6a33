//! Crate-wide error type.
//!
//! Every fallible operation in the crate funnels into [`Error`]. Validation
//! failures are raised before any network I/O; transport and decoding errors
//! are wrapped as-is and never retried.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: bad enumerated wire value, conflicting polymorphic
    /// discriminant, webhook-name policy violation, bad public key, etc.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutating call was attempted without valid credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A mutating call was attempted on an entity whose validity flag has
    /// been cleared by a successful delete.
    #[error("entity is no longer valid: {0}")]
    InvalidEntity(String),

    /// The schema accepts this operation but the implementation does not.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Non-success status from the Discord REST API.
    #[error("discord api error {status} on {route}: {body}")]
    Api {
        status: u16,
        route: String,
        body: String,
    },

    /// An inbound webhook request failed signature verification.
    #[error("invalid request signature")]
    Signature,

    /// Transport / network error, surfaced unmodified.
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Socket-level error from the webhook endpoint.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error, surfaced unmodified.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is recoverable by the caller correcting input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this error belongs to the authorization class: missing
    /// credentials or an entity already marked invalid.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::InvalidEntity(_))
    }
}
