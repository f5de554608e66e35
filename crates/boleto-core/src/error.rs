//! # Lookup Error Types
//!
//! Typed error handling for the invoice lookup flow.
//! Provider calls and selection return `Result<T, LookupError>`; the HTTP
//! layer collapses every variant into one opaque response.

use thiserror::Error;

/// Core error type for every failure along the lookup path
#[derive(Debug, Error)]
pub enum LookupError {
    /// Configuration errors (missing env vars, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("Provider error [HTTP {status}]: {body}")]
    Provider { status: u16, body: String },

    /// Provider body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Due date in a shape we cannot read
    #[error("Invalid due date: {0:?}")]
    InvalidDate(String),
}

impl LookupError {
    /// Returns true if the failure happened before or outside the provider
    /// answering (transport, timeouts).
    pub fn is_transport(&self) -> bool {
        matches!(self, LookupError::Network(_))
    }
}

/// Result type alias for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;
