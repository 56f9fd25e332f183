//! Live connection error types

use thiserror::Error;

/// Errors raised while preparing a push connection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiveError {
    /// Endpoint or origin could not be parsed
    #[error("Invalid URL {url}: {error}")]
    InvalidUrl { url: String, error: String },

    /// Endpoint uses a scheme that cannot carry a WebSocket
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for live connection operations
pub type LiveResult<T> = Result<T, LiveError>;
