//! Protocol error types

use thiserror::Error;

/// Errors raised while decoding push messages
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Frame is not valid JSON or lacks a `type`
    #[error("Malformed envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope is fine but its `data` does not fit the declared type
    #[error("Invalid {kind} payload: {error}")]
    Payload { kind: String, error: String },
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::Payload {
            kind: "Status".to_string(),
            error: "expected a map".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Status payload: expected a map");
    }
}
