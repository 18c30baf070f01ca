// crates/network/src/error.rs
//! Error types for network operations

use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

/// Boxed error returned by user-supplied adaptors and error handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur while preparing a request or normalizing a response
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Custom response adaptor failed
    #[error("Response adaptor failed: {0}")]
    Adaptor(#[source] BoxError),

    /// Custom error handler failed
    #[error("Error handler failed: {0}")]
    ErrorHandler(#[source] BoxError),

    /// Header name is not a valid HTTP token
    #[error("Invalid header name {name:?}: {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    /// Header value holds a line break or other control character
    #[error("Invalid value for header {name:?}: {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

impl NetworkError {
    /// Returns true if the error came from user-supplied response handling
    ///
    /// These are never turned into events; they go back to the caller.
    pub fn is_handler_failure(&self) -> bool {
        matches!(self, NetworkError::Adaptor(_) | NetworkError::ErrorHandler(_))
    }
}

/// Failure to obtain any HTTP response at all
#[derive(Debug, Error)]
pub enum TransportError {
    /// reqwest failed to connect, send or read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Connection-level failure reported by a non-reqwest transport
    #[error("Connection failed: {0}")]
    Connection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_display() {
        let source = reqwest::header::HeaderValue::from_str("a\nb").unwrap_err();
        let err = NetworkError::InvalidHeaderValue {
            name: "X-Trace".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid value for header \"X-Trace\""));
        assert!(!err.is_handler_failure());
    }

    #[test]
    fn test_handler_failures() {
        let err = NetworkError::Adaptor("bad shape".into());
        assert!(err.is_handler_failure());
        assert!(err.to_string().contains("bad shape"));

        let err = NetworkError::ErrorHandler("boom".into());
        assert!(err.is_handler_failure());

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!NetworkError::Decode(decode).is_handler_failure());
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Connection("refused".to_string());
        assert!(err.to_string().contains("refused"));
    }
}
