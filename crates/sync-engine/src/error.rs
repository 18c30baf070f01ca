// crates/sync-engine/src/error.rs
//! Error types for sync operations
//!
//! Only failures the engine cannot express as an error event end up here.
//! Transport failures and HTTP errors are dispatched, not returned.

use resync_network::NetworkError;
use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that propagate to the caller of `execute`
#[derive(Debug, Error)]
pub enum SyncError {
    /// No value for a `key_by` field in either the params or the record
    #[error("Cannot derive item key: no value for '{field}'")]
    MissingKey { field: String },

    /// A required `:name` URL segment has no param
    #[error("Missing URL parameter '{0}'")]
    MissingParam(String),

    /// A collection response whose values are not an array
    #[error("Invalid sync data: {0}")]
    InvalidData(String),

    /// Adaptor or error handler failure, invalid header, client construction
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The dispatcher could not accept an event
    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}
