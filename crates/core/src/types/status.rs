//! Request lifecycle status attached to items and collections

use super::common::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Discriminant of a [`Status`], also carried on every emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    /// A request has been dispatched and no terminal response has arrived
    Fetching,
    /// The last request completed successfully
    Success,
    /// The last request failed
    Error,
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusType::Fetching => write!(f, "FETCHING"),
            StatusType::Success => write!(f, "SUCCESS"),
            StatusType::Error => write!(f, "ERROR"),
        }
    }
}

/// Lifecycle status of an item or collection
///
/// Created as `Fetching` when a request goes out, replaced by `Success` or
/// `Error` when the terminal response arrives. A terminal status is only ever
/// replaced by the status of a newer request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Fetching,
    #[serde(rename_all = "camelCase")]
    Success { synced_at: Timestamp },
    #[serde(rename_all = "camelCase")]
    Error { http_code: u16, error: Value },
}

impl Status {
    /// Creates a success status synced at the given moment
    pub fn success(synced_at: Timestamp) -> Self {
        Status::Success { synced_at }
    }

    /// Creates an error status
    pub fn failed(http_code: u16, error: Value) -> Self {
        Status::Error { http_code, error }
    }

    /// Returns the discriminant
    pub fn status_type(&self) -> StatusType {
        match self {
            Status::Fetching => StatusType::Fetching,
            Status::Success { .. } => StatusType::Success,
            Status::Error { .. } => StatusType::Error,
        }
    }

    /// Returns true for `Success` and `Error`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Fetching)
    }

    pub fn synced_at(&self) -> Option<Timestamp> {
        match self {
            Status::Success { synced_at } => Some(*synced_at),
            _ => None,
        }
    }

    pub fn http_code(&self) -> Option<u16> {
        match self {
            Status::Error { http_code, .. } => Some(*http_code),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Value> {
        match self {
            Status::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}
