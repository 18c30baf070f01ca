//! Events emitted toward the external store layer
//!
//! One request produces, in order: a single [`FetchingEvent`], zero or more
//! [`ProgressUpdate`]s and exactly one terminal [`SuccessEvent`] or
//! [`ErrorEvent`]. Every event carries the [`RequestId`] of the request that
//! produced it so the store can arbitrate between overlapping requests for the
//! same key.

use super::item::{Collection, Item, ItemKey, Projection};
use super::progress::ProgressEvent;
use super::status::{Status, StatusType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identity of one `execute` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marks the start of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchingEvent {
    #[serde(rename = "type")]
    pub action: String,
    pub request_id: RequestId,
    pub status: StatusType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

/// Intermediate, non-terminal progress of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(rename = "type")]
    pub action: String,
    pub request_id: RequestId,
    pub status: StatusType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
    pub progress: ProgressEvent,
}

/// Terminal success: either a single item or a synchronized collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEvent {
    #[serde(rename = "type")]
    pub action: String,
    pub request_id: RequestId,
    pub status: StatusType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<HashMap<ItemKey, Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_values: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

impl SuccessEvent {
    /// Creates an empty success event to be filled by an event builder
    pub fn new(action: impl Into<String>, request_id: RequestId) -> Self {
        Self {
            action: action.into(),
            request_id,
            status: StatusType::Success,
            key: None,
            item: None,
            items: None,
            collection: None,
            previous_values: None,
            projection: None,
        }
    }
}

/// Terminal failure, shared by network, HTTP and application errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    #[serde(rename = "type")]
    pub action: String,
    pub request_id: RequestId,
    pub status: StatusType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    /// 0 when no HTTP response was received
    pub http_code: u16,
    pub error: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

impl ErrorEvent {
    /// The status the store should record for the failed item or collection
    pub fn to_status(&self) -> Status {
        Status::failed(self.http_code, self.error.clone())
    }

    /// Returns true when the transport never received a response
    pub fn is_network_error(&self) -> bool {
        self.http_code == 0
    }
}

/// Any event handed to the dispatch capability
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Event {
    Fetching(FetchingEvent),
    Progress(ProgressUpdate),
    Success(SuccessEvent),
    Error(ErrorEvent),
}

impl Event {
    /// Action name the store routes on
    pub fn action(&self) -> &str {
        match self {
            Event::Fetching(e) => &e.action,
            Event::Progress(e) => &e.action,
            Event::Success(e) => &e.action,
            Event::Error(e) => &e.action,
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            Event::Fetching(e) => e.request_id,
            Event::Progress(e) => e.request_id,
            Event::Success(e) => e.request_id,
            Event::Error(e) => e.request_id,
        }
    }

    pub fn status_type(&self) -> StatusType {
        match self {
            Event::Fetching(e) => e.status,
            Event::Progress(e) => e.status,
            Event::Success(e) => e.status,
            Event::Error(e) => e.status,
        }
    }

    pub fn key(&self) -> Option<&ItemKey> {
        match self {
            Event::Fetching(e) => e.key.as_ref(),
            Event::Progress(e) => e.key.as_ref(),
            Event::Success(e) => e.key.as_ref(),
            Event::Error(e) => e.key.as_ref(),
        }
    }

    /// Returns true for the single success-or-error event ending a request
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Success(_) | Event::Error(_))
    }
}

impl From<SuccessEvent> for Event {
    fn from(event: SuccessEvent) -> Self {
        Event::Success(event)
    }
}

impl From<ErrorEvent> for Event {
    fn from(event: ErrorEvent) -> Self {
        Event::Error(event)
    }
}
