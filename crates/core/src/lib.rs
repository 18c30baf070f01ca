//! Shared data model for the resync engine
//!
//! The request/response synchronization engine never touches a store directly.
//! Everything it produces is one of the types in this crate: item and collection
//! deltas, lifecycle statuses, progress notifications and the events that carry
//! them to an external reducer layer.

pub mod types;

pub use types::{
    Collection, Direction, ErrorEvent, Event, FetchingEvent, Item, ItemKey, ProgressEvent,
    ProgressPhase, ProgressUpdate, Projection, RequestId, Status, StatusType, SuccessEvent,
    Timestamp,
};
