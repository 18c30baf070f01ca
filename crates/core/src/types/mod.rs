//! Domain types for the synchronization engine
//!
//! - `common`: timestamps
//! - `status`: request lifecycle status
//! - `item`: item keys, items, collections and projections
//! - `progress`: upload/download progress notifications
//! - `event`: events handed to the dispatch capability

mod common;
mod event;
mod item;
mod progress;
mod status;

pub use common::Timestamp;
pub use event::{ErrorEvent, Event, FetchingEvent, ProgressUpdate, RequestId, SuccessEvent};
pub use item::{Collection, Item, ItemKey, Projection};
pub use progress::{Direction, ProgressEvent, ProgressPhase};
pub use status::{Status, StatusType};
