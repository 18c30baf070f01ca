// crates/sync-engine/src/lib.rs
//! Request/response synchronization engine
//!
//! Turns declarative resource requests into store events:
//! - Request construction and transport selection
//! - Response and error normalization
//! - Progress forwarding
//! - Collection-to-item normalization (keys, positions, transforms)
//!
//! The engine never touches a store. Events go to a [`Dispatcher`].
//!
//! # Example
//!
//! ```rust,no_run
//! use resync_config::EngineConfig;
//! use resync_core::Event;
//! use resync_sync_engine::{ActionOptions, RequestExecutor, Resource};
//!
//! # async fn run() -> resync_sync_engine::SyncResult<()> {
//! let executor = RequestExecutor::from_config(&EngineConfig::default())?;
//! let users = Resource::item("FETCH_USER", "http://test.com/users/:id?");
//!
//! let mut events = Vec::new();
//! executor
//!     .execute(&users, ActionOptions::new().with_param("id", 1), &mut |event: Event| {
//!         events.push(event)
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod collection;
mod context;
mod dispatch;
mod error;
mod executor;
mod item;
mod key;
mod resource;
mod signal;
mod transform;
mod url;

pub use builder::{EventBuilder, ReceiveCollection, ReceiveItem};
pub use collection::{CollectionSynchronizer, SyncedCollection};
pub use context::RequestContext;
pub use dispatch::{ChannelDispatcher, Dispatcher};
pub use error::{SyncError, SyncResult};
pub use executor::RequestExecutor;
pub use item::receive_item;
pub use key::{collection_key, derive_key, KEY_SEPARATOR};
pub use resource::{ActionOptions, Resource};
pub use signal::signal;
pub use transform::{Transform, TransformPipeline};
pub use url::expand_url;
