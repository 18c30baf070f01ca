// crates/sync-engine/src/dispatch.rs
//! Dispatch capability: the sole consumer of emitted events

use crate::error::{SyncError, SyncResult};
use futures::channel::mpsc::UnboundedSender;
use resync_core::Event;

/// Receives every event a request emits, in order
pub trait Dispatcher: Send {
    fn dispatch(&mut self, event: Event) -> SyncResult<()>;
}

impl<F> Dispatcher for F
where
    F: FnMut(Event) + Send,
{
    fn dispatch(&mut self, event: Event) -> SyncResult<()> {
        self(event);
        Ok(())
    }
}

/// Forwards events into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelDispatcher(UnboundedSender<Event>);

impl ChannelDispatcher {
    pub fn new(sender: UnboundedSender<Event>) -> Self {
        Self(sender)
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&mut self, event: Event) -> SyncResult<()> {
        self.0
            .unbounded_send(event)
            .map_err(|e| SyncError::Dispatch(format!("receiver dropped: {}", e)))
    }
}
