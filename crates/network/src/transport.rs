// crates/network/src/transport.rs
//! Transport seam shared by the fetch-style and progress-capable transports

use crate::error::TransportError;
use crate::request::PreparedRequest;
use crate::response::RawResponse;
use futures::future::BoxFuture;
use futures::stream::{self, BoxStream, StreamExt};
use resync_core::ProgressEvent;
use std::sync::Arc;

/// One in-flight request: its progress stream and its eventual response
///
/// Every progress event a transport produces is pushed before `response`
/// resolves, so a consumer that drains `progress` after the response has
/// arrived sees the full, FIFO sequence.
pub struct Exchange<'a> {
    pub progress: BoxStream<'static, ProgressEvent>,
    pub response: BoxFuture<'a, Result<RawResponse, TransportError>>,
}

impl<'a> Exchange<'a> {
    /// Exchange that never reports progress
    pub fn without_progress(response: BoxFuture<'a, Result<RawResponse, TransportError>>) -> Self {
        Self {
            progress: stream::empty().boxed(),
            response,
        }
    }
}

/// Sends prepared requests
///
/// Implementations are injected into the executor, which keeps the engine
/// testable without a live network.
pub trait Transport: Send + Sync {
    fn send(&self, request: PreparedRequest) -> Exchange<'_>;

    /// Whether `send` produces upload/download progress events
    fn reports_progress(&self) -> bool {
        false
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: PreparedRequest) -> Exchange<'_> {
        (**self).send(request)
    }

    fn reports_progress(&self) -> bool {
        (**self).reports_progress()
    }
}
