// crates/sync-engine/src/context.rs
//! Per-request context handed to event builders and transforms

use crate::transform::TransformPipeline;
use resync_core::{ItemKey, Projection, RequestId};
use serde_json::{Map, Value};

/// Resource options for one request, without its request descriptor
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub action: &'a str,
    pub request_id: RequestId,
    /// Item key or collection slot the request targets
    pub key: &'a ItemKey,
    pub params: &'a Map<String, Value>,
    pub key_by: &'a [String],
    pub projection: Option<&'a Projection>,
    pub transforms: &'a TransformPipeline,
}

impl RequestContext<'_> {
    pub fn projection(&self) -> Option<Projection> {
        self.projection.cloned()
    }
}
