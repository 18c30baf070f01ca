// crates/sync-engine/src/resource.rs
//! Declarative resource descriptions and per-call options

use crate::builder::{EventBuilder, ReceiveCollection, ReceiveItem};
use crate::transform::{Transform, TransformPipeline};
use resync_core::{ItemKey, Projection};
use resync_network::{Method, RequestDescriptor, RequestOverrides, ResponseAdaptor};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// One remote endpoint and how its responses become events
///
/// `request.url` may be a template (`http://host/users/:id?`) expanded from
/// the call's params.
#[derive(Clone)]
pub struct Resource {
    pub action: String,
    pub request: RequestDescriptor,
    pub key_by: Vec<String>,
    pub transforms: TransformPipeline,
    pub projection: Option<Projection>,
    pub adaptor: Option<ResponseAdaptor>,
    /// Track upload/download progress unless the call says otherwise
    pub progress: bool,
    pub builder: Arc<dyn EventBuilder>,
}

impl Resource {
    pub fn new(
        action: impl Into<String>,
        request: RequestDescriptor,
        builder: impl EventBuilder + 'static,
    ) -> Self {
        Self {
            action: action.into(),
            request,
            key_by: vec!["id".to_string()],
            transforms: TransformPipeline::new(),
            projection: None,
            adaptor: None,
            progress: false,
            builder: Arc::new(builder),
        }
    }

    /// Single-item resource (show, create, update)
    pub fn item(action: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(action, RequestDescriptor::new(url), ReceiveItem)
    }

    /// Collection resource (index)
    pub fn collection(action: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(action, RequestDescriptor::new(url), ReceiveCollection)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.request.method = Some(method);
        self
    }

    pub fn with_request(mut self, request: RequestDescriptor) -> Self {
        self.request = request;
        self
    }

    pub fn with_key_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_by = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(Projection::new(projection));
        self
    }

    pub fn with_adaptor(mut self, adaptor: ResponseAdaptor) -> Self {
        self.adaptor = Some(adaptor);
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_event_builder(mut self, builder: impl EventBuilder + 'static) -> Self {
        self.builder = Arc::new(builder);
        self
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("action", &self.action)
            .field("url", &self.request.url)
            .field("key_by", &self.key_by)
            .field("projection", &self.projection)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// Options passed with one call
#[derive(Debug, Clone, Default)]
pub struct ActionOptions {
    /// URL template values, also used for keying
    pub params: Map<String, Value>,
    /// Explicit key, bypassing derivation
    pub key: Option<ItemKey>,
    /// Request fields that win over the resource's descriptor
    pub request: RequestOverrides,
    /// Overrides the resource's progress flag
    pub progress: Option<bool>,
    /// Values the item had before this request, echoed in the success event
    pub previous_values: Option<Value>,
}

impl ActionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<ItemKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_request(mut self, request: RequestOverrides) -> Self {
        self.request = request;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_previous_values(mut self, values: Value) -> Self {
        self.previous_values = Some(values);
        self
    }
}
