// crates/sync-engine/src/transform.rs
//! Transform pipeline applied to freshly built items

use crate::context::RequestContext;
use crate::resource::ActionOptions;
use resync_core::Item;
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(Item, &RequestContext<'_>, &ActionOptions) -> Item + Send + Sync;

/// Pure function from item to item
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Item, &RequestContext<'_>, &ActionOptions) -> Item + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, item: Item, context: &RequestContext<'_>, options: &ActionOptions) -> Item {
        (self.0)(item, context, options)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Ordered transforms, applied left to right
#[derive(Debug, Clone, Default)]
pub struct TransformPipeline(Vec<Transform>);

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transform: Transform) {
        self.0.push(transform);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn apply(&self, item: Item, context: &RequestContext<'_>, options: &ActionOptions) -> Item {
        self.0
            .iter()
            .fold(item, |item, transform| transform.apply(item, context, options))
    }
}

impl FromIterator<Transform> for TransformPipeline {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
