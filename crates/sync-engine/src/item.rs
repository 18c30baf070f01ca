// crates/sync-engine/src/item.rs
//! Single-item receive path

use crate::context::RequestContext;
use crate::resource::ActionOptions;
use resync_core::{Item, Status, Timestamp};
use serde_json::Value;

/// Builds the item delta for a successful single-item response
pub fn receive_item(
    values: Value,
    context: &RequestContext<'_>,
    options: &ActionOptions,
    synced_at: Timestamp,
) -> Item {
    let item = Item {
        values,
        status: Status::success(synced_at),
        projection: context.projection(),
    };
    context.transforms.apply(item, context, options)
}
