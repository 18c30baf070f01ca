// crates/sync-engine/src/collection.rs
//! Collection synchronizer: raw records to keyed items plus ordered positions

use crate::context::RequestContext;
use crate::error::SyncResult;
use crate::key::derive_key;
use crate::resource::ActionOptions;
use resync_core::{Item, ItemKey, Status, Timestamp};
use serde_json::Value;
use std::collections::HashMap;

/// Result of synchronizing one batch
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedCollection {
    pub items: HashMap<ItemKey, Item>,
    /// Server order, duplicates kept
    pub positions: Vec<ItemKey>,
    pub status: Status,
}

/// Builds item deltas for a successful list response
pub struct CollectionSynchronizer<'a> {
    context: &'a RequestContext<'a>,
    options: &'a ActionOptions,
}

impl<'a> CollectionSynchronizer<'a> {
    pub fn new(context: &'a RequestContext<'a>, options: &'a ActionOptions) -> Self {
        Self { context, options }
    }

    /// Synchronizes a batch stamped with the current time
    pub fn sync(&self, records: Vec<Value>) -> SyncResult<SyncedCollection> {
        self.sync_at(records, Timestamp::now())
    }

    /// Synchronizes a batch; every item and the collection share `synced_at`
    ///
    /// A later record with an already-seen key replaces the earlier item, but
    /// both occurrences stay in `positions`.
    pub fn sync_at(&self, records: Vec<Value>, synced_at: Timestamp) -> SyncResult<SyncedCollection> {
        let mut items = HashMap::with_capacity(records.len());
        let mut positions = Vec::with_capacity(records.len());

        for values in records {
            let key = derive_key(self.context.params, &values, self.context.key_by)?;

            let item = Item {
                values,
                status: Status::success(synced_at),
                projection: self.context.projection(),
            };
            let item = self.context.transforms.apply(item, self.context, self.options);

            positions.push(key.clone());
            items.insert(key, item);
        }

        log::debug!(
            "Synchronized {} records into {} items",
            positions.len(),
            items.len()
        );

        Ok(SyncedCollection {
            items,
            positions,
            status: Status::success(synced_at),
        })
    }
}
