// crates/sync-engine/src/builder.rs
//! onSuccess / onError event builders

use crate::collection::CollectionSynchronizer;
use crate::context::RequestContext;
use crate::error::{SyncError, SyncResult};
use crate::item::receive_item;
use crate::key::{collection_key, derive_key};
use crate::resource::ActionOptions;
use crate::signal::signal;
use resync_core::{Collection, Event, ItemKey, SuccessEvent, Timestamp};
use serde_json::{Map, Value};

/// Turns a request's outcome into the terminal event
///
/// `key` decides which item or collection slot the request targets before it
/// is sent, so the fetching event can already carry it.
pub trait EventBuilder: Send + Sync {
    fn key(&self, params: &Map<String, Value>, key_by: &[String]) -> SyncResult<ItemKey>;

    fn on_success(
        &self,
        context: &RequestContext<'_>,
        options: &ActionOptions,
        values: Value,
    ) -> SyncResult<Event>;

    fn on_error(
        &self,
        context: &RequestContext<'_>,
        _options: &ActionOptions,
        http_code: u16,
        error: Value,
    ) -> Event {
        signal(context, http_code, error).into()
    }
}

/// Receives one item; the key comes from the params
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiveItem;

impl EventBuilder for ReceiveItem {
    fn key(&self, params: &Map<String, Value>, key_by: &[String]) -> SyncResult<ItemKey> {
        derive_key(params, &Value::Null, key_by)
    }

    fn on_success(
        &self,
        context: &RequestContext<'_>,
        options: &ActionOptions,
        values: Value,
    ) -> SyncResult<Event> {
        let item = receive_item(values, context, options, Timestamp::now());

        let mut event = SuccessEvent::new(context.action, context.request_id);
        event.key = Some(context.key.clone());
        event.item = Some(item);
        event.previous_values = options.previous_values.clone();
        event.projection = context.projection();
        Ok(event.into())
    }
}

/// Receives a list into the collection slot named by the params
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiveCollection;

impl EventBuilder for ReceiveCollection {
    fn key(&self, params: &Map<String, Value>, _key_by: &[String]) -> SyncResult<ItemKey> {
        Ok(collection_key(params))
    }

    fn on_success(
        &self,
        context: &RequestContext<'_>,
        options: &ActionOptions,
        values: Value,
    ) -> SyncResult<Event> {
        let records = match values {
            Value::Array(records) => records,
            other => {
                return Err(SyncError::InvalidData(format!(
                    "expected an array of records, got {}",
                    json_kind(&other)
                )))
            }
        };

        let synced = CollectionSynchronizer::new(context, options).sync(records)?;

        let mut event = SuccessEvent::new(context.action, context.request_id);
        event.key = Some(context.key.clone());
        event.items = Some(synced.items);
        event.collection = Some(Collection {
            positions: synced.positions,
            status: synced.status,
            projection: context.projection(),
        });
        event.projection = context.projection();
        Ok(event.into())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformPipeline;
    use resync_core::{RequestId, StatusType};
    use serde_json::json;

    fn run<R>(key: &str, f: impl FnOnce(&RequestContext<'_>) -> R) -> R {
        let key = ItemKey::from(key);
        let params = Map::new();
        let key_by = vec!["id".to_string()];
        let transforms = TransformPipeline::new();
        let context = RequestContext {
            action: "USERS",
            request_id: RequestId::new(),
            key: &key,
            params: &params,
            key_by: &key_by,
            projection: None,
            transforms: &transforms,
        };
        f(&context)
    }

    #[test]
    fn test_item_key_from_params() {
        let mut params = Map::new();
        params.insert("id".to_string(), json!(1));
        let key = ReceiveItem.key(&params, &["id".to_string()]).unwrap();
        assert_eq!(key.as_str(), "1");
        assert!(ReceiveItem.key(&Map::new(), &["id".to_string()]).is_err());
    }

    #[test]
    fn test_collection_key_from_params() {
        let key = ReceiveCollection.key(&Map::new(), &["id".to_string()]).unwrap();
        assert_eq!(key.as_str(), "");
    }

    #[test]
    fn test_item_success_event() {
        let options = ActionOptions::new().with_previous_values(json!({ "id": 1, "username": "Al" }));
        let event = run("1", |ctx| {
            ReceiveItem
                .on_success(ctx, &options, json!({ "id": 1, "username": "Bob" }))
                .unwrap()
        });

        let Event::Success(success) = event else {
            panic!("expected success event");
        };
        assert_eq!(success.key, Some(ItemKey::from("1")));
        let item = success.item.expect("item");
        assert_eq!(item.values, json!({ "id": 1, "username": "Bob" }));
        assert_eq!(item.status.status_type(), StatusType::Success);
        assert_eq!(success.previous_values, Some(json!({ "id": 1, "username": "Al" })));
    }

    #[test]
    fn test_collection_success_event() {
        let event = run("", |ctx| {
            ReceiveCollection
                .on_success(ctx, &ActionOptions::default(), json!([{ "id": 1 }, { "id": 2 }]))
                .unwrap()
        });

        let Event::Success(success) = event else {
            panic!("expected success event");
        };
        let collection = success.collection.expect("collection");
        assert_eq!(collection.positions, vec![ItemKey::from("1"), ItemKey::from("2")]);
        assert_eq!(success.items.expect("items").len(), 2);
        assert_eq!(success.key, Some(ItemKey::from("")));
    }

    #[test]
    fn test_collection_rejects_non_array() {
        let err = run("", |ctx| {
            ReceiveCollection
                .on_success(ctx, &ActionOptions::default(), json!({ "id": 1 }))
                .unwrap_err()
        });
        assert!(matches!(err, SyncError::InvalidData(ref msg) if msg.contains("an object")));
    }

    #[test]
    fn test_default_on_error() {
        let event = run("1", |ctx| {
            ReceiveItem.on_error(ctx, &ActionOptions::default(), 0, json!({ "type": "NETWORK_ERROR" }))
        });

        let Event::Error(error) = event else {
            panic!("expected error event");
        };
        assert!(error.is_network_error());
        assert_eq!(error.key, Some(ItemKey::from("1")));
    }
}
