// crates/sync-engine/src/signal.rs
//! Error signaler: one error event shape for network, HTTP and embedded errors

use crate::context::RequestContext;
use resync_core::{ErrorEvent, StatusType};
use serde_json::Value;

/// Builds the terminal error event for a request
///
/// `http_code` is 0 when no HTTP response was received.
pub fn signal(context: &RequestContext<'_>, http_code: u16, error: Value) -> ErrorEvent {
    ErrorEvent {
        action: context.action.to_string(),
        request_id: context.request_id,
        status: StatusType::Error,
        key: Some(context.key.clone()),
        http_code,
        error,
        projection: context.projection(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformPipeline;
    use resync_core::{ItemKey, Projection, RequestId, Status};
    use serde_json::{json, Map};

    #[test]
    fn test_signal() {
        let key = ItemKey::from("1");
        let params = Map::new();
        let projection = Projection::new("full");
        let transforms = TransformPipeline::new();
        let request_id = RequestId::new();
        let context = RequestContext {
            action: "FETCH_USER",
            request_id,
            key: &key,
            params: &params,
            key_by: &[],
            projection: Some(&projection),
            transforms: &transforms,
        };

        let event = signal(&context, 404, json!({ "message": "Not Found" }));

        assert_eq!(event.action, "FETCH_USER");
        assert_eq!(event.request_id, request_id);
        assert_eq!(event.status, StatusType::Error);
        assert_eq!(event.key, Some(key));
        assert_eq!(event.projection, Some(projection));
        assert!(!event.is_network_error());
        assert_eq!(
            event.to_status(),
            Status::failed(404, json!({ "message": "Not Found" }))
        );
    }
}
