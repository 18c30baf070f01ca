// crates/network/src/normalize.rs
//! Response normalization
//!
//! Converts a [`RawResponse`] into a [`NormalizedResponse`]. Which rules apply
//! is fixed by a [`ResponseStrategy`] chosen from the resource's adaptor and
//! the request's error handler.

use crate::error::{BoxError, NetworkError, NetworkResult};
use crate::response::RawResponse;
use futures::future::{self, BoxFuture, FutureExt};
use resync_core::Timestamp;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;

/// `error.type` of failures where no HTTP response was usable
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";

/// `{ values, error }` view of a response
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub values: Value,
    pub error: Option<Value>,
}

impl NormalizedResponse {
    pub fn values(values: Value) -> Self {
        Self {
            values,
            error: None,
        }
    }

    pub fn failed(error: Value) -> Self {
        Self {
            values: Value::Null,
            error: Some(error),
        }
    }

    /// True when `error` is present and truthy
    pub fn has_error(&self) -> bool {
        self.error.as_ref().map(is_truthy).unwrap_or(false)
    }
}

/// JavaScript-style truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

type AdaptFn = dyn Fn(Value, &RawResponse) -> Result<NormalizedResponse, BoxError> + Send + Sync;
type HandleFn = dyn Fn(&RawResponse) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync;

/// Custom success-body adaptor; receives the parsed body and the raw response
#[derive(Clone)]
pub struct ResponseAdaptor(Arc<AdaptFn>);

impl ResponseAdaptor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value, &RawResponse) -> Result<NormalizedResponse, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn adapt(&self, body: Value, response: &RawResponse) -> NetworkResult<NormalizedResponse> {
        (self.0)(body, response).map_err(NetworkError::Adaptor)
    }
}

impl fmt::Debug for ResponseAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseAdaptor(..)")
    }
}

/// Custom handler for responses with status >= 400
///
/// Its output is used verbatim as the event's `error`.
#[derive(Clone)]
pub struct ErrorHandler(Arc<HandleFn>);

impl ErrorHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&RawResponse) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(move |response: &RawResponse| {
            future::ready(f(response)).boxed()
        }))
    }

    /// Handler that needs to await before reporting
    pub fn new_async<F>(f: F) -> Self
    where
        F: Fn(&RawResponse) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub async fn handle(&self, response: &RawResponse) -> NetworkResult<Value> {
        (self.0)(response).await.map_err(NetworkError::ErrorHandler)
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler(..)")
    }
}

/// How a resource turns responses into `{ values, error }`
#[derive(Debug, Clone, Default)]
pub enum ResponseStrategy {
    /// Split `error` out of object bodies; JSON/text error bodies
    #[default]
    Default,
    /// Custom success-body adaptor, default error handling
    Adaptor(ResponseAdaptor),
    /// Default success handling, custom error handler
    ErrorHandler(ErrorHandler),
    /// Both customised
    Custom {
        adaptor: ResponseAdaptor,
        error_handler: ErrorHandler,
    },
}

impl ResponseStrategy {
    pub fn select(adaptor: Option<ResponseAdaptor>, error_handler: Option<ErrorHandler>) -> Self {
        match (adaptor, error_handler) {
            (None, None) => ResponseStrategy::Default,
            (Some(adaptor), None) => ResponseStrategy::Adaptor(adaptor),
            (None, Some(handler)) => ResponseStrategy::ErrorHandler(handler),
            (Some(adaptor), Some(error_handler)) => ResponseStrategy::Custom {
                adaptor,
                error_handler,
            },
        }
    }

    pub fn adaptor(&self) -> Option<&ResponseAdaptor> {
        match self {
            ResponseStrategy::Adaptor(adaptor) | ResponseStrategy::Custom { adaptor, .. } => {
                Some(adaptor)
            }
            _ => None,
        }
    }

    pub fn error_handler(&self) -> Option<&ErrorHandler> {
        match self {
            ResponseStrategy::ErrorHandler(handler)
            | ResponseStrategy::Custom {
                error_handler: handler,
                ..
            } => Some(handler),
            _ => None,
        }
    }

    /// Normalizes a response
    ///
    /// For status >= 400 the result always carries `error`. For lower statuses
    /// `error` is whatever the body (or adaptor) reported; callers must check
    /// [`NormalizedResponse::has_error`] to catch errors embedded in a success.
    pub async fn normalize(&self, response: &RawResponse) -> NetworkResult<NormalizedResponse> {
        if response.is_success() {
            let body = response.json()?;
            return match self.adaptor() {
                Some(adaptor) => adaptor.adapt(body, response),
                None => Ok(split_error(body)),
            };
        }

        let error = match self.error_handler() {
            Some(handler) => handler.handle(response).await?,
            None => default_error(response),
        };
        Ok(NormalizedResponse::failed(error))
    }
}

/// Splits an `error` field out of an object body
fn split_error(body: Value) -> NormalizedResponse {
    match body {
        Value::Object(mut map) => {
            let error = map.remove("error");
            NormalizedResponse {
                values: Value::Object(map),
                error,
            }
        }
        other => NormalizedResponse::values(other),
    }
}

fn default_error(response: &RawResponse) -> Value {
    let parsed = if response.is_json() {
        response.json().ok()
    } else {
        None
    };

    let mut error = match parsed {
        Some(json) => match json.get("error") {
            Some(Value::Object(map)) => map.clone(),
            other => message(other.cloned().unwrap_or(Value::Null)),
        },
        None => {
            if response.is_json() {
                log::debug!("Error body declared JSON but failed to parse; using text");
            }
            message(Value::String(response.text()))
        }
    };

    error.insert("occurredAt".to_string(), Timestamp::now().into());
    Value::Object(error)
}

fn message(value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("message".to_string(), value);
    map
}

/// Error value for a request that never produced a usable response
pub fn network_error(message: impl Into<String>) -> Value {
    json!({
        "type": NETWORK_ERROR,
        "message": message.into(),
        "occurredAt": Timestamp::now().as_millis(),
    })
}
