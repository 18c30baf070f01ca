// crates/network/src/response.rs
//! Transport-agnostic HTTP response

use bytes::Bytes;
use serde_json::Value;

/// Completed HTTP response, as produced by either transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            status_text: String::new(),
            content_type: None,
            body: body.into(),
        }
    }

    /// JSON response with `application/json` content type
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string()).with_content_type("application/json")
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Status below 400
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Content type starts with `application/json`
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.trim_start().starts_with("application/json"))
            .unwrap_or(false)
    }

    /// Body decoded as UTF-8, lossily
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON; an empty body is an error, not `null`
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
