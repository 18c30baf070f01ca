// crates/network/src/request.rs
//! Layered request configuration
//!
//! A request is assembled from three layers: engine defaults, the resource's
//! own [`RequestDescriptor`] and the per-call [`RequestOverrides`]. Later layers
//! win field by field; headers merge one level deeper so a call can add or
//! replace a single header without restating the rest.
//!
//! Declared headers are plain strings until [`RequestConfig::build`] checks
//! them, so a malformed header is reported before anything is sent.

use crate::error::NetworkResult;
use crate::headers::Headers;
use crate::normalize::ErrorHandler;
use bytes::Bytes;

pub use reqwest::Method;

/// Whether the transport sends and stores cookies for the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    #[default]
    Omit,
    Include,
}

/// Resource-level request description
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    pub url: String,
    /// Defaults to GET
    pub method: Option<Method>,
    /// Declared headers, in order
    pub headers: Vec<(String, String)>,
    /// Sent as-is; the caller serializes
    pub body: Option<Bytes>,
    pub credentials: Option<bool>,
    /// Takes precedence over `credentials`
    pub cookie: Option<String>,
    pub error_handler: Option<ErrorHandler>,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_credentials(mut self, credentials: bool) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }
}

/// Per-call overrides layered over the resource descriptor
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub credentials: Option<bool>,
    pub cookie: Option<String>,
    pub error_handler: Option<ErrorHandler>,
}

impl RequestOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_credentials(mut self, credentials: bool) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }
}

/// Fully merged request, ready for a transport
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Bytes>,
    pub credentials: CredentialsMode,
    /// Consumed by response normalization, ignored by transports
    pub error_handler: Option<ErrorHandler>,
}

impl PreparedRequest {
    /// Request body length in bytes
    pub fn body_len(&self) -> u64 {
        self.body.as_ref().map(|b| b.len() as u64).unwrap_or(0)
    }
}

/// Builder merging defaults < resource < call into a [`PreparedRequest`]
#[derive(Debug, Clone)]
pub struct RequestConfig<'a> {
    defaults: Headers,
    resource: &'a RequestDescriptor,
    call: Option<&'a RequestOverrides>,
}

impl<'a> RequestConfig<'a> {
    /// Starts from the resource descriptor with JSON header defaults
    pub fn new(resource: &'a RequestDescriptor) -> Self {
        Self {
            defaults: Headers::json_defaults(),
            resource,
            call: None,
        }
    }

    /// Replaces the lowest header layer
    pub fn with_defaults(mut self, defaults: Headers) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_overrides(mut self, overrides: &'a RequestOverrides) -> Self {
        self.call = Some(overrides);
        self
    }

    /// Merges the layers; fails on a malformed header or cookie
    pub fn build(self) -> NetworkResult<PreparedRequest> {
        let resource = self.resource;
        let call = self.call;

        let method = call
            .and_then(|c| c.method.clone())
            .or_else(|| resource.method.clone())
            .unwrap_or(Method::GET);
        let body = call
            .and_then(|c| c.body.clone())
            .or_else(|| resource.body.clone());
        let cookie = call
            .and_then(|c| c.cookie.clone())
            .or_else(|| resource.cookie.clone());
        let credentials = call
            .and_then(|c| c.credentials)
            .or(resource.credentials)
            .unwrap_or(false);
        let error_handler = call
            .and_then(|c| c.error_handler.clone())
            .or_else(|| resource.error_handler.clone());

        let mut headers = self.defaults;
        headers.merge(&declared(&resource.headers)?);
        if let Some(call) = call {
            headers.merge(&declared(&call.headers)?);
        }

        let credentials = match cookie {
            Some(cookie) => {
                headers.insert("Cookie", &cookie)?;
                CredentialsMode::Omit
            }
            None if credentials => CredentialsMode::Include,
            None => CredentialsMode::Omit,
        };

        Ok(PreparedRequest {
            method,
            url: resource.url.clone(),
            headers,
            body,
            credentials,
            error_handler,
        })
    }
}

fn declared(pairs: &[(String, String)]) -> NetworkResult<Headers> {
    Headers::try_from_pairs(pairs.iter().map(|(name, value)| (name, value)))
}
