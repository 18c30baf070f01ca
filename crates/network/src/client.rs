// crates/network/src/client.rs
//! HTTP client wrapper shared by both transports

use crate::error::{NetworkError, NetworkResult, TransportError};
use crate::request::{CredentialsMode, PreparedRequest};
use crate::response::RawResponse;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use std::time::Duration;

/// Chunk size used to report upload progress
pub const DEFAULT_UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout; `None` waits for the server indefinitely
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Bytes per upload progress event
    pub upload_chunk_size: usize,
    /// Honour HTTP(S)_PROXY from the environment
    pub use_env_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("resync/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
            use_env_proxy: true,
        }
    }
}

/// Pair of reqwest clients: one without cookies, one with a cookie store
///
/// The cookie-store client serves requests whose credentials mode is `Include`.
#[derive(Clone)]
pub struct HttpClient {
    plain: ReqwestClient,
    with_credentials: ReqwestClient,
    config: ClientConfig,
}

impl HttpClient {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let plain = Self::builder(&config).build().map_err(NetworkError::Http)?;
        let with_credentials = Self::builder(&config)
            .cookie_store(true)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            plain,
            with_credentials,
            config,
        })
    }

    fn builder(config: &ClientConfig) -> reqwest::ClientBuilder {
        let mut builder = ReqwestClient::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        builder
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a reqwest request with method, URL and headers applied
    ///
    /// The body is left to the caller since the transports wrap it differently.
    pub fn request(&self, request: &PreparedRequest) -> RequestBuilder {
        let client = match request.credentials {
            CredentialsMode::Include => &self.with_credentials,
            CredentialsMode::Omit => &self.plain,
        };

        client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.as_map().clone())
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Captures status line and content type of a reqwest response
pub(crate) fn response_head(response: &Response) -> RawResponse {
    let status = response.status();
    let mut head = RawResponse::new(status.as_u16(), bytes::Bytes::new())
        .with_status_text(status.canonical_reason().unwrap_or(""));

    if let Some(content_type) = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        head = head.with_content_type(content_type);
    }

    head
}

/// Reads a reqwest response fully
pub(crate) async fn collect_response(response: Response) -> Result<RawResponse, TransportError> {
    let mut raw = response_head(&response);
    raw.body = response.bytes().await?;
    Ok(raw)
}
