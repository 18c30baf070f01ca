//! HTTP client settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Largest accepted upload chunk, 16 MiB
pub const MAX_UPLOAD_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Whole-request timeout in seconds; unset waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Maximum redirects to follow (0-50)
    pub max_redirects: usize,

    /// Bytes per upload progress event
    pub upload_chunk_size: usize,

    /// Honour HTTP(S)_PROXY from the environment
    pub use_env_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("resync/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
            max_redirects: 10,
            upload_chunk_size: 16 * 1024,
            use_env_proxy: true,
        }
    }
}

impl ConfigSection for HttpConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::not_empty(&self.user_agent, "http.user_agent"),
            Validator::header_value(&self.user_agent, "http.user_agent"),
            Validator::in_range(self.max_redirects, 0, 50, "http.max_redirects"),
            Validator::in_range(
                self.upload_chunk_size,
                1,
                MAX_UPLOAD_CHUNK_SIZE,
                "http.upload_chunk_size",
            ),
        ];

        if let Some(timeout) = self.timeout_secs {
            results.push(Validator::in_range(timeout, 1, 3600, "http.timeout_secs"));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        *self = other;
    }

    fn section_name(&self) -> &'static str {
        "http"
    }
}
