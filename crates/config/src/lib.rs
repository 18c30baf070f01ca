//! Engine configuration
//!
//! HTTP client settings and the default header layer used when merging request
//! configuration, loaded from a TOML file.
//!
//! - **Sectioned**: each section implements `ConfigSection` for validation and merging
//! - **Graceful degradation**: invalid values are reported as warnings on load
//! - **Atomic writes**: the config file is never left half-written
//!
//! # Example
//!
//! ```rust
//! use resync_config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.headers.accept, "application/json");
//! ```

mod error;
mod header_config;
mod http_config;
mod manager;
mod persistence;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use header_config::HeaderConfig;
pub use http_config::HttpConfig;
pub use manager::ConfigManager;
pub use persistence::ConfigPersistence;
pub use validation::{ConfigSection, ValidationError, Validator};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Config file format version
    pub version: u32,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Lowest layer of request headers
    pub headers: HeaderConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section, collecting all errors
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.http.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.headers.validate() {
            errors.append(&mut e);
        }

        if self.version > CONFIG_VERSION {
            errors.push(ValidationError::with_value(
                "version",
                format!("must be at most {}", CONFIG_VERSION),
                self.version,
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges another config into this one, preferring values from `other`
    pub fn merge(&mut self, other: EngineConfig) {
        self.http.merge(other.http);
        self.headers.merge(other.headers);
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            http: HttpConfig::default(),
            headers: HeaderConfig::default(),
        }
    }
}
