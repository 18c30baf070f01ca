//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{ConfigError, ConfigResult, EngineConfig};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// Environment variables applied by [`ConfigManager::load_with_env_overrides`]
pub const ENV_USER_AGENT: &str = "RESYNC_HTTP_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "RESYNC_HTTP_TIMEOUT_SECS";
pub const ENV_USE_PROXY: &str = "RESYNC_HTTP_USE_ENV_PROXY";

/// Loads, saves and initializes the engine config file
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the platform config directory
    ///
    /// - Linux: `~/.config/resync/`
    /// - macOS: `~/Library/Application Support/resync/`
    /// - Windows: `%APPDATA%\resync\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::with_directory(config_dir))
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> Self {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE));
        Self {
            persistence,
            config_dir,
        }
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "resync")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Path {
        self.persistence.path()
    }

    pub fn load(&self) -> ConfigResult<EngineConfig> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> EngineConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                EngineConfig::default()
            }
        }
    }

    pub fn save(&self, config: &EngineConfig) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, modifies and saves the config
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut EngineConfig),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes the default config if no file exists; returns whether one was created
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::debug!("Config file already exists at {}", self.config_path().display());
            return Ok(false);
        }

        self.save(&EngineConfig::default())?;
        log::info!("Initialized config at {}", self.config_path().display());
        Ok(true)
    }

    /// Overwrites the config file with defaults
    pub fn reset(&self) -> ConfigResult<()> {
        log::info!("Resetting config to defaults");
        self.save(&EngineConfig::default())
    }

    /// Loads the config and applies `RESYNC_HTTP_*` environment overrides
    ///
    /// Unparseable values are ignored with a warning.
    pub fn load_with_env_overrides(&self) -> ConfigResult<EngineConfig> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {:?}",
                errors
            );
        }

        Ok(config)
    }
}

fn apply_env_overrides(config: &mut EngineConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(user_agent) = var(ENV_USER_AGENT) {
        config.http.user_agent = user_agent;
    }

    if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
        match timeout.trim().parse::<u64>() {
            Ok(0) => config.http.timeout_secs = None,
            Ok(secs) => config.http.timeout_secs = Some(secs),
            Err(_) => log::warn!("Ignoring {}={:?}: not a number", ENV_TIMEOUT_SECS, timeout),
        }
    }

    if let Some(use_proxy) = var(ENV_USE_PROXY) {
        match use_proxy.trim().parse::<bool>() {
            Ok(flag) => config.http.use_env_proxy = flag,
            Err(_) => log::warn!("Ignoring {}={:?}: expected true or false", ENV_USE_PROXY, use_proxy),
        }
    }
}
