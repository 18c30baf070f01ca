//! Reading and writing the config file
//!
//! Saves never leave a half-written file: the TOML goes to a temporary file
//! next to the target, which is then renamed over it. The previous file is
//! copied to `<name>.toml.backup` first.

use crate::{ConfigError, ConfigResult, EngineConfig};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// TOML file holding an [`EngineConfig`]
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.backup")
    }

    /// Loads the config; a missing file gives the defaults
    ///
    /// Out-of-range values are logged and kept so the user can fix them.
    pub fn load(&self) -> ConfigResult<EngineConfig> {
        let Some(text) = self.read()? else {
            log::info!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(EngineConfig::default());
        };

        let config = self.parse(&text)?;
        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("{}: {}", self.config_path.display(), error);
            }
        }

        Ok(config)
    }

    /// Validates and writes the config
    pub fn save(&self, config: &EngineConfig) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::Invalid)?;

        let text = toml::to_string_pretty(config)?;
        self.write_atomic(&text)?;

        log::info!("Saved config to {}", self.config_path.display());
        Ok(())
    }

    fn read(&self) -> ConfigResult<Option<String>> {
        match fs::read_to_string(&self.config_path) {
            Ok(text) if text.trim().is_empty() => Err(ConfigError::Empty {
                path: self.config_path.clone(),
            }),
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: self.config_path.clone(),
                source,
            }),
        }
    }

    fn parse(&self, text: &str) -> ConfigResult<EngineConfig> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })
    }

    fn write_atomic(&self, text: &str) -> ConfigResult<()> {
        let dir = match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        if self.config_path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.config_path, &backup).map_err(|source| ConfigError::Backup {
                path: backup.clone(),
                source,
            })?;
            log::debug!("Backed up previous config to {}", backup.display());
        }

        let write_error = |source| ConfigError::Write {
            path: self.config_path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
        temp.write_all(text.as_bytes()).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(&self.config_path)
            .map_err(|e| write_error(e.error))?;

        Ok(())
    }
}
