use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::common::config::{AppConfig, ConfigFile, CONFIG_FILE_NAME};

/// Configuration store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file read failed: {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing failed in {path}: {source}")]
    YamlParsingFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Loads the optional `.chronos.yml` and resolves the process configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Path of the config file for a working directory
    pub fn config_path<P: AsRef<Path>>(&self, working_dir: P) -> PathBuf {
        working_dir.as_ref().join(CONFIG_FILE_NAME)
    }

    /// Read `.chronos.yml`; a missing file is not an error
    pub fn read_config_file<P: AsRef<Path>>(
        &self,
        working_dir: P,
    ) -> Result<Option<ConfigFile>, ConfigStoreError> {
        let path = self.config_path(working_dir);
        if !path.is_file() {
            debug!("No configuration file at {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigStoreError::ReadFailed {
            path: path.clone(),
            source,
        })?;

        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Some(ConfigFile::default()));
        }

        let file = serde_yaml::from_str(&content)
            .map_err(|source| ConfigStoreError::YamlParsingFailed { path, source })?;
        Ok(Some(file))
    }

    /// Defaults, then the config file, then the process environment
    pub fn load<P: AsRef<Path>>(&self, working_dir: P) -> Result<AppConfig, ConfigStoreError> {
        let working_dir = working_dir.as_ref();
        let file = self.read_config_file(working_dir)?;
        Ok(AppConfig::resolve(working_dir, file, |key| {
            std::env::var(key).ok()
        }))
    }
}
