use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::error::ChronosError;
use crate::common::result::{ChronosResult, ResultExt};

/// File name of the release cache in the home directory
pub const VERSION_CACHE_FILE_NAME: &str = ".chronos_version_cache.json";

/// How long a cached release lookup stays valid
pub const CACHE_TTL_HOURS: i64 = 24;

/// Last known release and when it was looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCache {
    pub latest_version: String,
    pub last_checked: DateTime<Utc>,
}

impl VersionCache {
    pub fn new(latest_version: impl Into<String>, last_checked: DateTime<Utc>) -> Self {
        Self {
            latest_version: latest_version.into(),
            last_checked,
        }
    }

    /// Whether the entry is younger than the cache TTL at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_checked) < Duration::hours(CACHE_TTL_HOURS)
    }
}

/// JSON file holding a `VersionCache`
#[derive(Debug, Clone)]
pub struct VersionCacheStore {
    path: PathBuf,
}

impl VersionCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.chronos_version_cache.json`
    pub fn default_location() -> ChronosResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ChronosError::config_error("Cannot determine the home directory"))?;
        Ok(Self::new(home.join(VERSION_CACHE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached entry, or `None` when the file does not exist
    pub fn load(&self) -> ChronosResult<Option<VersionCache>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_filesystem_error("Failed to read version cache", Some(self.path.clone()))?;
        let cache: VersionCache = serde_json::from_str(&content)?;
        debug!(
            "Loaded version cache {} (checked {})",
            cache.latest_version, cache.last_checked
        );
        Ok(Some(cache))
    }

    pub fn save(&self, cache: &VersionCache) -> ChronosResult<()> {
        let content = serde_json::to_string_pretty(cache)?;
        fs::write(&self.path, content)
            .with_filesystem_error("Failed to write version cache", Some(self.path.clone()))
    }
}
