use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::common::error::ChronosError;
use crate::common::result::ChronosResultExt;
use crate::domain::value_objects::release_version::ReleaseVersion;
use crate::infrastructure::filesystem::version_cache::{VersionCache, VersionCacheStore};
use crate::infrastructure::http::ReleaseSource;

/// バージョン確認のエラー
#[derive(Debug, Error)]
pub enum VersionCheckError {
    #[error("Version cache unavailable: {0}")]
    CacheUnavailable(#[source] ChronosError),
}

/// 確認結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatus {
    pub current: ReleaseVersion,
    pub latest: ReleaseVersion,

    /// キャッシュの値を使ったか
    pub from_cache: bool,
}

impl UpdateStatus {
    pub fn update_available(&self) -> bool {
        self.latest.is_newer_than(&self.current)
    }
}

/// 最新リリースと実行中のバージョンを比較する
///
/// 取得に失敗した場合は実行中のバージョンを最新とみなし、
/// その結果も24時間キャッシュする。
pub struct CheckForUpdatesUseCase {
    source: Box<dyn ReleaseSource>,
    cache: VersionCacheStore,
    current: ReleaseVersion,
}

impl CheckForUpdatesUseCase {
    pub fn new(
        source: Box<dyn ReleaseSource>,
        cache: VersionCacheStore,
        current: impl Into<ReleaseVersion>,
    ) -> Self {
        Self {
            source,
            cache,
            current: current.into(),
        }
    }

    /// `$HOME` 直下のキャッシュを使う
    pub fn with_default_cache(
        source: Box<dyn ReleaseSource>,
        current: impl Into<ReleaseVersion>,
    ) -> Result<Self, VersionCheckError> {
        let cache = VersionCacheStore::default_location().map_err(VersionCheckError::CacheUnavailable)?;
        Ok(Self::new(source, cache, current))
    }

    pub fn execute(&self, now: DateTime<Utc>) -> UpdateStatus {
        let cached = self.cache.load().to_option_logged().flatten();

        if let Some(cache) = cached.filter(|cache| cache.is_fresh(now)) {
            debug!("Using cached version information ({})", cache.latest_version);
            return UpdateStatus {
                current: self.current.clone(),
                latest: ReleaseVersion::new(cache.latest_version),
                from_cache: true,
            };
        }

        let latest = self
            .source
            .latest_version()
            .to_option_logged()
            .map(ReleaseVersion::new)
            .unwrap_or_else(|| self.current.clone());

        if let Err(e) = self.cache.save(&VersionCache::new(latest.as_str(), now)) {
            warn!("Failed to update version cache: {}", e);
        }

        UpdateStatus {
            current: self.current.clone(),
            latest,
            from_cache: false,
        }
    }
}
