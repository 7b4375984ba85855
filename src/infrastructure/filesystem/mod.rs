pub mod config_store;
pub mod manifest_store;
pub mod version_cache;

pub use config_store::{ConfigStore, ConfigStoreError};
pub use manifest_store::{ManifestStore, ManifestStoreError, MANIFEST_FILE_NAME};
pub use version_cache::{VersionCache, VersionCacheStore};
