use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the operations manifest
pub const MANIFEST_FILE_NAME: &str = "instruct.json";

/// Manifest store related errors
#[derive(Debug, Error)]
pub enum ManifestStoreError {
    #[error("Manifest file not found at path: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Manifest file read failed: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    JsonParsingFailed(#[from] serde_json::Error),
}

/// Reads `instruct.json` from a working directory
///
/// The store only decodes JSON; the schema is checked by the manifest validator.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    manifest_path: PathBuf,
}

impl ManifestStore {
    /// Store for `<working_dir>/instruct.json`
    pub fn new<P: AsRef<Path>>(working_dir: P) -> Self {
        Self::with_path(working_dir.as_ref().join(MANIFEST_FILE_NAME))
    }

    pub fn with_path(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Read and decode the manifest as an untyped JSON document
    pub fn read(&self) -> Result<Value, ManifestStoreError> {
        let content = match fs::read_to_string(&self.manifest_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ManifestStoreError::ManifestNotFound(
                    self.manifest_path.clone(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            "Read {} bytes from {}",
            content.len(),
            self.manifest_path.display()
        );

        Ok(serde_json::from_str(&content)?)
    }
}
