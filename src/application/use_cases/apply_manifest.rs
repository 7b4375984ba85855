use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::application::services::manifest_applier::{ApplyReport, ManifestApplier, OperationOutcome};
use crate::application::services::manifest_validator::{
    ManifestValidationError, ManifestValidator, ValidationReport,
};
use crate::domain::entities::operation::Manifest;
use crate::infrastructure::filesystem::manifest_store::{ManifestStore, ManifestStoreError};

/// マニフェスト適用のバッチレベルのエラー（いずれも何も適用されていない）
#[derive(Debug, Error)]
pub enum ApplyManifestError {
    #[error("File instruct.json not found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("An error occurred while reading instruct.json: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Invalid JSON: {0}")]
    MalformedJson(String),

    #[error("Invalid instruct.json structure according to FileSystemOps standard.")]
    SchemaViolation(ValidationReport),
}

impl From<ManifestStoreError> for ApplyManifestError {
    fn from(error: ManifestStoreError) -> Self {
        match error {
            ManifestStoreError::ManifestNotFound(path) => {
                let dir = path.parent().map(Path::to_path_buf).unwrap_or(path);
                Self::ManifestNotFound(dir)
            }
            ManifestStoreError::ReadFailed(e) => Self::ReadFailed(e),
            ManifestStoreError::JsonParsingFailed(e) => Self::MalformedJson(e.to_string()),
        }
    }
}

impl From<ManifestValidationError> for ApplyManifestError {
    fn from(error: ManifestValidationError) -> Self {
        match error {
            ManifestValidationError::NotAnArray(_) => Self::MalformedJson(error.to_string()),
            ManifestValidationError::SchemaViolation(report) => Self::SchemaViolation(report),
        }
    }
}

/// `instruct.json` を読み込み、全件検証してから全件適用する
pub struct ApplyManifestUseCase {
    store: ManifestStore,
    validator: ManifestValidator,
    applier: ManifestApplier,
}

impl ApplyManifestUseCase {
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        let working_dir = working_dir.as_ref();
        Self {
            store: ManifestStore::new(working_dir),
            validator: ManifestValidator::new(),
            applier: ManifestApplier::new(working_dir),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        self.store.manifest_path()
    }

    /// 読み込みと検証のみ（ファイルシステムは変更しない）
    pub fn load(&self) -> Result<Manifest, ApplyManifestError> {
        let document = self.store.read()?;
        let manifest = self.validator.validate(&document)?;
        debug!("Validated {} operation(s)", manifest.len());
        Ok(manifest)
    }

    pub fn execute(&self) -> Result<ApplyReport, ApplyManifestError> {
        self.execute_with(|_| {})
    }

    /// Validate everything, then apply, reporting each operation as it completes
    pub fn execute_with<F>(&self, on_outcome: F) -> Result<ApplyReport, ApplyManifestError>
    where
        F: FnMut(&OperationOutcome),
    {
        let manifest = self.load()?;
        Ok(self.applier.apply_with(&manifest, on_outcome))
    }
}
