use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::entities::operation::{Manifest, Operation};
use crate::domain::value_objects::file_mode::FileMode;

/// 単一操作の実行結果
#[derive(Debug)]
pub struct OperationOutcome {
    /// マニフェスト内の位置
    pub index: usize,

    pub operation: Operation,

    /// 作業ディレクトリで解決済みのパス
    pub resolved_path: PathBuf,

    /// 既存のエントリを削除したかどうか
    pub removed_existing: bool,

    /// 失敗した場合のI/Oエラー
    pub error: Option<io::Error>,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// バッチ全体の実行結果
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<OperationOutcome>,
}

impl ApplyReport {
    /// すべての操作が成功したか
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(OperationOutcome::is_success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// 検証済みマニフェストをファイルシステムに適用する
///
/// 操作は順番に実行され、失敗した操作は結果に記録して次へ進む。
/// ロールバックは行わない。
#[derive(Debug, Clone)]
pub struct ManifestApplier {
    working_dir: PathBuf,
}

impl ManifestApplier {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn apply(&self, manifest: &Manifest) -> ApplyReport {
        self.apply_with(manifest, |_| {})
    }

    /// `apply` と同じだが、各操作の完了直後に `on_outcome` を呼ぶ
    pub fn apply_with<F>(&self, manifest: &Manifest, mut on_outcome: F) -> ApplyReport
    where
        F: FnMut(&OperationOutcome),
    {
        let outcomes = manifest
            .operations()
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                let outcome = self.apply_operation(index, operation);
                on_outcome(&outcome);
                outcome
            })
            .collect();
        ApplyReport { outcomes }
    }

    fn apply_operation(&self, index: usize, operation: &Operation) -> OperationOutcome {
        let resolved_path = self.resolve(operation.path());
        let mut removed_existing = false;

        let result = execute(operation, &resolved_path, &mut removed_existing);
        match &result {
            Ok(()) => debug!(
                "Applied {} {} at {}",
                operation.action(),
                operation.kind(),
                resolved_path.display()
            ),
            Err(e) => debug!(
                "Failed {} {} at {}: {}",
                operation.action(),
                operation.kind(),
                resolved_path.display(),
                e
            ),
        }

        OperationOutcome {
            index,
            operation: operation.clone(),
            resolved_path,
            removed_existing,
            error: result.err(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

fn execute(operation: &Operation, path: &Path, removed_existing: &mut bool) -> io::Result<()> {
    *removed_existing = remove_existing(path)?;

    match operation {
        Operation::CreateFile { content, mode, .. } => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            set_mode(path, *mode)
        }
        Operation::CreateDirectory { mode, .. } => {
            fs::create_dir_all(path)?;
            set_mode(path, *mode)
        }
        Operation::Delete { .. } => Ok(()),
    }
}

/// Remove whatever exists at `path` without following symlinks
fn remove_existing(path: &Path) -> io::Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: FileMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: FileMode) -> io::Result<()> {
    Ok(())
}
