use crate::domain::value_objects::file_mode::FileMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// マニフェストエントリの対象種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// 通常ファイル
    File,
    /// ディレクトリ
    Directory,
}

impl EntryKind {
    /// 権限が指定されていない場合の既定モード
    pub fn default_mode(&self) -> FileMode {
        match self {
            EntryKind::File => FileMode::DEFAULT_FILE,
            EntryKind::Directory => FileMode::DEFAULT_DIRECTORY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// マニフェストエントリのアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 検証済みのファイルシステム操作
///
/// `instruct.json` の各エントリは検証時にこの型へ変換されるため、
/// 適用処理が生のフィールドを再確認することはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// ファイルを（再）作成して内容と権限を設定
    CreateFile {
        path: PathBuf,
        content: String,
        mode: FileMode,
    },

    /// ディレクトリを（再）作成して権限を設定
    CreateDirectory { path: PathBuf, mode: FileMode },

    /// 既存のパスを削除（存在しなくても成功）
    Delete { path: PathBuf, kind: EntryKind },
}

impl Operation {
    pub fn path(&self) -> &Path {
        match self {
            Operation::CreateFile { path, .. }
            | Operation::CreateDirectory { path, .. }
            | Operation::Delete { path, .. } => path,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Operation::CreateFile { .. } | Operation::CreateDirectory { .. } => Action::Create,
            Operation::Delete { .. } => Action::Delete,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Operation::CreateFile { .. } => EntryKind::File,
            Operation::CreateDirectory { .. } => EntryKind::Directory,
            Operation::Delete { kind, .. } => *kind,
        }
    }

    /// 作成操作で適用されるモード（削除操作ではNone）
    pub fn mode(&self) -> Option<FileMode> {
        match self {
            Operation::CreateFile { mode, .. } | Operation::CreateDirectory { mode, .. } => {
                Some(*mode)
            }
            Operation::Delete { .. } => None,
        }
    }
}

/// 順序付きの操作リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    operations: Vec<Operation>,
}

impl Manifest {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl IntoIterator for Manifest {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}
