use serde_json::Value;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::domain::entities::operation::{EntryKind, Manifest, Operation};
use crate::domain::value_objects::file_mode::FileMode;

/// マニフェスト検証のエラー
#[derive(Debug, Error)]
pub enum ManifestValidationError {
    #[error("Top-level JSON value must be an array, found {0}")]
    NotAnArray(&'static str),

    #[error("Invalid instruct.json structure according to FileSystemOps standard.")]
    SchemaViolation(ValidationReport),
}

/// 違反したフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Path,
    Action,
    Type,
    Content,
    Permissions,
}

/// 1レコードにつき最初に失敗したチェック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub index: usize,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self.index;
        match self.kind {
            ViolationKind::Path => write!(f, "Missing or invalid \"path\" at index {}.", index),
            ViolationKind::Action => write!(
                f,
                "Missing or invalid \"action\" at index {}. Allowed actions are \"create\" and \"delete\".",
                index
            ),
            ViolationKind::Type => write!(
                f,
                "Missing or invalid \"type\" at index {}. Allowed types are \"file\" and \"directory\".",
                index
            ),
            ViolationKind::Content => write!(
                f,
                "Missing or invalid \"content\" for \"create\" action of type \"file\" at index {}.",
                index
            ),
            ViolationKind::Permissions => write!(
                f,
                "Invalid \"permissions\" format at index {}. Expected format is a three or four digit octal number.",
                index
            ),
        }
    }
}

/// 全レコードの違反をまとめたレポート
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// 表示用のメッセージ一覧
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

/// `instruct.json` の内容を型付きの `Manifest` に変換する
///
/// すべてのレコードを検査し、違反がひとつでもあれば操作は一切返さない。
#[derive(Debug, Clone, Default)]
pub struct ManifestValidator;

impl ManifestValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, document: &Value) -> Result<Manifest, ManifestValidationError> {
        let records = document
            .as_array()
            .ok_or_else(|| ManifestValidationError::NotAnArray(json_type_name(document)))?;

        let mut operations = Vec::with_capacity(records.len());
        let mut report = ValidationReport::default();

        for (index, record) in records.iter().enumerate() {
            match validate_record(index, record) {
                Ok(operation) => operations.push(operation),
                Err(violation) => report.violations.push(violation),
            }
        }

        if report.is_empty() {
            Ok(Manifest::new(operations))
        } else {
            Err(ManifestValidationError::SchemaViolation(report))
        }
    }
}

fn validate_record(index: usize, record: &Value) -> Result<Operation, Violation> {
    let violation = |kind| Violation { index, kind };

    let path = record
        .get("path")
        .and_then(Value::as_str)
        .filter(|path| !names_working_directory(path))
        .ok_or(violation(ViolationKind::Path))?;

    let is_create = match record.get("action").and_then(Value::as_str) {
        Some("create") => true,
        Some("delete") => false,
        _ => return Err(violation(ViolationKind::Action)),
    };

    let kind = match record.get("type").and_then(Value::as_str) {
        Some("file") => EntryKind::File,
        Some("directory") => EntryKind::Directory,
        _ => return Err(violation(ViolationKind::Type)),
    };

    let content = if is_create && kind == EntryKind::File {
        let content = record
            .get("content")
            .and_then(Value::as_str)
            .ok_or(violation(ViolationKind::Content))?;
        Some(content.to_string())
    } else {
        None
    };

    let mode = match record.get("permissions") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(
            raw.parse::<FileMode>()
                .map_err(|_| violation(ViolationKind::Permissions))?,
        ),
        Some(_) => return Err(violation(ViolationKind::Permissions)),
    };
    let mode = mode.unwrap_or_else(|| kind.default_mode());

    let path = PathBuf::from(path);
    let operation = match (is_create, kind, content) {
        (true, EntryKind::File, Some(content)) => Operation::CreateFile { path, content, mode },
        (true, EntryKind::Directory, _) => Operation::CreateDirectory { path, mode },
        (true, EntryKind::File, None) => return Err(violation(ViolationKind::Content)),
        (false, kind, _) => Operation::Delete { path, kind },
    };
    Ok(operation)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `""`, `.`, `./` and the like resolve to the working directory itself
fn names_working_directory(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|component| component == Component::CurDir)
}
