use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::common::error::ChronosError;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::process::command_runner::{args, display_command};

pub const DEFAULT_FROM: &str = "HEAD~1";
pub const DEFAULT_TO: &str = "HEAD";
pub const DEFAULT_OUTPUT: &str = "project_diff.patch";

/// Errors raised while exporting a diff
#[derive(Debug, Error)]
pub enum DiffExportError {
    #[error("Error creating diff file: {0}")]
    Git(#[from] ChronosError),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffExport {
    pub command: String,
    pub output_path: PathBuf,
    pub bytes: usize,
}

/// Write `git diff <from> <to>` to a patch file
pub struct ExportDiffUseCase<'a> {
    git: &'a GitClient,
}

impl<'a> ExportDiffUseCase<'a> {
    pub fn new(git: &'a GitClient) -> Self {
        Self { git }
    }

    pub fn command_line(&self, from: &str, to: &str) -> String {
        display_command("git", &args(["diff", from, to]))
    }

    pub fn execute(&self, from: &str, to: &str, output_path: &Path) -> Result<DiffExport, DiffExportError> {
        let diff = self.git.diff_between(from, to)?;

        fs::write(output_path, &diff).map_err(|source| DiffExportError::WriteFailed {
            path: output_path.to_path_buf(),
            source,
        })?;

        Ok(DiffExport {
            command: self.command_line(from, to),
            output_path: output_path.to_path_buf(),
            bytes: diff.len(),
        })
    }
}
