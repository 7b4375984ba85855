use thiserror::Error;
use tracing::debug;

use crate::common::error::ChronosError;
use crate::domain::entities::change_set::ChangeSet;
use crate::domain::entities::commit_message::CommitMessage;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::llm::{CommitMessageProvider, LlmError};

/// コミットメッセージ生成とコミット作成のエラー
#[derive(Debug, Error)]
pub enum CommitMessageError {
    #[error("Not a git repository.")]
    NotAGitRepository,

    #[error("Error generating commit message: {0}")]
    Provider(#[from] LlmError),

    #[error("Failed to stage changes: {0}")]
    StageFailed(#[source] ChronosError),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] ChronosError),

    #[error(transparent)]
    Git(#[from] ChronosError),
}

/// 未コミットの差分とその分類
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChanges {
    pub diff: String,
    pub changes: ChangeSet,
}

impl PendingChanges {
    pub fn from_diff(diff: String) -> Self {
        let changes = ChangeSet::from_diff(&diff);
        Self { diff, changes }
    }
}

/// 未コミットの変更からコミットメッセージを作る
pub struct GenerateCommitMessageUseCase<'a> {
    git: &'a GitClient,
}

impl<'a> GenerateCommitMessageUseCase<'a> {
    pub fn new(git: &'a GitClient) -> Self {
        Self { git }
    }

    /// 未追跡ファイルを含む差分を収集（変更がなければNone）
    pub fn collect_changes(&self) -> Result<Option<PendingChanges>, CommitMessageError> {
        if !self.git.is_work_tree() {
            return Err(CommitMessageError::NotAGitRepository);
        }

        let diff = self.git.uncommitted_diff()?;
        if diff.trim().is_empty() {
            return Ok(None);
        }

        let pending = PendingChanges::from_diff(diff);
        debug!("{} file(s) changed", pending.changes.file_count());
        Ok(Some(pending))
    }

    /// プロバイダーがあればLLM、なければ差分の要約から生成
    pub fn generate(
        &self,
        pending: &PendingChanges,
        provider: Option<&dyn CommitMessageProvider>,
    ) -> Result<CommitMessage, CommitMessageError> {
        match provider {
            Some(provider) => {
                let text = provider
                    .generate_commit_message(&pending.diff, &pending.changes.change_lines())?;
                Ok(CommitMessage::parse(&text))
            }
            None => Ok(CommitMessage::summarize(&pending.changes)),
        }
    }
}
