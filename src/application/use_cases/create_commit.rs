use tracing::info;

use super::generate_commit_message::CommitMessageError;
use crate::domain::entities::commit_message::CommitMessage;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::process::CommandOutput;

/// すべての変更をステージしてコミットを作成する
pub struct CreateCommitUseCase<'a> {
    git: &'a GitClient,
}

impl<'a> CreateCommitUseCase<'a> {
    pub fn new(git: &'a GitClient) -> Self {
        Self { git }
    }

    /// `git status --short` の出力
    pub fn status_summary(&self) -> Result<String, CommitMessageError> {
        Ok(self.git.status_short()?)
    }

    pub fn execute(
        &self,
        message: &CommitMessage,
        no_verify: bool,
    ) -> Result<CommandOutput, CommitMessageError> {
        self.git
            .stage_all()
            .map_err(CommitMessageError::StageFailed)?;

        let output = self
            .git
            .commit(&message.to_string(), no_verify)
            .map_err(CommitMessageError::CommitFailed)?;

        info!("Created commit: {}", message.subject);
        Ok(output)
    }
}
