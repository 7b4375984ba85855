use anyhow::Result;

use crate::application::use_cases::generate_commit_message::GenerateCommitMessageUseCase;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::llm::create_provider;
use crate::presentation::cli::CommandContext;

/// Handler for the commit-message command
pub struct CommitMessageCommand {
    pub provider: Option<String>,
}

impl CommitMessageCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let display = &ctx.display;
        let git = GitClient::new(&ctx.config.working_dir);
        let use_case = GenerateCommitMessageUseCase::new(&git);

        let Some(pending) = use_case.collect_changes()? else {
            display.info("No uncommitted changes found.");
            return Ok(());
        };

        let name = self
            .provider
            .as_deref()
            .unwrap_or(&ctx.config.default_provider);
        let provider = create_provider(name, &ctx.config)?;

        let spinner = display.create_spinner(&format!("Generating commit message with {}...", name));
        let message = use_case.generate(&pending, Some(provider.as_ref()));
        spinner.finish_and_clear();
        let message = message?;

        display.message_box("Generated Commit Message", &message.subject, &message.body);
        Ok(())
    }
}
