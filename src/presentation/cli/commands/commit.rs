use anyhow::Result;

use crate::application::use_cases::create_commit::CreateCommitUseCase;
use crate::application::use_cases::generate_commit_message::GenerateCommitMessageUseCase;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::llm::create_provider;
use crate::presentation::cli::CommandContext;

/// Handler for the commit command
pub struct CommitCommand {
    pub provider: Option<String>,
    pub no_verify: bool,
    pub yes: bool,
}

impl CommitCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let display = &ctx.display;
        let git = GitClient::new(&ctx.config.working_dir);
        let generator = GenerateCommitMessageUseCase::new(&git);

        let Some(pending) = generator.collect_changes()? else {
            display.info("No uncommitted changes found.");
            return Ok(());
        };

        let message = match &self.provider {
            Some(name) => {
                let provider = create_provider(name, &ctx.config)?;
                let spinner =
                    display.create_spinner(&format!("Generating commit message with {}...", name));
                let message = generator.generate(&pending, Some(provider.as_ref()));
                spinner.finish_and_clear();
                message?
            }
            None => generator.generate(&pending, None)?,
        };

        display.message_box("Generated Commit Message", &message.subject, &message.body);

        let use_case = CreateCommitUseCase::new(&git);
        display.info("Changes to be committed:");
        display.command_output(&use_case.status_summary()?);
        println!();

        if !self.yes && !display.confirm("Do you want to create this commit? (y/N)")? {
            display.warning("Commit aborted.");
            return Ok(());
        }

        let output = use_case.execute(&message, self.no_verify)?;
        display.success("Commit created successfully:");
        display.command_output(&output.combined());
        Ok(())
    }
}
