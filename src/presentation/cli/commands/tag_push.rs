use anyhow::Result;

use crate::application::use_cases::tag_push::{TagPushRequest, TagPushUseCase};
use crate::infrastructure::git::GitClient;
use crate::presentation::cli::CommandContext;

/// Handler for the tag-push command
pub struct TagPushCommand {
    pub version: String,
    pub message: String,
    pub force: bool,
}

impl TagPushCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let display = &ctx.display;
        let git = GitClient::new(&ctx.config.working_dir);
        let use_case = TagPushUseCase::new(&git);
        let request = TagPushRequest {
            version: self.version.clone(),
            message: self.message.clone(),
            force: self.force,
        };

        use_case.execute(&request, |step| {
            display.info(&format!("Running command: {}", display.format_command(&step.command)));
            display.command_output(&step.output.combined());
        })?;

        display.success(&format!(
            "Tag '{}' created and pushed successfully.",
            request.version
        ));
        Ok(())
    }
}
