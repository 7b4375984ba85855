use anyhow::Result;
use std::path::PathBuf;

use crate::application::use_cases::export_diff::ExportDiffUseCase;
use crate::infrastructure::git::GitClient;
use crate::presentation::cli::CommandContext;

/// Handler for the diff command
pub struct DiffCommand {
    pub from: String,
    pub to: String,
    pub output: PathBuf,
}

impl DiffCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let display = &ctx.display;
        let git = GitClient::new(&ctx.config.working_dir);
        let use_case = ExportDiffUseCase::new(&git);
        let output_path = ctx.config.resolve_path(&self.output);

        display.info(&format!(
            "Running command: {} > {}",
            display.format_command(&use_case.command_line(&self.from, &self.to)),
            self.output.display()
        ));

        let export = use_case.execute(&self.from, &self.to, &output_path)?;
        if ctx.verbose {
            display.detail(&format!("{} bytes written", export.bytes));
        }
        display.success(&format!(
            "Diff file created successfully: {}",
            self.output.display()
        ));
        Ok(())
    }
}
