use anyhow::Result;

use crate::application::use_cases::dump_directory::{DumpDirectoryUseCase, DumpOptions};
use crate::presentation::cli::CommandContext;

/// Handler for the dump command
pub struct DumpCommand {
    pub exclude: Vec<String>,
    pub extension: String,
}

impl DumpCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let display = &ctx.display;
        let root = &ctx.config.working_dir;
        let use_case = DumpDirectoryUseCase::new(root);
        let options = DumpOptions {
            extension: self.extension.clone(),
            exclude: self.exclude.clone(),
        };

        let output_name = use_case.output_file_name(&options)?;
        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        display.info(&format!(
            "Generating dump for {} as {}",
            display.format_path(&root_name),
            display.format_path(&output_name)
        ));

        let result = use_case.execute(&options)?;

        if ctx.verbose {
            display.detail(&format!(
                "{} file(s) included, {} non-text file(s) skipped",
                result.files_included, result.files_skipped
            ));
        }
        display.success(&format!("Dump created: {}", output_name));
        Ok(())
    }
}
