use anyhow::{bail, Result};

use crate::application::services::manifest_applier::OperationOutcome;
use crate::application::use_cases::apply_manifest::{ApplyManifestError, ApplyManifestUseCase};
use crate::domain::entities::operation::Operation;
use crate::presentation::cli::CommandContext;
use crate::presentation::ui::DisplayHelper;

/// Handler for the update-code command
pub struct UpdateCodeCommand;

impl UpdateCodeCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let display = &ctx.display;
        display.section_header("Update File System based on instruct.json");

        let use_case = ApplyManifestUseCase::new(&ctx.config.working_dir);
        let report = match use_case.execute_with(|outcome| print_outcome(display, outcome)) {
            Ok(report) => report,
            Err(ApplyManifestError::SchemaViolation(report)) => {
                for message in report.messages() {
                    display.error(&message);
                }
                return Err(ApplyManifestError::SchemaViolation(report).into());
            }
            Err(e) => return Err(e.into()),
        };

        if !report.is_success() {
            bail!(
                "{} of {} operation(s) failed",
                report.failed_count(),
                report.outcomes.len()
            );
        }

        display.success("File system updated successfully.");
        Ok(())
    }
}

fn print_outcome(display: &DisplayHelper, outcome: &OperationOutcome) {
    let operation = &outcome.operation;
    let path = operation.path().display();

    if outcome.removed_existing {
        display.warning(&format!(
            "Removing existing {} at path {}.",
            operation.kind(),
            path
        ));
    }

    if let Some(error) = &outcome.error {
        display.error(&format!(
            "An error occurred during {} operation at index {}: {}",
            operation.action(),
            outcome.index,
            error
        ));
        return;
    }

    match operation {
        Operation::CreateFile { mode, .. } => {
            display.success(&format!("Created file: {} with permissions {}", path, mode))
        }
        Operation::CreateDirectory { mode, .. } => display.success(&format!(
            "Created directory: {} with permissions {}",
            path, mode
        )),
        Operation::Delete { kind, .. } => display.success(&format!("Deleted {}: {}", kind, path)),
    }
}
