use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::debug;

use crate::common::error::ChronosError;
use crate::common::result::ChronosResult;

/// Result of running an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code of the process (-1 when killed by a signal)
    pub exit_code: i32,

    /// Standard output
    pub stdout: String,

    /// Standard error output
    pub stderr: String,

    /// Whether the command was successful (exit code 0)
    pub success: bool,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: exit_code == 0,
        }
    }

    /// Successful run with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    /// Stdout followed by stderr, trimmed, for display
    pub fn combined(&self) -> String {
        let mut text = self.stdout.trim_end().to_string();
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        text
    }
}

/// Runs external programs and waits for them
///
/// Arguments are passed as a vector, never through a shell.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], working_dir: &Path) -> ChronosResult<CommandOutput>;
}

/// Render a command line for logs and user messages
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|arg| {
        if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('\'') {
            format!("'{}'", arg.replace('\'', "'\\''"))
        } else {
            arg.clone()
        }
    }));
    parts.join(" ")
}

/// `CommandRunner` backed by `std::process::Command`
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    /// Environment variables added to every spawned process
    environment: Vec<(String, String)>,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable for spawned processes
    pub fn with_environment_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.push((key.into(), value.into()));
        self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String], working_dir: &Path) -> ChronosResult<CommandOutput> {
        let command_line = display_command(program, args);
        debug!("Running `{}` in {}", command_line, working_dir.display());

        let start = Instant::now();
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .envs(self.environment.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ChronosError::command_error_with_source(
                    format!("failed to start {}", program),
                    command_line.clone(),
                    None,
                    e,
                )
            })?;

        let result = CommandOutput::new(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        debug!(
            "`{}` exited with {} after {:?}",
            command_line,
            result.exit_code,
            start.elapsed()
        );

        Ok(result)
    }
}

/// Owned argument vector from string literals
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
