use git2::Repository as Git2Repository;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::common::error::ChronosError;
use crate::common::result::ChronosResult;
use crate::infrastructure::process::command_runner::{
    args, display_command, CommandOutput, CommandRunner, SystemCommandRunner,
};

/// Hash of the empty tree, used as the diff base in repositories without commits
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Git operations for a single working directory
///
/// Mutating operations go through the `git` executable so hooks, signing and
/// credential helpers behave as the user expects. Read-only repository
/// queries use libgit2.
pub struct GitClient {
    working_dir: PathBuf,
    git_executable: String,
    runner: Box<dyn CommandRunner>,
}

impl GitClient {
    /// Client that shells out to the system `git`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let runner = SystemCommandRunner::new().with_environment_variable("LC_ALL", "C");
        Self::with_runner(working_dir, Box::new(runner))
    }

    /// Client with a custom command runner
    pub fn with_runner(working_dir: impl Into<PathBuf>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            working_dir: working_dir.into(),
            git_executable: "git".to_string(),
            runner,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn open_repository(&self) -> ChronosResult<Git2Repository> {
        Git2Repository::discover(&self.working_dir).map_err(|e| {
            ChronosError::git_error_with_source(
                format!("Not a git repository: {}", self.working_dir.display()),
                e,
            )
        })
    }

    /// Whether the working directory is inside a non-bare work tree
    pub fn is_work_tree(&self) -> bool {
        self.open_repository()
            .map(|repo| !repo.is_bare())
            .unwrap_or(false)
    }

    /// Whether HEAD points at a commit
    pub fn has_commits(&self) -> ChronosResult<bool> {
        let repo = self.open_repository()?;
        let has_head = repo.head().is_ok();
        Ok(has_head)
    }

    /// Whether `refs/tags/<tag>` exists
    pub fn tag_exists(&self, tag: &str) -> ChronosResult<bool> {
        let repo = self.open_repository()?;
        let exists = repo.find_reference(&format!("refs/tags/{}", tag)).is_ok();
        Ok(exists)
    }

    /// Run `git <args>` and return the raw output whatever the exit code
    pub fn run(&self, git_args: &[String]) -> ChronosResult<CommandOutput> {
        self.runner
            .run(&self.git_executable, git_args, &self.working_dir)
    }

    /// Run `git <args>` and fail on a non-zero exit code
    pub fn run_checked(&self, git_args: &[String]) -> ChronosResult<CommandOutput> {
        let output = self.run(git_args)?;
        if !output.success {
            let command = display_command(&self.git_executable, git_args);
            let detail = output.combined();
            return Err(ChronosError::command_error(
                if detail.is_empty() {
                    format!("`{}` exited with {}", command, output.exit_code)
                } else {
                    detail
                },
                command,
                Some(output.exit_code),
            ));
        }
        Ok(output)
    }

    /// Untracked files that are not ignored
    pub fn untracked_files(&self) -> ChronosResult<Vec<String>> {
        let output = self.run_checked(&args(["ls-files", "--others", "--exclude-standard", "-z"]))?;
        Ok(output
            .stdout
            .split('\0')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Diff of every uncommitted change, untracked files included
    ///
    /// Untracked files are marked intent-to-add for the duration of the diff
    /// and unmarked afterwards; the rest of the index is left untouched.
    pub fn uncommitted_diff(&self) -> ChronosResult<String> {
        let untracked = self.untracked_files()?;
        if !untracked.is_empty() {
            debug!("Marking {} untracked file(s) intent-to-add", untracked.len());
            let mut add = args(["add", "--intent-to-add", "--"]);
            add.extend(untracked.iter().cloned());
            self.run_checked(&add)?;
        }

        let base = if self.has_commits()? { "HEAD" } else { EMPTY_TREE };
        let diff = self.run_checked(&args(["diff", base]));

        if !untracked.is_empty() {
            let mut reset = args(["reset", "-q", "--"]);
            reset.extend(untracked.iter().cloned());
            match self.run(&reset) {
                Ok(output) if output.success => {}
                Ok(output) => warn!("Failed to unstage intent-to-add files: {}", output.combined()),
                Err(e) => warn!("Failed to unstage intent-to-add files: {}", e),
            }
        }

        Ok(diff?.stdout)
    }

    /// Diff between two revisions
    pub fn diff_between(&self, from: &str, to: &str) -> ChronosResult<String> {
        let output = self.run_checked(&args(["diff", from, to]))?;
        Ok(output.stdout)
    }

    /// `git status --short`
    pub fn status_short(&self) -> ChronosResult<String> {
        let output = self.run_checked(&args(["status", "--short"]))?;
        Ok(output.stdout)
    }

    /// Stage every change, including deletions and new files
    pub fn stage_all(&self) -> ChronosResult<()> {
        self.run_checked(&args(["add", "-A"]))?;
        Ok(())
    }

    /// Create a commit with the given message
    pub fn commit(&self, message: &str, no_verify: bool) -> ChronosResult<CommandOutput> {
        let mut commit = args(["commit", "-m", message]);
        if no_verify {
            commit.push("--no-verify".to_string());
        }
        self.run_checked(&commit)
    }
}
