use thiserror::Error;
use tracing::debug;

use crate::common::error::ChronosError;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::process::command_runner::{args, display_command};
use crate::infrastructure::process::CommandOutput;

/// Default prefix for the annotation message
pub const DEFAULT_TAG_MESSAGE: &str = "Release version";

/// Errors raised while tagging and pushing
#[derive(Debug, Error)]
pub enum TagPushError {
    #[error("Tag '{0}' already exists. Use --force to overwrite.")]
    TagExists(String),

    #[error("Error running command: {command}")]
    StepFailed { command: String, output: CommandOutput },

    #[error(transparent)]
    Git(#[from] ChronosError),
}

/// What to tag and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPushRequest {
    pub version: String,
    pub message: String,
    pub force: bool,
}

impl TagPushRequest {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            message: DEFAULT_TAG_MESSAGE.to_string(),
            force: false,
        }
    }

    /// Annotation text, e.g. `Release version v1.2.0`
    pub fn annotation(&self) -> String {
        format!("{} {}", self.message, self.version)
    }

    fn tag_args(&self) -> Vec<String> {
        let annotation = self.annotation();
        let mut tag = args(["tag", "-a", self.version.as_str(), "-m", annotation.as_str()]);
        if self.force {
            tag.push("-f".to_string());
        }
        tag
    }

    fn push_args(&self) -> Vec<String> {
        let mut push = args(["push", "origin"]);
        if self.force {
            push.push("--force".to_string());
        }
        push.push(self.version.clone());
        push
    }
}

/// One git invocation and what it printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPushStep {
    pub command: String,
    pub output: CommandOutput,
}

/// Create an annotated tag and push it to `origin`
pub struct TagPushUseCase<'a> {
    git: &'a GitClient,
}

impl<'a> TagPushUseCase<'a> {
    pub fn new(git: &'a GitClient) -> Self {
        Self { git }
    }

    /// The git commands `execute` would run, rendered for display
    pub fn planned_commands(&self, request: &TagPushRequest) -> Vec<String> {
        vec![
            display_command("git", &request.tag_args()),
            display_command("git", &request.push_args()),
        ]
    }

    /// Run the steps in order, reporting each through `on_step`; stops at the first failure
    pub fn execute<F>(
        &self,
        request: &TagPushRequest,
        mut on_step: F,
    ) -> Result<Vec<TagPushStep>, TagPushError>
    where
        F: FnMut(&TagPushStep),
    {
        if !request.force && self.git.tag_exists(&request.version)? {
            return Err(TagPushError::TagExists(request.version.clone()));
        }

        let mut steps = Vec::new();
        for step_args in [request.tag_args(), request.push_args()] {
            let command = display_command("git", &step_args);
            debug!("Tag push step: {}", command);

            let output = self.git.run(&step_args)?;
            let step = TagPushStep { command, output };
            on_step(&step);

            if !step.output.success {
                return Err(TagPushError::StepFailed {
                    command: step.command,
                    output: step.output,
                });
            }
            steps.push(step);
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::command_runner::MockCommandRunner;
    use git2::Repository;
    use mockall::predicate::*;
    use mockall::Sequence;
    use tempfile::TempDir;

    fn repo_with_tag(tag: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let commit_id = repo
            .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
        if let Some(tag) = tag {
            let commit = repo.find_object(commit_id, None).unwrap();
            repo.tag_lightweight(tag, &commit, false).unwrap();
        }
        dir
    }

    #[test]
    fn test_request_arguments() {
        let mut request = TagPushRequest::new("v1.2.0");
        assert_eq!(request.annotation(), "Release version v1.2.0");
        assert_eq!(
            request.tag_args(),
            args(["tag", "-a", "v1.2.0", "-m", "Release version v1.2.0"])
        );
        assert_eq!(request.push_args(), args(["push", "origin", "v1.2.0"]));

        request.force = true;
        request.message = "Hotfix".to_string();
        assert_eq!(
            request.tag_args(),
            args(["tag", "-a", "v1.2.0", "-m", "Hotfix v1.2.0", "-f"])
        );
        assert_eq!(request.push_args(), args(["push", "origin", "--force", "v1.2.0"]));
    }

    #[test]
    fn test_existing_tag_is_refused() {
        let dir = repo_with_tag(Some("v1.0.0"));
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let git = GitClient::with_runner(dir.path(), Box::new(runner));
        let err = TagPushUseCase::new(&git)
            .execute(&TagPushRequest::new("v1.0.0"), |_| {})
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tag 'v1.0.0' already exists. Use --force to overwrite."
        );
    }

    #[test]
    fn test_tags_then_pushes() {
        let dir = repo_with_tag(None);
        let mut seq = Sequence::new();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .with(eq("git"), eq(args(["tag", "-a", "v2.0.0", "-m", "Release version v2.0.0"])), always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(CommandOutput::ok("")));
        runner
            .expect_run()
            .with(eq("git"), eq(args(["push", "origin", "v2.0.0"])), always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(CommandOutput::new(0, "", " * [new tag] v2.0.0 -> v2.0.0\n")));

        let git = GitClient::with_runner(dir.path(), Box::new(runner));
        let mut seen = Vec::new();
        let steps = TagPushUseCase::new(&git)
            .execute(&TagPushRequest::new("v2.0.0"), |step| seen.push(step.command.clone()))
            .unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(
            seen,
            vec![
                "git tag -a v2.0.0 -m 'Release version v2.0.0'",
                "git push origin v2.0.0"
            ]
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        let dir = repo_with_tag(Some("v1.0.0"));
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|_, a, _| a.first().map(String::as_str) == Some("tag"))
            .times(1)
            .returning(|_, _, _| Ok(CommandOutput::new(128, "", "fatal: tag 'v1.0.0' already exists")));
        runner
            .expect_run()
            .withf(|_, a, _| a.first().map(String::as_str) == Some("push"))
            .never();

        let git = GitClient::with_runner(dir.path(), Box::new(runner));
        let mut request = TagPushRequest::new("v1.0.0");
        // forced past the existence check, git itself still fails here
        request.force = true;
        let err = TagPushUseCase::new(&git).execute(&request, |_| {}).unwrap_err();
        match err {
            TagPushError::StepFailed { command, output } => {
                assert!(command.starts_with("git tag"));
                assert_eq!(output.exit_code, 128);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
