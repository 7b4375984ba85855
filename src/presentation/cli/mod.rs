pub mod commands;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::check_for_updates::CheckForUpdatesUseCase;
use crate::application::use_cases::export_diff::{DEFAULT_FROM, DEFAULT_OUTPUT, DEFAULT_TO};
use crate::application::use_cases::tag_push::DEFAULT_TAG_MESSAGE;
use crate::common::config::AppConfig;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::http::{GitHubReleaseClient, RELEASES_PAGE_URL};
use crate::presentation::ui::display::{helpers, DisplayHelper};

use commands::{
    commit::CommitCommand, commit_message::CommitMessageCommand, diff::DiffCommand,
    dump::DumpCommand, tag_push::TagPushCommand, update_code::UpdateCodeCommand,
};

/// `--version` text: package version, commit and build date
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CHRONOS_GIT_HASH"),
    " ",
    env!("CHRONOS_BUILD_DATE"),
    ")"
);

/// chronos - Developer toolbox for git housekeeping and file-system scripting
#[derive(Parser, Debug)]
#[command(name = "chronos")]
#[command(about = "Developer toolbox: git tag/commit helpers, directory dumps and declarative file updates")]
#[command(version = VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip the release check
    #[arg(long, global = true)]
    pub no_update_check: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update the file system from instruct.json
    #[command(alias = "gpt:update-code")]
    UpdateCode,

    /// Write the directory structure and text file contents to a single file
    #[command(alias = "gpt:dump")]
    Dump {
        /// Additional paths, files or patterns to exclude (comma-separated)
        #[arg(long, value_name = "PATTERNS")]
        exclude: Vec<String>,

        /// File extension of the output file
        #[arg(long, default_value = "md")]
        extension: String,
    },

    /// Generate a commit message for uncommitted changes
    #[command(alias = "git:commit-message")]
    CommitMessage {
        /// LLM provider to use (defaults to the configured provider)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Generate a commit message and create the commit
    #[command(alias = "git:commit")]
    Commit {
        /// LLM provider to use (a local summary is used when omitted)
        #[arg(long)]
        provider: Option<String>,

        /// Bypass pre-commit and commit-msg hooks
        #[arg(long)]
        no_verify: bool,

        /// Commit without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Create an annotated tag and push it to origin
    #[command(alias = "git:tag-push")]
    TagPush {
        /// The version to tag
        #[arg(id = "tag", value_name = "VERSION")]
        version: String,

        /// The message for the tag
        #[arg(default_value = DEFAULT_TAG_MESSAGE)]
        message: String,

        /// Overwrite an existing tag and force the push
        #[arg(short, long)]
        force: bool,
    },

    /// Write the diff between two revisions to a file
    #[command(alias = "git:diff")]
    Diff {
        /// The starting commit or branch
        #[arg(default_value = DEFAULT_FROM)]
        from: String,

        /// The ending commit or branch
        #[arg(default_value = DEFAULT_TO)]
        to: String,

        /// Output file name
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

/// Everything a command handler needs
pub struct CommandContext {
    pub config: AppConfig,
    pub display: DisplayHelper,
    pub verbose: bool,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn with_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn run(self) -> Result<()> {
        let display = helpers::auto_display(self.cli.no_color);

        match self.handle_command(display) {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn handle_command(&self, display: DisplayHelper) -> Result<()> {
        let working_dir = self.working_dir()?;
        let config = ConfigStore::new().load(&working_dir)?;
        let verbose = self.cli.verbose || config.debug;
        init_logging(verbose, self.cli.no_color);
        debug!("chronos {} built for {}", VERSION, env!("CHRONOS_BUILD_TARGET"));
        debug!("Working directory: {}", working_dir.display());

        if config.check_updates && !self.cli.no_update_check {
            check_for_updates(&display);
        }

        let ctx = CommandContext {
            config,
            display,
            verbose,
        };

        match &self.cli.command {
            Commands::UpdateCode => UpdateCodeCommand.execute(&ctx),
            Commands::Dump { exclude, extension } => DumpCommand {
                exclude: exclude.clone(),
                extension: extension.clone(),
            }
            .execute(&ctx),
            Commands::CommitMessage { provider } => CommitMessageCommand {
                provider: provider.clone(),
            }
            .execute(&ctx),
            Commands::Commit {
                provider,
                no_verify,
                yes,
            } => CommitCommand {
                provider: provider.clone(),
                no_verify: *no_verify,
                yes: *yes,
            }
            .execute(&ctx),
            Commands::TagPush {
                version,
                message,
                force,
            } => TagPushCommand {
                version: version.clone(),
                message: message.clone(),
                force: *force,
            }
            .execute(&ctx),
            Commands::Diff { from, to, output } => DiffCommand {
                from: from.clone(),
                to: to.clone(),
                output: output.clone(),
            }
            .execute(&ctx),
        }
    }

    fn working_dir(&self) -> Result<PathBuf> {
        let dir = match &self.cli.directory {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("Cannot determine the current directory")?,
        };
        dir.canonicalize()
            .with_context(|| format!("Cannot use directory {}", dir.display()))
    }
}

/// stderr subscriber; `RUST_LOG` wins over the verbosity flag
fn init_logging(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}

/// Print the release notice; failures are logged and never stop the command
fn check_for_updates(display: &DisplayHelper) {
    let source = match GitHubReleaseClient::new() {
        Ok(source) => source,
        Err(e) => {
            warn!("Skipping update check: {}", e);
            return;
        }
    };

    let use_case =
        match CheckForUpdatesUseCase::with_default_cache(Box::new(source), env!("CARGO_PKG_VERSION")) {
            Ok(use_case) => use_case,
            Err(e) => {
                warn!("Skipping update check: {}", e);
                return;
            }
        };

    let status = use_case.execute(Utc::now());
    if status.update_available() {
        display.warning(&format!(
            "[UPDATE AVAILABLE] New version {} is available. You are running {}.",
            status.latest, status.current
        ));
        display.detail(&format!("Check out: {}", display.format_url(RELEASES_PAGE_URL)));
    } else {
        display.info(&format!(
            "You are running the latest version ({}).",
            status.current
        ));
    }
}
