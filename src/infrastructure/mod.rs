/// Infrastructure layer modules
///
/// Concrete implementations for external system interactions:
/// - Process execution (command runner)
/// - Git operations (git CLI plus libgit2 queries)
/// - File system stores (manifest, config file, version cache)
/// - HTTP clients (LLM providers, release lookup)
pub mod filesystem;
pub mod git;
pub mod http;
pub mod llm;
pub mod process;

// Re-export commonly used types
pub use filesystem::{ConfigStore, ManifestStore, VersionCacheStore};
pub use git::GitClient;
pub use http::{GitHubReleaseClient, ReleaseSource};
pub use llm::{create_provider, CommitMessageProvider, LlmError};
pub use process::{CommandRunner, SystemCommandRunner};
