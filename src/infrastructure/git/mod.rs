pub mod git_client;

// Re-export main types for convenience
pub use git_client::GitClient;
