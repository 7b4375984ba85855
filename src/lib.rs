//! # chronos - Developer Toolbox
//!
//! `chronos` bundles a handful of everyday developer chores behind one
//! command-line tool: scripted file-system updates from a JSON manifest,
//! single-file project dumps, commit message generation, and small git
//! release helpers.
//!
//! ## Features
//!
//! - **Declarative file updates**: Validate and apply an `instruct.json` manifest
//! - **Project dumps**: Directory tree plus every text file in one Markdown document
//! - **Commit messages**: Summarize uncommitted changes locally or through an LLM
//! - **Git helpers**: Tag and push a release, export a diff between revisions
//! - **Update notice**: Daily check for a newer chronos release
//!
//! ## Quick Start
//!
//! 1. Describe the changes in `instruct.json`:
//!
//! ```json
//! [
//!   {"path": "src/new.rs", "action": "create", "type": "file", "content": "// new\n"},
//!   {"path": "bin", "action": "create", "type": "directory", "permissions": "0750"},
//!   {"path": "old.txt", "action": "delete", "type": "file"}
//! ]
//! ```
//!
//! 2. Apply it:
//!
//! ```bash
//! chronos update-code
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Manifest operations, diff change sets and value objects
//! - [`application`]: Manifest validation/application and the command use cases
//! - [`infrastructure`]: git, file stores, HTTP and LLM clients
//! - [`presentation`]: CLI interface and terminal output
//! - [`common`]: Configuration and error handling
//!
//! ## Domain Model
//!
//! - [`domain::entities::operation::Operation`]: One validated file-system operation
//! - [`domain::entities::operation::Manifest`]: Ordered list of operations
//! - [`domain::entities::change_set::ChangeSet`]: Files touched by a diff
//! - [`domain::entities::commit_message::CommitMessage`]: Subject and body of a commit
//! - [`domain::value_objects::file_mode::FileMode`]: Unix permission bits
//!
//! ## Error Handling
//!
//! - [`common::error::ChronosError`]: Shared infrastructure error type
//! - [`common::result::ChronosResult`]: Type alias for `Result<T, ChronosError>`
//!
//! Each use case has its own error enum; the CLI converts them with `anyhow`.
//!
//! ## Examples
//!
//! ### Applying a manifest
//!
//! ```rust,no_run
//! use chronos::application::use_cases::apply_manifest::ApplyManifestUseCase;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let use_case = ApplyManifestUseCase::new(".");
//! let report = use_case.execute()?;
//!
//! for outcome in report.failed() {
//!     println!("operation {} failed", outcome.index);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Summarizing a diff
//!
//! ```rust
//! use chronos::domain::entities::change_set::ChangeSet;
//! use chronos::domain::entities::commit_message::CommitMessage;
//!
//! let changes = ChangeSet::from_diff("diff --git a/README.md b/README.md\nnew file mode 100644\n");
//! let message = CommitMessage::summarize(&changes);
//! assert_eq!(message.subject, "Added README.md");
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::ChronosError;
pub use crate::common::result::ChronosResult as Result;
