pub mod apply_manifest;
pub mod check_for_updates;
pub mod create_commit;
pub mod dump_directory;
pub mod export_diff;
pub mod generate_commit_message;
pub mod tag_push;

pub use apply_manifest::{ApplyManifestError, ApplyManifestUseCase};
pub use check_for_updates::{CheckForUpdatesUseCase, UpdateStatus, VersionCheckError};
pub use create_commit::CreateCommitUseCase;
pub use dump_directory::{DumpDirectoryError, DumpDirectoryUseCase, DumpOptions, DumpResult};
pub use export_diff::{DiffExport, DiffExportError, ExportDiffUseCase};
pub use generate_commit_message::{CommitMessageError, GenerateCommitMessageUseCase, PendingChanges};
pub use tag_push::{TagPushError, TagPushRequest, TagPushStep, TagPushUseCase};
