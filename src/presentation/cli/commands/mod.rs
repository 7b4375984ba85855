pub mod commit;
pub mod commit_message;
pub mod diff;
pub mod dump;
pub mod tag_push;
pub mod update_code;

pub use commit::CommitCommand;
pub use commit_message::CommitMessageCommand;
pub use diff::DiffCommand;
pub use dump::DumpCommand;
pub use tag_push::TagPushCommand;
pub use update_code::UpdateCodeCommand;
