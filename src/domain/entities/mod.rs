pub mod change_set;
pub mod commit_message;
pub mod operation;
