pub mod command_runner;

pub use command_runner::{display_command, CommandOutput, CommandRunner, SystemCommandRunner};
