/// Presentation layer: command-line parsing, command handlers and terminal output
pub mod cli;
pub mod ui;
