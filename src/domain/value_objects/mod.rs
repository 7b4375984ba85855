pub mod exclude_pattern;
pub mod file_mode;
pub mod release_version;
