//! Application layer: manifest services and the use cases behind each command
pub mod services;
pub mod use_cases;
