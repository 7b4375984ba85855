//! Domain layer: manifest operations, diff change sets and the value objects they use
pub mod entities;
pub mod value_objects;
