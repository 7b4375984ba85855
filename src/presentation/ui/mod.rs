pub mod display;

pub use display::{helpers, wrap_text, DisplayHelper};
