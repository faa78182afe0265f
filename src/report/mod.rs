//! Formatted summaries for headless render and inspect runs.

pub mod format;

pub use format::*;
