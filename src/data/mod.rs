//! Bundled datasets.

pub mod demo;

pub use demo::*;
