//! Terminal-friendly text rendering of charts.

pub mod ascii;

pub use ascii::*;
