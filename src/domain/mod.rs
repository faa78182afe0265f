//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - sheet and chart configuration enums (`SheetLayout`, `PaletteKind`, ...)
//! - extracted series points (`SeriesData`)
//! - the editable/saveable project model (`Project`, `ProjectFile`)

pub mod types;

pub use types::*;
