//! Chart styling and rendering.
//!
//! `spec` resolves a project into a render-ready description, `style` holds
//! the palette/marker tables, and `render` draws to plotters backends.

pub mod render;
pub mod spec;
pub mod style;

pub use render::*;
pub use spec::*;
pub use style::*;
