//! Editable data sheets and the series-extraction scan over them.

pub mod extract;
pub mod grid;

pub use extract::*;
pub use grid::*;
