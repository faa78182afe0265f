//! Input/output helpers.
//!
//! - sheet CSV load/save + schema validation (`sheet`)
//! - chart data exports (`export`)
//! - project JSON read/write (`project`)

pub mod export;
pub mod project;
pub mod sheet;

pub use export::*;
pub use project::*;
pub use sheet::*;
