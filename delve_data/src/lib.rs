//! Shared data model for delve worlds and save files.

pub mod defs;
pub mod records;
pub mod validate;

pub use defs::*;
pub use records::{RecordError, format_world, parse_world};
pub use validate::{ValidationError, validate_world};
