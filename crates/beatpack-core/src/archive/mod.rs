//! ZIP container access.
//!
//! - `Archive` - member listing and case-insensitive lookup/reads
//! - `ArchiveWriter` - deterministic construction of a new container

mod locator;
mod writer;

pub use locator::*;
pub use writer::*;
