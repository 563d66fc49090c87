//! Package metadata (`Info.dat`) and the difficulty sets it declares.

mod metadata;
mod reference;
mod set;

pub use metadata::*;
pub use reference::*;
pub use set::*;
