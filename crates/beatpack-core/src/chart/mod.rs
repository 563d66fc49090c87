//! Chart documents and the entities they contain.
//!
//! - `Chart` - one difficulty's timeline
//! - `Note`, `Slider`, `Obstacle`, `Event` - timeline entities
//! - `NoteType`, `CutDirection` - typed views of raw note fields
//! - `grid` - placement validity predicates

mod beatmap;
mod enums;
mod event;
pub mod grid;
mod note;
mod obstacle;
mod slider;

pub use beatmap::*;
pub use enums::*;
pub use event::*;
pub use grid::GridReport;
pub use note::*;
pub use obstacle::*;
pub use slider::*;
