use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr, IntoStaticStr};

/// Note color / kind as stored in `_type`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(i32)]
pub enum NoteType {
    #[strum(serialize = "left")]
    Left = 0,
    #[strum(serialize = "right")]
    Right = 1,
    #[strum(serialize = "bomb")]
    Bomb = 3,
}

impl NoteType {
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, Self::Bomb)
    }
}

/// Swing direction as stored in `_cutDirection`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(i32)]
pub enum CutDirection {
    #[strum(serialize = "up")]
    Up = 0,
    #[strum(serialize = "down")]
    Down = 1,
    #[strum(serialize = "left")]
    Left = 2,
    #[strum(serialize = "right")]
    Right = 3,
    #[strum(serialize = "up-left")]
    UpLeft = 4,
    #[strum(serialize = "up-right")]
    UpRight = 5,
    #[strum(serialize = "down-left")]
    DownLeft = 6,
    #[strum(serialize = "down-right")]
    DownRight = 7,
    #[strum(serialize = "any")]
    Any = 8,
}

impl CutDirection {
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}
