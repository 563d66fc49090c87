//! Placement checks against the 4x3 note grid.
//!
//! These predicates are advisory: decode never rejects content that fails
//! them. They look only at the entity they are given.

use crate::chart::{Note, NoteType, Obstacle};

/// Number of lanes (`_lineIndex` 0..=3).
pub const LANES: i32 = 4;

/// Number of vertical layers (`_lineLayer` 0..=2).
pub const LAYERS: i32 = 3;

/// Highest `_cutDirection` value (`any`).
pub const MAX_CUT_DIRECTION: i32 = 8;

/// Maximum obstacle width in lanes.
pub const MAX_OBSTACLE_WIDTH: i32 = 4;

pub fn note_is_valid(note: &Note) -> bool {
    let placed = (0..LANES).contains(&note.line_index) && (0..LAYERS).contains(&note.line_layer);

    let typed = match NoteType::from_i32(note.note_type) {
        Some(NoteType::Left | NoteType::Right) => {
            (0..=MAX_CUT_DIRECTION).contains(&note.cut_direction)
        }
        Some(NoteType::Bomb) => true,
        None => false,
    };

    placed && typed && note.time >= 0.0
}

pub fn obstacle_is_valid(obstacle: &Obstacle) -> bool {
    let footprint = obstacle.line_index + obstacle.width;

    (0..LANES).contains(&obstacle.line_index)
        && (1..=MAX_OBSTACLE_WIDTH).contains(&obstacle.width)
        && matches!(obstacle.obstacle_type, 0 | 1)
        && (1..=LANES).contains(&footprint)
        && obstacle.time >= 0.0
        && obstacle.duration >= 0.0
}

/// Indices of entities in a chart that fail their grid predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridReport {
    pub invalid_notes: Vec<usize>,
    pub invalid_obstacles: Vec<usize>,
}

impl GridReport {
    pub fn is_clean(&self) -> bool {
        self.invalid_notes.is_empty() && self.invalid_obstacles.is_empty()
    }
}
