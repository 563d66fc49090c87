use serde_json::Value;

use crate::chart::{CutDirection, NoteType, grid};
use crate::error::Result;
use crate::schema::{DocumentReader, DocumentWriter, Extensions, tables};

/// Direction code shared by all bombs.
pub const BOMB_DIRECTION_CODE: i32 = 19;

/// A single note block or bomb.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Beats from the start of the song.
    pub time: f64,
    pub line_index: i32,
    pub line_layer: i32,
    pub note_type: i32,
    /// -1 when the document has no direction (bombs).
    pub cut_direction: i32,
    pub extensions: Extensions,
}

impl Note {
    pub fn new(
        time: f64,
        line_index: i32,
        line_layer: i32,
        note_type: i32,
        cut_direction: i32,
    ) -> Self {
        Self {
            time,
            line_index,
            line_layer,
            note_type,
            cut_direction,
            extensions: Extensions::new(),
        }
    }

    pub fn decode(doc: &Value) -> Result<Self> {
        let r = DocumentReader::new(&tables::NOTE, doc)?;
        Ok(Self {
            time: r.float("time")?,
            line_index: r.small_int("lineIndex")?,
            line_layer: r.small_int("lineLayer")?,
            note_type: r.small_int("type")?,
            cut_direction: r.small_int("cutDirection")?,
            extensions: r.extensions()?,
        })
    }

    pub fn encode(&self) -> Result<Value> {
        let mut w = DocumentWriter::new(&tables::NOTE);
        w.put_float("time", self.time)
            .put("lineIndex", self.line_index)
            .put("lineLayer", self.line_layer)
            .put("type", self.note_type)
            .put("cutDirection", self.cut_direction);
        w.finish(&self.extensions)
    }

    pub fn kind(&self) -> Option<NoteType> {
        NoteType::from_i32(self.note_type)
    }

    pub fn direction(&self) -> Option<CutDirection> {
        CutDirection::from_i32(self.cut_direction)
    }

    /// Combined color/direction code: bombs are 19, left notes 1-9 and right
    /// notes 10-18. `None` for an unknown type, or a left/right note with no
    /// valid direction.
    pub fn direction_code(&self) -> Option<i32> {
        match self.kind()? {
            NoteType::Bomb => Some(BOMB_DIRECTION_CODE),
            kind => Some(1 + kind as i32 * 9 + self.direction()? as i32),
        }
    }

    pub fn time_seconds(&self, bpm: f64) -> f64 {
        self.time / bpm * 60.0
    }

    pub fn is_valid(&self) -> bool {
        grid::note_is_valid(self)
    }
}
