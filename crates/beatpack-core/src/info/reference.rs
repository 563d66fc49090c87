use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::chart::Chart;
use crate::error::Result;
use crate::schema::{DocumentReader, DocumentWriter, Extensions, tables};

/// Standard difficulty names. Packages may also use custom names, which is why
/// `ChartReference::difficulty` stays a string.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
pub enum DifficultyRank {
    Easy,
    Normal,
    Hard,
    Expert,
    #[strum(to_string = "ExpertPlus", serialize = "Expert+")]
    ExpertPlus,
}

/// Entry in a difficulty set pointing at a chart member of the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartReference {
    pub difficulty: String,
    /// Archive member holding the chart (`_beatmapFilename`).
    pub filename: String,
    pub note_jump_movement_speed: f64,
    pub note_jump_start_beat_offset: f64,
    pub extensions: Extensions,
    /// Decoded chart, once loaded.
    pub chart: Option<Chart>,
}

impl ChartReference {
    pub fn new(difficulty: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            difficulty: difficulty.into(),
            filename: filename.into(),
            note_jump_movement_speed: 0.0,
            note_jump_start_beat_offset: 0.0,
            extensions: Extensions::new(),
            chart: None,
        }
    }

    pub fn with_chart(mut self, chart: Chart) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn decode(doc: &Value) -> Result<Self> {
        let r = DocumentReader::new(&tables::CHART_REFERENCE, doc)?;
        Ok(Self {
            difficulty: r.text("difficulty")?,
            filename: r.text("beatmapFilename")?,
            note_jump_movement_speed: r.float("noteJumpMovementSpeed")?,
            note_jump_start_beat_offset: r.float("noteJumpStartBeatOffset")?,
            extensions: r.extensions()?,
            chart: None,
        })
    }

    /// Reference document only; the chart itself is written as its own member.
    pub fn encode(&self) -> Result<Value> {
        let mut w = DocumentWriter::new(&tables::CHART_REFERENCE);
        w.put("difficulty", self.difficulty.as_str())
            .put("beatmapFilename", self.filename.as_str())
            .put_float("noteJumpMovementSpeed", self.note_jump_movement_speed)
            .put_float("noteJumpStartBeatOffset", self.note_jump_start_beat_offset);
        w.finish(&self.extensions)
    }

    pub fn rank(&self) -> Option<DifficultyRank> {
        self.difficulty.parse().ok()
    }

    pub fn is_loaded(&self) -> bool {
        self.chart.is_some()
    }
}
