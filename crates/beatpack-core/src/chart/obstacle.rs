use serde_json::Value;

use crate::chart::grid;
use crate::error::Result;
use crate::schema::{DocumentReader, DocumentWriter, Extensions, tables};

/// Wall spanning one or more lanes for `duration` beats.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub time: f64,
    pub line_index: i32,
    pub width: i32,
    /// 0 = full height, 1 = crouch.
    pub obstacle_type: i32,
    pub duration: f64,
    pub extensions: Extensions,
}

impl Obstacle {
    pub fn new(
        time: f64,
        line_index: i32,
        width: i32,
        obstacle_type: i32,
        duration: f64,
    ) -> Self {
        Self {
            time,
            line_index,
            width,
            obstacle_type,
            duration,
            extensions: Extensions::new(),
        }
    }

    pub fn decode(doc: &Value) -> Result<Self> {
        let r = DocumentReader::new(&tables::OBSTACLE, doc)?;
        Ok(Self {
            time: r.float("time")?,
            line_index: r.small_int("lineIndex")?,
            width: r.small_int("width")?,
            obstacle_type: r.small_int("type")?,
            duration: r.float("duration")?,
            extensions: r.extensions()?,
        })
    }

    pub fn encode(&self) -> Result<Value> {
        let mut w = DocumentWriter::new(&tables::OBSTACLE);
        w.put_float("time", self.time)
            .put("lineIndex", self.line_index)
            .put("width", self.width)
            .put("type", self.obstacle_type)
            .put_float("duration", self.duration);
        w.finish(&self.extensions)
    }

    pub fn time_seconds(&self, bpm: f64) -> f64 {
        self.time / bpm * 60.0
    }

    pub fn duration_seconds(&self, bpm: f64) -> f64 {
        self.duration / bpm * 60.0
    }

    pub fn is_valid(&self) -> bool {
        grid::obstacle_is_valid(self)
    }
}
