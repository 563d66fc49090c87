use serde_json::Value;

use crate::error::Result;
use crate::schema::{DocumentReader, DocumentWriter, Extensions, tables};

/// Lighting or BPM-change event. Not placed on the note grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub time: f64,
    pub event_type: i32,
    pub value: i64,
    pub float_value: f64,
    pub extensions: Extensions,
}

impl Event {
    pub fn new(time: f64, event_type: i32, value: i64) -> Self {
        Self {
            time,
            event_type,
            value,
            float_value: 1.0,
            extensions: Extensions::new(),
        }
    }

    pub fn decode(doc: &Value) -> Result<Self> {
        let r = DocumentReader::new(&tables::EVENT, doc)?;
        Ok(Self {
            time: r.float("time")?,
            event_type: r.small_int("type")?,
            value: r.int("value")?,
            float_value: r.float("floatValue")?,
            extensions: r.extensions()?,
        })
    }

    pub fn encode(&self) -> Result<Value> {
        let mut w = DocumentWriter::new(&tables::EVENT);
        w.put_float("time", self.time)
            .put("type", self.event_type)
            .put("value", self.value)
            .put_float("floatValue", self.float_value);
        w.finish(&self.extensions)
    }
}
