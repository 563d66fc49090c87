use serde_json::Value;
use tracing::debug;

use crate::chart::{Event, GridReport, Note, Obstacle, Slider};
use crate::config::defaults;
use crate::error::{Error, Result};
use crate::schema::{DocumentReader, DocumentWriter, Extensions, tables};

/// Timeline of one difficulty.
///
/// Sequences keep document order; that order drives rendering, timing is
/// carried on each entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub version: String,
    pub notes: Vec<Note>,
    pub sliders: Vec<Slider>,
    pub obstacles: Vec<Obstacle>,
    pub events: Vec<Event>,
    pub extensions: Extensions,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            version: defaults::CHART_VERSION.to_string(),
            notes: Vec::new(),
            sliders: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            extensions: Extensions::new(),
        }
    }
}

/// Decode every element of a sequence, tagging failures with their position.
fn decode_all<T>(
    items: &[Value],
    field: &str,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            decode(item).map_err(|e| e.at(format!("_{}[{}]", field, i)))
        })
        .collect()
}

fn encode_all<T>(items: &[T], encode: impl Fn(&T) -> Result<Value>) -> Result<Value> {
    items
        .iter()
        .map(encode)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(doc: &Value) -> Result<Self> {
        let r = DocumentReader::new(&tables::CHART, doc)?;

        let chart = Self {
            version: r.text("version")?,
            notes: decode_all(&r.array("notes")?, "notes", Note::decode)?,
            sliders: decode_all(&r.array("sliders")?, "sliders", Slider::decode)?,
            obstacles: decode_all(&r.array("obstacles")?, "obstacles", Obstacle::decode)?,
            events: decode_all(&r.array("events")?, "events", Event::decode)?,
            extensions: r.extensions()?,
        };

        debug!(
            "Decoded chart v{}: {} notes, {} sliders, {} obstacles, {} events",
            chart.version,
            chart.notes.len(),
            chart.sliders.len(),
            chart.obstacles.len(),
            chart.events.len()
        );
        Ok(chart)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let doc: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::MalformedDocument(format!("chart is not valid JSON: {}", e)))?;
        Self::decode(&doc)
    }

    pub fn encode(&self) -> Result<Value> {
        let mut w = DocumentWriter::new(&tables::CHART);
        w.put("version", self.version.as_str())
            .put("notes", encode_all(&self.notes, Note::encode)?)
            .put("sliders", encode_all(&self.sliders, Slider::encode)?)
            .put("obstacles", encode_all(&self.obstacles, Obstacle::encode)?)
            .put("events", encode_all(&self.events, Event::encode)?);
        w.finish(&self.extensions)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.encode()?)?)
    }

    /// Run the grid predicates over every note and obstacle.
    pub fn validate(&self) -> GridReport {
        GridReport {
            invalid_notes: self
                .notes
                .iter()
                .enumerate()
                .filter(|(_, n)| !n.is_valid())
                .map(|(i, _)| i)
                .collect(),
            invalid_obstacles: self
                .obstacles
                .iter()
                .enumerate()
                .filter(|(_, o)| !o.is_valid())
                .map(|(i, _)| i)
                .collect(),
        }
    }
}
