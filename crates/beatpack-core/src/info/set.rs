use std::collections::HashSet;

use serde_json::Value;

use crate::config::SchemaGeneration;
use crate::error::{Error, Result};
use crate::info::ChartReference;
use crate::schema::{DocumentReader, DocumentWriter, Extensions, SchemaTable};

/// Difficulties grouped under one characteristic (e.g. "Standard").
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultySet {
    pub characteristic: String,
    pub references: Vec<ChartReference>,
    pub extensions: Extensions,
}

impl DifficultySet {
    pub fn new(characteristic: impl Into<String>) -> Self {
        Self {
            characteristic: characteristic.into(),
            references: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Decode a set from the list layout, where it names its own characteristic.
    pub fn decode(doc: &Value) -> Result<Self> {
        let table = SchemaGeneration::Current.table();
        let r = DocumentReader::new(table.set, doc)?;
        let characteristic = r.text("beatmapCharacteristicName")?;
        Self::decode_body(characteristic, &r)
    }

    /// Decode a set from the keyed layout, where the characteristic is the key.
    pub fn decode_keyed(characteristic: &str, doc: &Value) -> Result<Self> {
        let table = SchemaGeneration::Legacy.table();
        let r = DocumentReader::new(table.set, doc)?;
        Self::decode_body(characteristic.to_string(), &r)
    }

    fn decode_body(characteristic: String, r: &DocumentReader<'_>) -> Result<Self> {
        let references = r
            .array("difficultyBeatmaps")?
            .iter()
            .map(ChartReference::decode)
            .collect::<Result<Vec<_>>>()?;

        let set = Self {
            characteristic,
            references,
            extensions: r.extensions()?,
        };
        set.check_unique()?;
        Ok(set)
    }

    pub fn encode(&self, table: &SchemaTable) -> Result<Value> {
        self.check_unique()?;

        let references = self
            .references
            .iter()
            .map(ChartReference::encode)
            .collect::<Result<Vec<_>>>()?;

        let mut w = DocumentWriter::new(table.set);
        if table.set.field("beatmapCharacteristicName").is_some() {
            w.put("beatmapCharacteristicName", self.characteristic.as_str());
        }
        w.put("difficultyBeatmaps", references);
        w.finish(&self.extensions)
    }

    fn check_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for reference in &self.references {
            if !seen.insert(reference.difficulty.as_str()) {
                return Err(Error::DuplicateName {
                    kind: "difficulty",
                    name: format!("{}/{}", self.characteristic, reference.difficulty),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, difficulty: &str) -> Option<&ChartReference> {
        self.references.iter().find(|r| r.difficulty == difficulty)
    }

    pub fn get_mut(&mut self, difficulty: &str) -> Option<&mut ChartReference> {
        self.references.iter_mut().find(|r| r.difficulty == difficulty)
    }

    /// Append a difficulty, refusing a name already present in this set.
    pub fn insert(&mut self, reference: ChartReference) -> Result<()> {
        if self.get(&reference.difficulty).is_some() {
            return Err(Error::DuplicateName {
                kind: "difficulty",
                name: format!("{}/{}", self.characteristic, reference.difficulty),
            });
        }
        self.references.push(reference);
        Ok(())
    }

    pub fn remove(&mut self, difficulty: &str) -> Option<ChartReference> {
        let index = self
            .references
            .iter()
            .position(|r| r.difficulty == difficulty)?;
        Some(self.references.remove(index))
    }

    pub fn difficulties(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.difficulty.as_str())
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
