use serde_json::{Map, Value};

/// Data attached to an entity outside its declared schema.
///
/// `custom_data` is the content of the `_customData` object. `unknown` holds
/// every other undeclared top-level field, keyed by its wire key exactly as it
/// appeared in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    pub custom_data: Map<String, Value>,
    pub unknown: Map<String, Value>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.custom_data.is_empty() && self.unknown.is_empty()
    }

    /// Number of keys carried across both maps.
    pub fn len(&self) -> usize {
        self.custom_data.len() + self.unknown.len()
    }

    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.custom_data.get(key)
    }

    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.custom_data.insert(key.into(), value.into());
    }

    /// Undeclared top-level field by wire key.
    pub fn get(&self, wire_key: &str) -> Option<&Value> {
        self.unknown.get(wire_key)
    }

    pub fn insert(&mut self, wire_key: impl Into<String>, value: impl Into<Value>) {
        self.unknown.insert(wire_key.into(), value.into());
    }

    pub fn remove(&mut self, wire_key: &str) -> Option<Value> {
        self.unknown.remove(wire_key)
    }
}
