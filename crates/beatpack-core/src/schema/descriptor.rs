use serde_json::Value;

/// Wire prefix carried by every canonical field name.
pub const WIRE_PREFIX: char = '_';

/// Canonical name of the custom-data field present on every entity.
pub const CUSTOM_DATA: &str = "customData";

/// Wire form of a canonical field name (`time` -> `_time`).
pub fn wire_name(field: &str) -> String {
    format!("{}{}", WIRE_PREFIX, field)
}

/// Canonical form of a wire key, or `None` when the key lacks the prefix.
pub fn canonical_name(key: &str) -> Option<&str> {
    key.strip_prefix(WIRE_PREFIX)
}

/// Value used when an optional field is absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Int(i64),
    Float(f64),
    Text(&'static str),
    EmptyList,
    EmptyMap,
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            Self::Int(v) => Value::from(v),
            Self::Float(v) => Value::from(v),
            Self::Text(v) => Value::from(v),
            Self::EmptyList => Value::Array(Vec::new()),
            Self::EmptyMap => Value::Object(Default::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    Required,
    Optional(FieldDefault),
}

/// One declared field: canonical name plus presence rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, default: FieldDefault) -> Self {
        Self {
            name,
            presence: Presence::Optional(default),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_value(&self) -> Option<Value> {
        match self.presence {
            Presence::Required => None,
            Presence::Optional(default) => Some(default.to_value()),
        }
    }
}

/// Ordered field list for one entity kind.
///
/// Decode reads fields by these names and encode emits them in this order, so
/// both directions share one source of truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    pub entity: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether a wire key belongs to a declared field.
    pub fn declares_wire_key(&self, key: &str) -> bool {
        canonical_name(key).is_some_and(|name| self.field(name).is_some())
    }
}
