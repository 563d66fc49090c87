//! Descriptor-driven access to JSON documents.
//!
//! `DocumentReader` pulls declared fields out of a parsed document, applying
//! descriptor defaults and type checks, and sweeps everything else into
//! `Extensions`. `DocumentWriter` is the inverse: it collects declared fields,
//! lays them out in descriptor order and merges extension data back in.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::{CUSTOM_DATA, Extensions, Schema, wire_name};

/// Short name of a JSON value's type for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// JSON number for a float, as an integer when it has no fractional part.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

pub struct DocumentReader<'a> {
    schema: &'static Schema,
    doc: &'a Map<String, Value>,
}

impl<'a> DocumentReader<'a> {
    pub fn new(schema: &'static Schema, doc: &'a Value) -> Result<Self> {
        let doc = doc.as_object().ok_or_else(|| {
            Error::MalformedDocument(format!(
                "{} must be an object, found {}",
                schema.entity,
                kind_of(doc)
            ))
        })?;
        Ok(Self { schema, doc })
    }

    pub fn entity(&self) -> &'static str {
        self.schema.entity
    }

    /// Field value, the descriptor default when absent, or `MissingField`.
    fn value(&self, field: &'static str) -> Result<Cow<'a, Value>> {
        let spec = self.schema.field(field);
        debug_assert!(
            spec.is_some(),
            "{} does not declare field {}",
            self.schema.entity,
            field
        );

        if let Some(value) = self.doc.get(&wire_name(field)) {
            return Ok(Cow::Borrowed(value));
        }

        spec.and_then(|s| s.default_value())
            .map(Cow::Owned)
            .ok_or(Error::MissingField {
                entity: self.schema.entity,
                field,
            })
    }

    fn type_error(&self, field: &str, expected: &str, found: &Value) -> Error {
        Error::MalformedDocument(format!(
            "{}.{}: expected {}, found {}",
            self.schema.entity,
            field,
            expected,
            kind_of(found)
        ))
    }

    pub fn float(&self, field: &'static str) -> Result<f64> {
        let value = self.value(field)?;
        value
            .as_f64()
            .ok_or_else(|| self.type_error(field, "number", &value))
    }

    /// Integer field. Floats with no fractional part are accepted since some
    /// exporters write every number as a float.
    pub fn int(&self, field: &'static str) -> Result<i64> {
        let value = self.value(field)?;
        if let Some(v) = value.as_i64() {
            return Ok(v);
        }
        match value.as_f64() {
            Some(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 => {
                Ok(v as i64)
            }
            _ => Err(self.type_error(field, "integer", &value)),
        }
    }

    pub fn small_int(&self, field: &'static str) -> Result<i32> {
        let v = self.int(field)?;
        i32::try_from(v).map_err(|_| {
            Error::MalformedDocument(format!(
                "{}.{}: {} is out of range",
                self.schema.entity, field, v
            ))
        })
    }

    pub fn text(&self, field: &'static str) -> Result<String> {
        let value = self.value(field)?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.type_error(field, "string", &value))
    }

    /// Array field; absent optional arrays read as empty.
    pub fn array(&self, field: &'static str) -> Result<Cow<'a, [Value]>> {
        match self.value(field)? {
            Cow::Borrowed(Value::Array(items)) => Ok(Cow::Borrowed(items.as_slice())),
            Cow::Owned(Value::Array(items)) => Ok(Cow::Owned(items)),
            other => Err(self.type_error(field, "array", &other)),
        }
    }

    /// Raw field value for fields whose shape depends on the schema generation.
    pub fn raw(&self, field: &'static str) -> Result<Cow<'a, Value>> {
        self.value(field)
    }

    /// Everything outside the declared fields.
    pub fn extensions(&self) -> Result<Extensions> {
        let mut ext = Extensions::new();

        if self.schema.field(CUSTOM_DATA).is_some() {
            match self.doc.get(&wire_name(CUSTOM_DATA)) {
                None => {}
                Some(Value::Object(map)) => ext.custom_data = map.clone(),
                Some(other) => return Err(self.type_error(CUSTOM_DATA, "object", other)),
            }
        }

        for (key, value) in self.doc {
            if !self.schema.declares_wire_key(key) {
                ext.unknown.insert(key.clone(), value.clone());
            }
        }

        Ok(ext)
    }
}

pub struct DocumentWriter {
    schema: &'static Schema,
    fields: Map<String, Value>,
    error: Option<Error>,
}

impl DocumentWriter {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            fields: Map::new(),
            error: None,
        }
    }

    pub fn put(&mut self, field: &'static str, value: impl Into<Value>) -> &mut Self {
        debug_assert!(
            self.schema.field(field).is_some(),
            "{} does not declare field {}",
            self.schema.entity,
            field
        );
        self.fields.insert(wire_name(field), value.into());
        self
    }

    /// Float field. Integral values are written as JSON integers, so `128`
    /// stays `128` across a round trip. JSON cannot carry NaN or infinities,
    /// so those are reported when the document is finished.
    pub fn put_float(&mut self, field: &'static str, value: f64) -> &mut Self {
        if !value.is_finite() && self.error.is_none() {
            self.error = Some(Error::MalformedDocument(format!(
                "{}.{}: {} cannot be encoded",
                self.schema.entity, field, value
            )));
        }
        self.put(field, number(value))
    }

    /// Lay out declared fields in descriptor order, then `_customData` and
    /// the unknown extension keys.
    pub fn finish(mut self, ext: &Extensions) -> Result<Value> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut out = Map::new();
        for spec in self.schema.fields {
            let key = wire_name(spec.name);
            if spec.name == CUSTOM_DATA {
                if !ext.custom_data.is_empty() {
                    out.insert(key, Value::Object(ext.custom_data.clone()));
                }
                continue;
            }
            if let Some(value) = self.fields.remove(&key) {
                out.insert(key, value);
            } else {
                debug_assert!(
                    !spec.is_required(),
                    "{} encoded without required field {}",
                    self.schema.entity,
                    spec.name
                );
            }
        }

        for (key, value) in &ext.unknown {
            if self.schema.declares_wire_key(key) {
                return Err(Error::ExtensionKeyCollision {
                    entity: self.schema.entity,
                    key: key.clone(),
                });
            }
            out.insert(key.clone(), value.clone());
        }

        Ok(Value::Object(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDefault, FieldSpec};
    use serde_json::json;

    static SAMPLE: Schema = Schema {
        entity: "Sample",
        fields: &[
            FieldSpec::required("time"),
            FieldSpec::required("type"),
            FieldSpec::optional("floatValue", FieldDefault::Float(1.0)),
            FieldSpec::optional("items", FieldDefault::EmptyList),
            FieldSpec::optional(CUSTOM_DATA, FieldDefault::EmptyMap),
        ],
    };

    #[test]
    fn test_reads_declared_fields_and_defaults() {
        let doc = json!({"_time": 1.5, "_type": 2});
        let reader = DocumentReader::new(&SAMPLE, &doc).unwrap();

        assert_eq!(reader.float("time").unwrap(), 1.5);
        assert_eq!(reader.int("type").unwrap(), 2);
        assert_eq!(reader.float("floatValue").unwrap(), 1.0);
        assert!(reader.array("items").unwrap().is_empty());
        assert!(reader.extensions().unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let doc = json!({"_time": 1.5});
        let reader = DocumentReader::new(&SAMPLE, &doc).unwrap();

        let err = reader.int("type").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                entity: "Sample",
                field: "type"
            }
        ));
    }

    #[test]
    fn test_integral_floats_accepted_as_ints() {
        let doc = json!({"_time": 0, "_type": 3.0});
        let reader = DocumentReader::new(&SAMPLE, &doc).unwrap();
        assert_eq!(reader.small_int("type").unwrap(), 3);
        // Ints are fine where floats are expected
        assert_eq!(reader.float("time").unwrap(), 0.0);
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        let doc = json!({"_time": "soon", "_type": 1.5});
        let reader = DocumentReader::new(&SAMPLE, &doc).unwrap();

        assert!(matches!(
            reader.float("time"),
            Err(Error::MalformedDocument(_))
        ));
        assert!(matches!(reader.int("type"), Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_non_object_document() {
        let doc = json!([1, 2]);
        assert!(matches!(
            DocumentReader::new(&SAMPLE, &doc),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_unknown_fields_land_in_extensions() {
        let doc = json!({
            "_time": 1,
            "_type": 0,
            "_customData": {"foo": 1},
            "_extra": true,
            "plain": "x"
        });
        let reader = DocumentReader::new(&SAMPLE, &doc).unwrap();
        let ext = reader.extensions().unwrap();

        assert_eq!(ext.custom("foo"), Some(&json!(1)));
        assert_eq!(ext.get("_extra"), Some(&json!(true)));
        assert_eq!(ext.get("plain"), Some(&json!("x")));
        assert_eq!(ext.get("_customData"), None);
    }

    #[test]
    fn test_custom_data_must_be_object() {
        let doc = json!({"_time": 1, "_type": 0, "_customData": [1]});
        let reader = DocumentReader::new(&SAMPLE, &doc).unwrap();
        assert!(matches!(
            reader.extensions(),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_writer_orders_by_descriptor() {
        let mut ext = Extensions::new();
        ext.insert("_extra", true);
        ext.set_custom("foo", 1);

        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put("type", 1).put_float("time", 2.0);
        let doc = writer.finish(&ext).unwrap();

        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["_time", "_type", "_customData", "_extra"]);
    }

    #[test]
    fn test_writer_omits_empty_custom_data() {
        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put_float("time", 0.0).put("type", 0);
        let doc = writer.finish(&Extensions::new()).unwrap();
        assert!(doc.get("_customData").is_none());
    }

    #[test]
    fn test_writer_rejects_colliding_extension() {
        let mut ext = Extensions::new();
        ext.insert("_time", 9);

        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put_float("time", 0.0).put("type", 0);
        let err = writer.finish(&ext).unwrap_err();
        assert!(matches!(err, Error::ExtensionKeyCollision { key, .. } if key == "_time"));
    }

    #[test]
    fn test_writer_keeps_integral_floats_integral() {
        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put_float("time", 16.0).put("type", 0);
        let doc = writer.finish(&Extensions::new()).unwrap();
        assert_eq!(doc["_time"], json!(16));
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"_time":16,"_type":0}"#);

        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put_float("time", 2.5).put("type", 0);
        let doc = writer.finish(&Extensions::new()).unwrap();
        assert_eq!(doc["_time"], json!(2.5));

        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put_float("time", 1e300).put("type", 0);
        let doc = writer.finish(&Extensions::new()).unwrap();
        assert_eq!(doc["_time"].as_f64(), Some(1e300));
    }

    #[test]
    fn test_writer_rejects_non_finite_floats() {
        let mut writer = DocumentWriter::new(&SAMPLE);
        writer.put_float("time", f64::NAN).put("type", 0);
        assert!(matches!(
            writer.finish(&Extensions::new()),
            Err(Error::MalformedDocument(_))
        ));
    }
}
