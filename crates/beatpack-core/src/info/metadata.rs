use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{SchemaGeneration, defaults};
use crate::error::{Error, Result};
use crate::info::{ChartReference, DifficultySet};
use crate::schema::{DocumentReader, DocumentWriter, Extensions, SetLayout, kind_of};

/// Contents of the package's `Info.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageMetadata {
    pub version: String,
    pub song_name: String,
    pub song_sub_name: String,
    pub song_author_name: String,
    pub level_author_name: String,
    pub bpm: f64,
    pub song_time_offset: f64,
    pub shuffle: f64,
    pub shuffle_period: f64,
    pub preview_start_time: f64,
    pub preview_duration: f64,
    pub song_filename: String,
    pub cover_filename: String,
    pub environment_name: String,
    pub sets: Vec<DifficultySet>,
    pub extensions: Extensions,
}

impl PackageMetadata {
    /// Metadata for a new current-generation package with no difficulties.
    pub fn new(song_name: impl Into<String>, bpm: f64) -> Self {
        Self {
            version: defaults::CURRENT_INFO_VERSION.to_string(),
            song_name: song_name.into(),
            song_sub_name: String::new(),
            song_author_name: String::new(),
            level_author_name: String::new(),
            bpm,
            song_time_offset: 0.0,
            shuffle: 0.0,
            shuffle_period: 0.5,
            preview_start_time: 0.0,
            preview_duration: 0.0,
            song_filename: "song.ogg".to_string(),
            cover_filename: "cover.jpg".to_string(),
            environment_name: "DefaultEnvironment".to_string(),
            sets: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn decode(doc: &Value) -> Result<Self> {
        let version = doc
            .get("_version")
            .ok_or(Error::MissingField {
                entity: "PackageMetadata",
                field: "version",
            })?
            .as_str()
            .ok_or_else(|| {
                Error::MalformedDocument("PackageMetadata.version: expected string".to_string())
            })?;
        let table = SchemaGeneration::detect(version)?.table();
        debug!("Decoding metadata v{} ({} layout)", version, table.generation);

        let r = DocumentReader::new(table.metadata, doc)?;
        let raw_sets = r.raw("difficultyBeatmapSets")?;
        let sets = match (table.set_layout, &*raw_sets) {
            (SetLayout::List, Value::Array(items)) => items
                .iter()
                .map(DifficultySet::decode)
                .collect::<Result<Vec<_>>>()?,
            (SetLayout::Keyed, Value::Object(map)) => map
                .iter()
                .map(|(name, set)| DifficultySet::decode_keyed(name, set))
                .collect::<Result<Vec<_>>>()?,
            // An absent field reads as the empty-list default in either layout
            (SetLayout::Keyed, Value::Array(items)) if items.is_empty() => Vec::new(),
            (layout, other) => {
                return Err(Error::MalformedDocument(format!(
                    "PackageMetadata.difficultyBeatmapSets: {:?} layout cannot hold {}",
                    layout,
                    kind_of(other)
                )));
            }
        };

        let metadata = Self {
            version: r.text("version")?,
            song_name: r.text("songName")?,
            song_sub_name: r.text("songSubName")?,
            song_author_name: r.text("songAuthorName")?,
            level_author_name: r.text("levelAuthorName")?,
            bpm: r.float("beatsPerMinute")?,
            song_time_offset: r.float("songTimeOffset")?,
            shuffle: r.float("shuffle")?,
            shuffle_period: r.float("shufflePeriod")?,
            preview_start_time: r.float("previewStartTime")?,
            preview_duration: r.float("previewDuration")?,
            song_filename: r.text("songFilename")?,
            cover_filename: r.text("coverImageFilename")?,
            environment_name: r.text("environmentName")?,
            sets,
            extensions: r.extensions()?,
        };
        metadata.check_unique()?;
        Ok(metadata)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let doc: Value = serde_json::from_slice(bytes).map_err(|e| {
            Error::MalformedDocument(format!("metadata is not valid JSON: {}", e))
        })?;
        Self::decode(&doc)
    }

    /// Encode in the layout named by `version`.
    pub fn encode(&self) -> Result<Value> {
        let table = self.generation()?.table();
        self.check_unique()?;

        let sets = match table.set_layout {
            SetLayout::List => Value::Array(
                self.sets
                    .iter()
                    .map(|set| set.encode(table))
                    .collect::<Result<Vec<_>>>()?,
            ),
            SetLayout::Keyed => {
                let mut keyed = Map::new();
                for set in &self.sets {
                    keyed.insert(set.characteristic.clone(), set.encode(table)?);
                }
                Value::Object(keyed)
            }
        };

        let mut w = DocumentWriter::new(table.metadata);
        w.put("version", self.version.as_str())
            .put("songName", self.song_name.as_str())
            .put("songSubName", self.song_sub_name.as_str())
            .put("songAuthorName", self.song_author_name.as_str())
            .put("levelAuthorName", self.level_author_name.as_str())
            .put_float("beatsPerMinute", self.bpm)
            .put_float("songTimeOffset", self.song_time_offset)
            .put_float("shuffle", self.shuffle)
            .put_float("shufflePeriod", self.shuffle_period)
            .put_float("previewStartTime", self.preview_start_time)
            .put_float("previewDuration", self.preview_duration)
            .put("songFilename", self.song_filename.as_str())
            .put("coverImageFilename", self.cover_filename.as_str())
            .put("environmentName", self.environment_name.as_str())
            .put("difficultyBeatmapSets", sets);
        w.finish(&self.extensions)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.encode()?)?)
    }

    fn check_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for set in &self.sets {
            if !seen.insert(set.characteristic.as_str()) {
                return Err(Error::DuplicateName {
                    kind: "characteristic",
                    name: set.characteristic.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn generation(&self) -> Result<SchemaGeneration> {
        SchemaGeneration::detect(&self.version)
    }

    /// Move a legacy package to the current layout on its next encode.
    /// Returns whether the version changed.
    ///
    /// Keys the current set layout declares are dropped from set extension
    /// data; the characteristic name comes from the legacy map key.
    pub fn upgrade(&mut self) -> Result<bool> {
        if self.generation()? != SchemaGeneration::Legacy {
            return Ok(false);
        }

        let current = SchemaGeneration::Current.table();
        for set in &mut self.sets {
            set.extensions
                .unknown
                .retain(|key, _| !current.set.declares_wire_key(key));
        }
        self.version = defaults::CURRENT_INFO_VERSION.to_string();
        Ok(true)
    }

    pub fn set(&self, characteristic: &str) -> Option<&DifficultySet> {
        self.sets.iter().find(|s| s.characteristic == characteristic)
    }

    pub fn set_mut(&mut self, characteristic: &str) -> Option<&mut DifficultySet> {
        self.sets
            .iter_mut()
            .find(|s| s.characteristic == characteristic)
    }

    /// Append a set, refusing a characteristic already present.
    pub fn insert_set(&mut self, set: DifficultySet) -> Result<()> {
        if self.set(&set.characteristic).is_some() {
            return Err(Error::DuplicateName {
                kind: "characteristic",
                name: set.characteristic,
            });
        }
        self.sets.push(set);
        Ok(())
    }

    pub fn reference(&self, characteristic: &str, difficulty: &str) -> Option<&ChartReference> {
        self.set(characteristic)?.get(difficulty)
    }

    pub fn reference_mut(
        &mut self,
        characteristic: &str,
        difficulty: &str,
    ) -> Option<&mut ChartReference> {
        self.set_mut(characteristic)?.get_mut(difficulty)
    }

    /// Every reference in set order, paired with its set.
    pub fn references(&self) -> impl Iterator<Item = (&DifficultySet, &ChartReference)> {
        self.sets
            .iter()
            .flat_map(|set| set.references.iter().map(move |r| (set, r)))
    }

    pub fn beats_to_seconds(&self, beats: f64) -> f64 {
        beats / self.bpm * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info_doc(version: &str, sets: Value) -> Value {
        json!({
            "_version": version,
            "_songName": "Song",
            "_songSubName": "Sub",
            "_songAuthorName": "Artist",
            "_levelAuthorName": "Mapper",
            "_beatsPerMinute": 120,
            "_songTimeOffset": 0,
            "_shuffle": 0,
            "_shufflePeriod": 0.5,
            "_songFilename": "song.egg",
            "_coverImageFilename": "cover.png",
            "_environmentName": "DefaultEnvironment",
            "_difficultyBeatmapSets": sets
        })
    }

    fn reference_doc(difficulty: &str) -> Value {
        json!({
            "_difficulty": difficulty,
            "_beatmapFilename": format!("{}.dat", difficulty),
            "_noteJumpMovementSpeed": 10,
            "_noteJumpStartBeatOffset": 0
        })
    }

    #[test]
    fn test_decode_current_layout() {
        let doc = info_doc(
            "2.0.0",
            json!([
                {"_beatmapCharacteristicName": "Standard", "_difficultyBeatmaps": [reference_doc("Hard")]},
                {"_beatmapCharacteristicName": "OneSaber", "_difficultyBeatmaps": [reference_doc("Expert")]}
            ]),
        );
        let metadata = PackageMetadata::decode(&doc).unwrap();

        assert_eq!(metadata.bpm, 120.0);
        assert_eq!(metadata.preview_start_time, 0.0);
        assert_eq!(metadata.preview_duration, 0.0);
        assert_eq!(metadata.sets.len(), 2);
        assert_eq!(
            metadata.reference("OneSaber", "Expert").unwrap().filename,
            "Expert.dat"
        );
        assert_eq!(metadata.references().count(), 2);
        assert_eq!(metadata.generation().unwrap(), SchemaGeneration::Current);
    }

    #[test]
    fn test_decode_legacy_layout() {
        let doc = info_doc(
            "1.5.0",
            json!({
                "Standard": {"_difficultyBeatmaps": [reference_doc("Easy"), reference_doc("Hard")]},
                "NoArrows": {"_difficultyBeatmaps": [reference_doc("Easy")]}
            }),
        );
        let metadata = PackageMetadata::decode(&doc).unwrap();

        let names: Vec<&str> = metadata.sets.iter().map(|s| s.characteristic.as_str()).collect();
        assert_eq!(names, ["Standard", "NoArrows"]);
        assert!(metadata.reference("Standard", "Hard").is_some());
        assert_eq!(metadata.generation().unwrap(), SchemaGeneration::Legacy);
    }

    #[test]
    fn test_layout_mismatch_is_malformed() {
        let doc = info_doc("2.0.0", json!({"Standard": {"_difficultyBeatmaps": []}}));
        assert!(matches!(
            PackageMetadata::decode(&doc),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_duplicate_characteristic_rejected() {
        let doc = info_doc(
            "2.0.0",
            json!([
                {"_beatmapCharacteristicName": "Standard"},
                {"_beatmapCharacteristicName": "Standard"}
            ]),
        );
        let err = PackageMetadata::decode(&doc).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateName {
                kind: "characteristic",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_version() {
        let mut doc = info_doc("2.0.0", json!([]));
        doc.as_object_mut().unwrap().remove("_version");
        assert!(matches!(
            PackageMetadata::decode(&doc),
            Err(Error::MissingField {
                field: "version",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_required_song_name() {
        let mut doc = info_doc("2.0.0", json!([]));
        doc.as_object_mut().unwrap().remove("_songName");
        assert!(matches!(
            PackageMetadata::decode(&doc),
            Err(Error::MissingField {
                field: "songName",
                ..
            })
        ));
    }

    #[test]
    fn test_legacy_round_trip_keeps_keyed_layout() {
        let doc = info_doc(
            "1.0.0",
            json!({"Standard": {"_difficultyBeatmaps": [reference_doc("Easy")]}}),
        );
        let metadata = PackageMetadata::decode(&doc).unwrap();
        let encoded = metadata.encode().unwrap();

        assert!(encoded["_difficultyBeatmapSets"].is_object());
        assert_eq!(PackageMetadata::decode(&encoded).unwrap(), metadata);
    }

    #[test]
    fn test_upgrade_switches_layout() {
        let doc = info_doc(
            "1.0.0",
            json!({"Standard": {"_difficultyBeatmaps": [reference_doc("Easy")]}}),
        );
        let mut metadata = PackageMetadata::decode(&doc).unwrap();
        assert!(metadata.upgrade().unwrap());
        assert!(!metadata.upgrade().unwrap());

        let encoded = metadata.encode().unwrap();
        let sets = encoded["_difficultyBeatmapSets"].as_array().unwrap();
        assert_eq!(sets[0]["_beatmapCharacteristicName"], json!("Standard"));

        let decoded = PackageMetadata::decode(&encoded).unwrap();
        assert_eq!(decoded.sets, metadata.sets);
    }

    #[test]
    fn test_upgrade_drops_stray_characteristic_key() {
        let doc = info_doc(
            "1.5.0",
            json!({"Standard": {
                "_beatmapCharacteristicName": "Standard",
                "_difficultyBeatmaps": [reference_doc("Easy")]
            }}),
        );
        let mut metadata = PackageMetadata::decode(&doc).unwrap();
        assert!(metadata.sets[0]
            .extensions
            .get("_beatmapCharacteristicName")
            .is_some());

        assert!(metadata.upgrade().unwrap());
        assert!(metadata.sets[0].extensions.is_empty());

        let encoded = metadata.encode().unwrap();
        let sets = encoded["_difficultyBeatmapSets"].as_array().unwrap();
        assert_eq!(sets[0]["_beatmapCharacteristicName"], json!("Standard"));
    }

    #[test]
    fn test_integral_numbers_keep_their_shape() {
        let doc = info_doc("2.0.0", json!([]));
        let encoded = PackageMetadata::decode(&doc).unwrap().encode().unwrap();
        assert_eq!(encoded["_beatsPerMinute"], doc["_beatsPerMinute"]);
    }

    #[test]
    fn test_insert_set_rejects_duplicates() {
        let mut metadata = PackageMetadata::new("Song", 100.0);
        metadata.insert_set(DifficultySet::new("Standard")).unwrap();
        assert!(metadata.insert_set(DifficultySet::new("Standard")).is_err());
        assert!(metadata.set("Standard").is_some());
    }

    #[test]
    fn test_beats_to_seconds() {
        let metadata = PackageMetadata::new("Song", 150.0);
        assert_eq!(metadata.beats_to_seconds(5.0), 2.0);
    }

    #[test]
    fn test_unknown_fields_survive() {
        let mut doc = info_doc("2.0.0", json!([]));
        let obj = doc.as_object_mut().unwrap();
        obj.insert("_allDirectionsEnvironmentName".into(), json!("GlassDesertEnvironment"));
        obj.insert("_customData".into(), json!({"_contributors": []}));

        let metadata = PackageMetadata::decode(&doc).unwrap();
        let encoded = metadata.encode().unwrap();
        assert_eq!(
            encoded["_allDirectionsEnvironmentName"],
            json!("GlassDesertEnvironment")
        );
        assert_eq!(encoded["_customData"], json!({"_contributors": []}));
    }
}
