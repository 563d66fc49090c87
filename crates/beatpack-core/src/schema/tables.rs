//! Field descriptors for every entity, grouped per schema generation.
//!
//! Chart-level entities are shared between generations. Only the metadata
//! side differs: legacy sets are keyed by characteristic name instead of
//! carrying `_beatmapCharacteristicName`.

use crate::config::{SchemaGeneration, defaults};
use crate::schema::descriptor::{CUSTOM_DATA, FieldDefault, FieldSpec, Schema};

const fn custom() -> FieldSpec {
    FieldSpec::optional(CUSTOM_DATA, FieldDefault::EmptyMap)
}

pub static NOTE: Schema = Schema {
    entity: "Note",
    fields: &[
        FieldSpec::required("time"),
        FieldSpec::required("lineIndex"),
        FieldSpec::required("lineLayer"),
        FieldSpec::required("type"),
        FieldSpec::optional("cutDirection", FieldDefault::Int(-1)),
        custom(),
    ],
};

pub static SLIDER: Schema = Schema {
    entity: "Slider",
    fields: &[
        FieldSpec::required("colorType"),
        FieldSpec::required("headTime"),
        FieldSpec::required("headLineIndex"),
        FieldSpec::required("headLineLayer"),
        FieldSpec::required("headControlPointLengthMultiplier"),
        FieldSpec::required("headCutDirection"),
        FieldSpec::required("tailTime"),
        FieldSpec::required("tailLineIndex"),
        FieldSpec::required("tailLineLayer"),
        FieldSpec::required("tailControlPointLengthMultiplier"),
        FieldSpec::required("tailCutDirection"),
        FieldSpec::required("sliderMidAnchorMode"),
        custom(),
    ],
};

pub static OBSTACLE: Schema = Schema {
    entity: "Obstacle",
    fields: &[
        FieldSpec::required("time"),
        FieldSpec::required("lineIndex"),
        FieldSpec::required("width"),
        FieldSpec::required("type"),
        FieldSpec::required("duration"),
        custom(),
    ],
};

pub static EVENT: Schema = Schema {
    entity: "Event",
    fields: &[
        FieldSpec::required("time"),
        FieldSpec::required("type"),
        FieldSpec::required("value"),
        FieldSpec::optional("floatValue", FieldDefault::Float(1.0)),
        custom(),
    ],
};

pub static CHART: Schema = Schema {
    entity: "Chart",
    fields: &[
        FieldSpec::optional("version", FieldDefault::Text(defaults::CHART_VERSION)),
        FieldSpec::optional("notes", FieldDefault::EmptyList),
        FieldSpec::optional("sliders", FieldDefault::EmptyList),
        FieldSpec::optional("obstacles", FieldDefault::EmptyList),
        FieldSpec::optional("events", FieldDefault::EmptyList),
        custom(),
    ],
};

pub static CHART_REFERENCE: Schema = Schema {
    entity: "ChartReference",
    fields: &[
        FieldSpec::required("difficulty"),
        FieldSpec::required("beatmapFilename"),
        FieldSpec::required("noteJumpMovementSpeed"),
        FieldSpec::required("noteJumpStartBeatOffset"),
        custom(),
    ],
};

pub static DIFFICULTY_SET: Schema = Schema {
    entity: "DifficultySet",
    fields: &[
        FieldSpec::required("beatmapCharacteristicName"),
        FieldSpec::optional("difficultyBeatmaps", FieldDefault::EmptyList),
        custom(),
    ],
};

/// Legacy sets take their characteristic from the enclosing object's key.
pub static LEGACY_DIFFICULTY_SET: Schema = Schema {
    entity: "DifficultySet",
    fields: &[
        FieldSpec::optional("difficultyBeatmaps", FieldDefault::EmptyList),
        custom(),
    ],
};

const METADATA_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("version"),
    FieldSpec::required("songName"),
    FieldSpec::required("songSubName"),
    FieldSpec::required("songAuthorName"),
    FieldSpec::required("levelAuthorName"),
    FieldSpec::required("beatsPerMinute"),
    FieldSpec::required("songTimeOffset"),
    FieldSpec::required("shuffle"),
    FieldSpec::required("shufflePeriod"),
    FieldSpec::optional("previewStartTime", FieldDefault::Float(0.0)),
    FieldSpec::optional("previewDuration", FieldDefault::Float(0.0)),
    FieldSpec::required("songFilename"),
    FieldSpec::required("coverImageFilename"),
    FieldSpec::required("environmentName"),
    FieldSpec::optional("difficultyBeatmapSets", FieldDefault::EmptyList),
    custom(),
];

pub static METADATA: Schema = Schema {
    entity: "PackageMetadata",
    fields: METADATA_FIELDS,
};

/// How `_difficultyBeatmapSets` is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetLayout {
    /// Ordered list of set documents.
    List,
    /// Object keyed by characteristic name.
    Keyed,
}

/// Descriptors used for one schema generation.
#[derive(Debug)]
pub struct SchemaTable {
    pub generation: SchemaGeneration,
    pub metadata: &'static Schema,
    pub set: &'static Schema,
    pub reference: &'static Schema,
    pub set_layout: SetLayout,
}

pub static CURRENT: SchemaTable = SchemaTable {
    generation: SchemaGeneration::Current,
    metadata: &METADATA,
    set: &DIFFICULTY_SET,
    reference: &CHART_REFERENCE,
    set_layout: SetLayout::List,
};

pub static LEGACY: SchemaTable = SchemaTable {
    generation: SchemaGeneration::Legacy,
    metadata: &METADATA,
    set: &LEGACY_DIFFICULTY_SET,
    reference: &CHART_REFERENCE,
    set_layout: SetLayout::Keyed,
};

impl SchemaGeneration {
    pub fn table(self) -> &'static SchemaTable {
        match self {
            Self::Current => &CURRENT,
            Self::Legacy => &LEGACY,
        }
    }
}
