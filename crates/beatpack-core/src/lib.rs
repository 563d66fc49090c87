pub mod archive;
pub mod chart;
pub mod config;
pub mod error;
pub mod info;
pub mod package;
pub mod schema;

pub use archive::{Archive, ArchiveWriter};
pub use chart::{
    Chart, CutDirection, Event, GridReport, Note, NoteType, Obstacle, Slider, SliderEnd,
};
pub use config::{DecodeOptions, LoadPolicy, SchemaGeneration};
pub use error::{Error, Result};
pub use info::{ChartReference, DifficultyRank, DifficultySet, PackageMetadata};
pub use package::{Package, decode_package, encode_package, load_chart};
pub use schema::Extensions;
