//! Codec configuration.
//!
//! This module contains:
//! - Well-known archive member names and default document versions
//! - `SchemaGeneration` detection from `_version` strings
//! - `DecodeOptions` / `LoadPolicy` controlling how charts are loaded

mod version;

pub use version::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Archive member names.
pub mod names {
    /// Conventional name of the metadata document (matched case-insensitively).
    pub const METADATA_MEMBER: &str = "Info.dat";
}

/// Values substituted when a document omits them.
pub mod defaults {
    /// Chart `_version` assumed when a chart document omits it.
    pub const CHART_VERSION: &str = "2.0.0";

    /// Metadata `_version` written by `PackageMetadata::upgrade`.
    pub const CURRENT_INFO_VERSION: &str = "2.0.0";
}

/// When referenced charts are decoded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoadPolicy {
    /// Charts are decoded on demand through `Package::load_chart`.
    #[default]
    Lazy,
    /// Every referenced chart is decoded while the package is decoded.
    Eager,
}

/// Options for `decode_package`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub load: LoadPolicy,
    /// Keep the source archive attached to the package so charts can be
    /// loaded later. Without it only eagerly loaded charts are available.
    pub retain_archive: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            load: LoadPolicy::Lazy,
            retain_archive: true,
        }
    }
}

impl DecodeOptions {
    pub fn eager() -> Self {
        Self {
            load: LoadPolicy::Eager,
            ..Self::default()
        }
    }

    /// Eager loading with the archive released right after decode.
    pub fn detached() -> Self {
        Self {
            load: LoadPolicy::Eager,
            retain_archive: false,
        }
    }
}
