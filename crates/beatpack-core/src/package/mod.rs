//! Whole-package decode and encode.
//!
//! - `Package` - metadata, charts, song and cover held in memory
//! - `decode_package` / `encode_package` - conversion to and from a ZIP archive

mod decode;
mod encode;

pub use decode::*;
pub use encode::*;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::archive::Archive;
use crate::chart::Chart;
use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::info::PackageMetadata;

/// A decoded level package.
///
/// When decoded with `retain_archive`, the package keeps a handle on its
/// source archive so charts that were not loaded yet can be read later. The
/// handle is dropped with the package or by `close`.
#[derive(Debug, Clone)]
pub struct Package {
    pub metadata: PackageMetadata,
    pub song: Vec<u8>,
    pub cover: Option<Vec<u8>>,
    archive: Option<Archive>,
}

impl PartialEq for Package {
    /// Content equality; whether an archive is attached does not matter.
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata && self.song == other.song && self.cover == other.cover
    }
}

impl Package {
    /// A package built in memory. Charts go on the metadata's references.
    pub fn new(metadata: PackageMetadata, song: Vec<u8>) -> Self {
        Self::from_parts(metadata, song, None, None)
    }

    pub fn with_cover(mut self, cover: Vec<u8>) -> Self {
        self.cover = Some(cover);
        self
    }

    pub(crate) fn from_parts(
        metadata: PackageMetadata,
        song: Vec<u8>,
        cover: Option<Vec<u8>>,
        archive: Option<Archive>,
    ) -> Self {
        Self {
            metadata,
            song,
            cover,
            archive,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &DecodeOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        decode_package(Archive::open(path)?, options)
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        Self::from_bytes_with(bytes, &DecodeOptions::default())
    }

    pub fn from_bytes_with(bytes: impl Into<Arc<[u8]>>, options: &DecodeOptions) -> Result<Self> {
        decode_package(Archive::from_bytes(bytes)?, options)
    }

    /// The source archive, if still attached.
    pub fn archive(&self) -> Option<&Archive> {
        self.archive.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.archive.is_some()
    }

    /// Release the source archive. Charts not loaded by now stay unavailable.
    pub fn close(&mut self) {
        if self.archive.take().is_some() {
            debug!("Released archive for {:?}", self.metadata.song_name);
        }
    }

    /// An already loaded chart.
    pub fn chart(&self, characteristic: &str, difficulty: &str) -> Option<&Chart> {
        self.metadata
            .reference(characteristic, difficulty)?
            .chart
            .as_ref()
    }

    pub fn chart_mut(&mut self, characteristic: &str, difficulty: &str) -> Option<&mut Chart> {
        self.metadata
            .reference_mut(characteristic, difficulty)?
            .chart
            .as_mut()
    }

    /// Load a chart from the attached archive unless it is already loaded.
    pub fn load_chart(&mut self, characteristic: &str, difficulty: &str) -> Result<&Chart> {
        let archive = self.archive.as_ref();
        let reference = self
            .metadata
            .reference_mut(characteristic, difficulty)
            .ok_or_else(|| Error::UnknownReference {
                characteristic: characteristic.to_string(),
                difficulty: difficulty.to_string(),
            })?;

        let chart = match reference.chart.take() {
            Some(chart) => chart,
            None => {
                let archive = archive.ok_or_else(|| Error::ChartNotLoaded {
                    characteristic: characteristic.to_string(),
                    difficulty: difficulty.to_string(),
                })?;
                load_chart(archive, reference)?
            }
        };
        Ok(reference.chart.insert(chart))
    }

    /// Load every chart not loaded yet. Nothing is stored unless all succeed.
    pub fn load_all(&mut self) -> Result<()> {
        let mut loaded = Vec::new();
        for (set_index, set) in self.metadata.sets.iter().enumerate() {
            for (reference_index, reference) in set.references.iter().enumerate() {
                if reference.chart.is_some() {
                    continue;
                }
                let archive = self.archive.as_ref().ok_or_else(|| Error::ChartNotLoaded {
                    characteristic: set.characteristic.clone(),
                    difficulty: reference.difficulty.clone(),
                })?;
                loaded.push((set_index, reference_index, load_chart(archive, reference)?));
            }
        }

        for (set_index, reference_index, chart) in loaded {
            self.metadata.sets[set_index].references[reference_index].chart = Some(chart);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_package(self)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        debug!("Saved package to {:?}", path.as_ref());
        Ok(())
    }
}
