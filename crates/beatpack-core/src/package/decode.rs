use tracing::debug;

use crate::archive::Archive;
use crate::chart::Chart;
use crate::config::{DecodeOptions, LoadPolicy, names};
use crate::error::Result;
use crate::info::{ChartReference, PackageMetadata};
use crate::package::Package;

/// Decode a package from an opened archive.
///
/// Every chart reference must resolve to a member even when charts are loaded
/// lazily, and the song is mandatory. A missing cover decodes as `None`.
/// Any failure aborts the whole decode.
pub fn decode_package(archive: Archive, options: &DecodeOptions) -> Result<Package> {
    let info_member = archive.locate(names::METADATA_MEMBER)?.to_string();
    let info_bytes = archive.read(&info_member)?;
    let mut metadata =
        PackageMetadata::from_slice(&info_bytes).map_err(|e| e.in_member(info_member.as_str()))?;

    for set in &mut metadata.sets {
        for reference in &mut set.references {
            match options.load {
                LoadPolicy::Eager => reference.chart = Some(load_chart(&archive, reference)?),
                LoadPolicy::Lazy => {
                    archive.locate(&reference.filename)?;
                }
            }
        }
    }

    let song = archive.read(&metadata.song_filename)?;
    let cover = archive.read_optional(&metadata.cover_filename)?;
    if cover.is_none() {
        debug!("No cover member {:?}", metadata.cover_filename);
    }

    debug!(
        "Decoded package {:?}: {} set(s), {} chart reference(s), {} load",
        metadata.song_name,
        metadata.sets.len(),
        metadata.references().count(),
        options.load
    );

    let archive = options.retain_archive.then_some(archive);
    Ok(Package::from_parts(metadata, song, cover, archive))
}

/// Decode the chart a reference points at.
pub fn load_chart(archive: &Archive, reference: &ChartReference) -> Result<Chart> {
    let member = archive.locate(&reference.filename)?.to_string();
    let bytes = archive.read(&member)?;
    let chart = Chart::from_slice(&bytes).map_err(|e| e.in_member(member.as_str()))?;
    debug!("Loaded chart {} for {}", member, reference.difficulty);
    Ok(chart)
}
