use std::collections::HashMap;

use tracing::debug;

use crate::archive::ArchiveWriter;
use crate::config::names;
use crate::error::{Error, Result};
use crate::package::{Package, load_chart};

/// Build a new archive from the package's current state.
///
/// Members are written as metadata, charts in set/reference order, song, then
/// cover. Charts that were never loaded are read from the attached archive;
/// without one the encode fails with `ChartNotLoaded`. References sharing a
/// chart filename are written once, provided their charts encode identically.
pub fn encode_package(package: &Package) -> Result<Vec<u8>> {
    let metadata = &package.metadata;
    let mut writer = ArchiveWriter::new();
    // Chart bytes already written, by lowercased filename
    let mut charts: HashMap<String, Vec<u8>> = HashMap::new();

    writer.add(names::METADATA_MEMBER, &metadata.to_vec()?)?;

    for (set, reference) in metadata.references() {
        let bytes = match (&reference.chart, package.archive()) {
            (Some(chart), _) => chart.to_vec(),
            (None, Some(archive)) => load_chart(archive, reference)?.to_vec(),
            (None, None) => {
                return Err(Error::ChartNotLoaded {
                    characteristic: set.characteristic.clone(),
                    difficulty: reference.difficulty.clone(),
                });
            }
        }
        .map_err(|e| e.in_member(reference.filename.as_str()))?;

        if let Some(written) = charts.get(&reference.filename.to_lowercase()) {
            if *written != bytes {
                return Err(Error::DuplicateName {
                    kind: "archive member",
                    name: reference.filename.clone(),
                });
            }
            debug!(
                "Chart {} shared by {}/{}",
                reference.filename, set.characteristic, reference.difficulty
            );
            continue;
        }

        writer.add(&reference.filename, &bytes)?;
        charts.insert(reference.filename.to_lowercase(), bytes);
    }

    writer.add(&metadata.song_filename, &package.song)?;
    if let Some(cover) = &package.cover {
        writer.add(&metadata.cover_filename, cover)?;
    }

    let bytes = writer.finish()?;
    debug!("Encoded package {:?} ({} bytes)", metadata.song_name, bytes.len());
    Ok(bytes)
}
