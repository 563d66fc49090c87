use std::collections::HashSet;
use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};

/// Builds a fresh archive in memory.
///
/// Every member gets the same fixed timestamp so identical input produces
/// identical bytes.
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    /// Lowercased names already written.
    written: HashSet<String>,
}

fn member_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            written: HashSet::new(),
        }
    }

    /// Whether a member with this name (ignoring case) was already added.
    pub fn contains(&self, name: &str) -> bool {
        self.written.contains(&name.to_lowercase())
    }

    /// Add a member. Names that collide case-insensitively with an earlier
    /// member are rejected, since readers could not tell them apart.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        if !self.written.insert(name.to_lowercase()) {
            return Err(Error::DuplicateName {
                kind: "archive member",
                name: name.to_string(),
            });
        }

        self.zip.start_file(name, member_options())?;
        self.zip.write_all(bytes)?;
        debug!("Wrote member {} ({} bytes)", name, bytes.len());
        Ok(())
    }

    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
