use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Read-only view of a package archive with case-insensitive member lookup.
///
/// The container bytes are shared, so clones are cheap and every read works
/// on its own cursor.
#[derive(Debug, Clone)]
pub struct Archive {
    zip: ZipArchive<Cursor<Arc<[u8]>>>,
    /// Member names in central-directory order.
    names: Vec<String>,
    /// `names` lowercased, index-aligned.
    folded: Vec<String>,
}

impl Archive {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(bytes.into()))
            .map_err(|e| Error::MalformedArchive(e.to_string()))?;

        let mut names = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let entry = zip
                .by_index_raw(index)
                .map_err(|e| Error::MalformedArchive(e.to_string()))?;
            names.push(entry.name().to_string());
        }
        let folded: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();

        let mut seen = HashSet::new();
        let shadowed = folded.iter().filter(|n| !seen.insert(n.as_str())).count();
        if shadowed > 0 {
            warn!(
                "Archive has {} member(s) differing only by case; the first listed wins",
                shadowed
            );
        }

        debug!("Opened archive with {} members", names.len());
        Ok(Self { zip, names, folded })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        debug!("Read {} bytes from {:?}", bytes.len(), path.as_ref());
        Self::from_bytes(bytes)
    }

    /// Every member name, unfiltered, in archive order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.folded.iter().position(|n| *n == wanted)
    }

    /// Stored name of the first member matching `name` case-insensitively.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.names[i].as_str())
    }

    /// Like `find`, but absence is a `MissingMember` error.
    pub fn locate(&self, name: &str) -> Result<&str> {
        self.find(name)
            .ok_or_else(|| Error::MissingMember(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Contents of the member matching `name` case-insensitively.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::MissingMember(name.to_string()))?;

        let mut zip = self.zip.clone();
        let mut entry = zip
            .by_index(index)
            .map_err(|e| Error::from(e).in_member(self.names[index].as_str()))?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| Error::from(e).in_member(self.names[index].as_str()))?;

        debug!("Read member {} ({} bytes)", self.names[index], bytes.len());
        Ok(bytes)
    }

    /// Read `name` if present; absence is `Ok(None)`.
    pub fn read_optional(&self, name: &str) -> Result<Option<Vec<u8>>> {
        if self.contains(name) {
            self.read(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveWriter;

    fn archive_with(members: &[(&str, &[u8])]) -> Archive {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in members {
            zip.start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            std::io::Write::write_all(&mut zip, bytes).unwrap();
        }
        let bytes = zip.finish().unwrap().into_inner();
        Archive::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_find_ignores_case() {
        let archive = archive_with(&[("INFO.DAT", b"{}"), ("ExpertStandard.dat", b"{}")]);

        assert_eq!(archive.find("info.dat"), Some("INFO.DAT"));
        assert_eq!(archive.find("Info.dat"), Some("INFO.DAT"));
        assert_eq!(archive.find("expertstandard.DAT"), Some("ExpertStandard.dat"));
        assert_eq!(archive.find("Easy.dat"), None);
    }

    #[test]
    fn test_first_listed_wins() {
        let archive = archive_with(&[("song.egg", b"first"), ("SONG.EGG", b"second")]);

        assert_eq!(archive.find("Song.Egg"), Some("song.egg"));
        assert_eq!(archive.read("SONG.EGG").unwrap(), b"first");
    }

    #[test]
    fn test_names_are_unfiltered() {
        let archive = archive_with(&[("b.dat", b""), ("a.dat", b""), ("notes.txt", b"")]);
        assert_eq!(archive.names(), ["b.dat", "a.dat", "notes.txt"]);
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_locate_missing_member() {
        let archive = archive_with(&[("Info.dat", b"{}")]);
        let err = archive.locate("cover.jpg").unwrap_err();
        assert!(matches!(err, Error::MissingMember(name) if name == "cover.jpg"));
        assert!(archive.read_optional("cover.jpg").unwrap().is_none());
    }

    #[test]
    fn test_read_round_trips_writer_output() {
        let mut writer = ArchiveWriter::new();
        writer.add("Info.dat", b"{\"_version\":\"2.0.0\"}").unwrap();
        let archive = Archive::from_bytes(writer.finish().unwrap()).unwrap();

        assert_eq!(
            archive.read("info.dat").unwrap(),
            b"{\"_version\":\"2.0.0\"}"
        );
    }

    #[test]
    fn test_not_a_zip() {
        let err = Archive::from_bytes(b"definitely not a zip".to_vec()).unwrap_err();
        assert!(matches!(err, Error::MalformedArchive(_)));
    }

    #[test]
    fn test_clones_share_contents() {
        let archive = archive_with(&[("a.dat", b"abc")]);
        let copy = archive.clone();
        assert_eq!(copy.read("A.DAT").unwrap(), archive.read("a.dat").unwrap());
    }
}
