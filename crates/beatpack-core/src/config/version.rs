use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::error::{Error, Result};

/// Layout generation of the metadata document.
///
/// Legacy (`1.x`) metadata stores difficulty sets as an object keyed by
/// characteristic name. Current (`2.x` and later) metadata stores them as an
/// ordered list where each set names its own characteristic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
pub enum SchemaGeneration {
    #[strum(serialize = "legacy")]
    Legacy,
    #[strum(serialize = "current")]
    Current,
}

impl SchemaGeneration {
    /// Select the generation named by a `_version` string such as `"2.0.0"`.
    pub fn detect(version: &str) -> Result<Self> {
        let major = parse_major(version).ok_or_else(|| {
            Error::MalformedDocument(format!("unrecognized schema version {:?}", version))
        })?;

        Ok(if major < 2 { Self::Legacy } else { Self::Current })
    }
}

/// Leading numeric component of a dotted version string.
fn parse_major(version: &str) -> Option<u32> {
    let head = version.trim().split(['.', ',']).next()?;
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_generations() {
        assert_eq!(
            SchemaGeneration::detect("2.0.0").unwrap(),
            SchemaGeneration::Current
        );
        assert_eq!(
            SchemaGeneration::detect("2.1.0").unwrap(),
            SchemaGeneration::Current
        );
        assert_eq!(
            SchemaGeneration::detect("1.5.0").unwrap(),
            SchemaGeneration::Legacy
        );
    }

    #[test]
    fn test_detect_tolerates_comma_separator() {
        // Some exporters write "2.0,0"
        assert_eq!(
            SchemaGeneration::detect("2.0,0").unwrap(),
            SchemaGeneration::Current
        );
    }

    #[test]
    fn test_detect_rejects_garbage() {
        assert!(SchemaGeneration::detect("").is_err());
        assert!(SchemaGeneration::detect("v2").is_err());
        assert!(SchemaGeneration::detect("latest").is_err());
    }
}
