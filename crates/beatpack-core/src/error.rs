use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("Archive member not found: {0}")]
    MissingMember(String),

    #[error("Missing required field `{field}` in {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Extension key `{key}` on {entity} collides with a declared field")]
    ExtensionKeyCollision { entity: &'static str, key: String },

    #[error("Duplicate {kind}: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Chart {characteristic}/{difficulty} is not loaded and no archive is attached")]
    ChartNotLoaded {
        characteristic: String,
        difficulty: String,
    },

    #[error("No difficulty {characteristic}/{difficulty} in package metadata")]
    UnknownReference {
        characteristic: String,
        difficulty: String,
    },

    #[error("{member}: {source}")]
    InMember {
        member: String,
        #[source]
        source: Box<Error>,
    },

    /// Position inside a document, such as `_notes[3]`.
    #[error("{path}: {source}")]
    At {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach the archive member name an error was raised for.
    pub fn in_member(self, member: impl Into<String>) -> Self {
        Error::InMember {
            member: member.into(),
            source: Box::new(self),
        }
    }

    /// Attach the document position an error was raised at.
    pub fn at(self, path: impl Into<String>) -> Self {
        Error::At {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The error underneath any member or position context wrappers.
    pub fn innermost(&self) -> &Error {
        match self {
            Error::InMember { source, .. } | Error::At { source, .. } => source.innermost(),
            other => other,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => Error::Io(io),
            zip::result::ZipError::FileNotFound => {
                Error::MissingMember("file not found in archive".to_string())
            }
            other => Error::MalformedArchive(other.to_string()),
        }
    }
}
