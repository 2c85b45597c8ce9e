use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single metadata record could not be turned into an image file.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("failed to read metadata file")]
    Read(#[source] io::Error),

    #[error("metadata is not well-formed XML")]
    Parse(#[from] roxmltree::Error),

    #[error("no linkResource text at lido:administrativeMetadata/lido:resourceWrap/lido:resourceSet/lido:resourceRepresentation/lido:linkResource")]
    MissingNode,

    #[error("image request failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A [`RetrieveError`] attributed to the metadata file it happened on.
#[derive(Debug, Error)]
#[error("failed at metadata file {record}")]
pub struct RecordError {
    pub record: String,
    #[source]
    pub cause: RetrieveError,
}

impl RecordError {
    pub fn new(record: impl Into<String>, cause: RetrieveError) -> Self {
        Self {
            record: record.into(),
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list metadata directory {}", path.display())]
    MetadataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Displays an error followed by every error in its `source()` chain,
/// separated by `: `.
pub struct Chain<'a>(pub &'a (dyn Error + 'static));

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}
