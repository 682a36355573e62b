//! Error types for odmeta.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map
//! one-to-one onto the ways a document can fail to yield metadata:
//!
//! - [`Error::ArchiveOpen`] - the container is missing, unreadable or not a zip
//! - [`Error::EntryNotFound`] - the requested member is absent
//! - [`Error::Extraction`] - the member's data is corrupt, truncated or unsupported
//! - [`Error::Parse`] - the member is not well-formed UTF-8 XML
//! - [`Error::Config`] - an extractor configuration could not be loaded
//!
//! Nothing below [`MetadataExtractor`](crate::MetadataExtractor) swallows an
//! error; the extractor is the single place where failures degrade into
//! missing keys.

use std::path::PathBuf;

use thiserror::Error;

use crate::zip::ZipError;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open archive {}: {source}", .path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("entry not found in archive: {entry}")]
    EntryNotFound { entry: String },

    #[error("failed to extract {entry}: {source}")]
    Extraction {
        entry: String,
        #[source]
        source: ZipError,
    },

    #[error("failed to parse {entry}: {message}")]
    Parse { entry: String, message: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    pub(crate) fn parse(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            entry: entry.into(),
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Name of the archive entry this error concerns, if any.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Error::EntryNotFound { entry }
            | Error::Extraction { entry, .. }
            | Error::Parse { entry, .. } => Some(entry),
            Error::ArchiveOpen { .. } | Error::Config { .. } => None,
        }
    }
}
