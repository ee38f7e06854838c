//! Error types for the paragraph sorter.
//!
//! This module defines all error types that can occur while acquiring,
//! reordering, serializing and exporting a document.

use serde::{Deserialize, Serialize};

/// Result type alias for sorter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Body or paragraph structure is missing, or the XML is not well-formed
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// The reordered document could not be rendered back to text
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// No input document was available
    #[error("Failed to acquire document: {0}")]
    Acquisition(String),

    /// The output sink rejected the document
    #[error("Failed to export document: {0}")]
    Export(String),

    /// An alphabet table violates its invariants
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Office archive (zip container) error
    #[error("Archive error: {0}")]
    Archive(String),
}

/// Category of an [`Error`], without presentation text.
///
/// This is what the pipeline records for a failed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`Error::Structure`]
    Structure,
    /// See [`Error::Serialization`]
    Serialization,
    /// See [`Error::Acquisition`]
    Acquisition,
    /// See [`Error::Export`]
    Export,
    /// Alphabet or configuration problems
    Configuration,
    /// See [`Error::Io`]
    Io,
    /// See [`Error::Archive`]
    Archive,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Structure(_) => ErrorKind::Structure,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::Acquisition(_) => ErrorKind::Acquisition,
            Error::Export(_) => ErrorKind::Export,
            Error::InvalidAlphabet(_) | Error::Config(_) => ErrorKind::Configuration,
            Error::Io(_) => ErrorKind::Io,
            Error::Archive(_) => ErrorKind::Archive,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
