//! Document sources and sinks.
//!
//! The pipeline never touches the filesystem itself. It reads from a
//! [`DocumentSource`] and writes to a [`DocumentSink`]; this module provides
//! file-backed and in-memory implementations, plus `.docx` archives behind
//! the `docx` feature.

#[cfg(feature = "docx")]
pub mod docx;

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies raw document text.
pub trait DocumentSource {
    /// Read the whole document.
    fn read_document(&mut self) -> Result<String>;
}

/// Receives sorted document text.
pub trait DocumentSink {
    /// Store the whole document.
    fn write_document(&mut self, xml: &str) -> Result<()>;
}

/// Reads a `document.xml` part from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn read_document(&mut self) -> Result<String> {
        log::debug!("Reading {}", self.path.display());
        fs::read_to_string(&self.path)
            .map_err(|e| Error::Acquisition(format!("{}: {}", self.path.display(), e)))
    }
}

/// Writes the sorted document to disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for FileSink {
    fn write_document(&mut self, xml: &str) -> Result<()> {
        log::debug!("Writing {} bytes to {}", xml.len(), self.path.display());
        fs::write(&self.path, xml)
            .map_err(|e| Error::Export(format!("{}: {}", self.path.display(), e)))
    }
}

/// In-memory source. Yields its document once; later reads fail.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    document: Option<String>,
}

impl MemorySource {
    /// Source holding `document`.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }

    /// Source with nothing to supply.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl DocumentSource for MemorySource {
    fn read_document(&mut self) -> Result<String> {
        self.document
            .take()
            .ok_or_else(|| Error::Acquisition("no document supplied".to_string()))
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Last document written
    pub document: Option<String>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for MemorySink {
    fn write_document(&mut self, xml: &str) -> Result<()> {
        self.document = Some(xml.to_string());
        Ok(())
    }
}
