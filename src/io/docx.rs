//! `.docx` archives.
//!
//! DOCX files are ZIP archives containing XML files in Open XML format.
//! The main content is in `word/document.xml`; every other entry is copied
//! to the output archive untouched (raw, without recompression).

use super::{DocumentSink, DocumentSource};
use crate::error::{Error, Result};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Archive path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// An in-memory `.docx` package.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    bytes: Vec<u8>,
}

impl DocxPackage {
    /// Read a package from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| Error::Acquisition(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(bytes)
    }

    /// Wrap archive bytes, checking that they hold a document part.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let package = Self { bytes };
        package.archive()?.by_name(DOCUMENT_PART).map_err(|e| {
            Error::Archive(format!("{} not found in archive: {}", DOCUMENT_PART, e))
        })?;
        Ok(package)
    }

    /// Raw archive bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        ZipArchive::new(Cursor::new(self.bytes.as_slice()))
            .map_err(|e| Error::Archive(format!("Failed to open DOCX archive: {}", e)))
    }

    /// Text of `word/document.xml`.
    pub fn document_xml(&self) -> Result<String> {
        let mut archive = self.archive()?;
        let mut file = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| Error::Archive(format!("{}: {}", DOCUMENT_PART, e)))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Archive(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;
        Ok(content)
    }

    /// Archive bytes with `word/document.xml` replaced by `xml`.
    pub fn with_document_xml(&self, xml: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(self.bytes.len())));
        let archive_error = |e: zip::result::ZipError| Error::Archive(e.to_string());

        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(archive_error)?;
            if entry.name() == DOCUMENT_PART {
                drop(entry);
                let options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
                writer
                    .start_file(DOCUMENT_PART, options)
                    .map_err(archive_error)?;
                writer.write_all(xml.as_bytes())?;
            } else {
                writer.raw_copy_file(entry).map_err(archive_error)?;
            }
        }

        let cursor = writer.finish().map_err(archive_error)?;
        Ok(cursor.into_inner())
    }
}

/// Supplies the document part of a `.docx` file.
#[derive(Debug, Clone)]
pub struct DocxSource {
    path: PathBuf,
}

impl DocxSource {
    /// Source reading the archive at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for DocxSource {
    fn read_document(&mut self) -> Result<String> {
        log::debug!("Reading {} from {}", DOCUMENT_PART, self.path.display());
        DocxPackage::open(&self.path)?.document_xml()
    }
}

/// Writes a copy of a template package with its document part replaced.
#[derive(Debug, Clone)]
pub struct DocxSink {
    template: DocxPackage,
    path: PathBuf,
}

impl DocxSink {
    /// Sink writing `template` (with the new document part) to `path`.
    pub fn new(template: DocxPackage, path: impl AsRef<Path>) -> Self {
        Self {
            template,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSink for DocxSink {
    fn write_document(&mut self, xml: &str) -> Result<()> {
        let bytes = self
            .template
            .with_document_xml(xml)
            .map_err(|e| Error::Export(e.to_string()))?;
        log::debug!("Writing {} bytes to {}", bytes.len(), self.path.display());
        fs::write(&self.path, bytes)
            .map_err(|e| Error::Export(format!("{}: {}", self.path.display(), e)))
    }
}
