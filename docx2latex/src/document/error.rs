//! Error types for reading source documents

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading a `.docx` document
#[derive(Error, Debug)]
pub enum ReadError {
    /// The input document does not exist
    #[error("Document not found: {path}", path = .0.display())]
    NotFound(PathBuf),

    /// IO error opening or reading the archive
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    Io(PathBuf, #[source] std::io::Error),

    /// The file is not a valid ZIP archive or lacks a required part
    #[error("Invalid docx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed XML inside the archive
    #[error("Malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),
}
