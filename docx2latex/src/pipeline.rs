//! Three-stage conversion pipeline
//!
//! This module orchestrates the three stages of a conversion:
//! 1. **Reading**: Open the `.docx` and build the block stream
//! 2. **Conversion**: Run the block-stream engine over it
//! 3. **Writing**: Write the body and the table-of-contents fragment

use crate::config::{ConvertConfig, OutputConfig};
use crate::document::{Document, ReadError};
use crate::engine::{ConversionOutput, Converter};
use crate::equations::EquationPipeline;
use crate::locale::Locale;
use crate::toc::render_toc;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Append `.docx` to an input path without an extension
pub fn with_docx_extension(input: &Path) -> PathBuf {
    if input.extension().is_some() {
        input.to_path_buf()
    } else {
        input.with_extension("docx")
    }
}

/// Directory of the input document (asset links are relative to it)
pub fn document_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Stage 1: Read the source document
///
/// # Parameters
/// * `input` - Path to the `.docx` file
///
/// # Returns
/// * `Ok(Document)` - The ordered block stream
/// * `Err(PipelineError)` - The file is missing or unreadable
pub fn read_document(input: &Path) -> Result<Document, PipelineError> {
    Ok(Document::open(input)?)
}

/// Stage 2: Convert the block stream
///
/// # Parameters
/// * `document` - Source blocks
/// * `config` - Language, feature and asset settings
/// * `base_dir` - Directory asset files are looked up in
/// * `equations` - Provider chain for native equations
pub fn convert(
    document: &Document,
    config: &ConvertConfig,
    base_dir: &Path,
    equations: EquationPipeline,
) -> ConversionOutput {
    let converter = Converter::new(config, base_dir, equations);
    converter.convert(document)
}

/// Paths written by stage 3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// Converted body
    pub body: PathBuf,
    /// Table-of-contents fragment
    pub toc: PathBuf,
}

/// Stage 3: Write the body and the TOC fragment
///
/// # Parameters
/// * `output` - Result of stage 2
/// * `language` - Language of the TOC title
/// * `output_dir` - Target directory (created when missing)
/// * `files` - Output file names
pub fn write_outputs(
    output: &ConversionOutput,
    language: Locale,
    output_dir: &Path,
    files: &OutputConfig,
) -> Result<WrittenFiles, PipelineError> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| PipelineError::IoError(output_dir.to_path_buf(), e))?;

    let body = output_dir.join(&files.body_file);
    std::fs::write(&body, output.body()).map_err(|e| PipelineError::IoError(body.clone(), e))?;

    let toc = output_dir.join(&files.toc_file);
    std::fs::write(&toc, render_toc(&output.headings, language.table()))
        .map_err(|e| PipelineError::IoError(toc.clone(), e))?;

    Ok(WrittenFiles { body, toc })
}

/// Result of a whole conversion run
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Engine output
    pub output: ConversionOutput,
    /// Files written
    pub files: WrittenFiles,
}

/// Run all three stages
///
/// # Parameters
/// * `input` - Path to the `.docx` file
/// * `output_dir` - Where `content.tex` and `toc.tex` go
/// * `config` - Conversion settings
/// * `equations` - Provider chain for native equations
pub fn run(
    input: &Path,
    output_dir: &Path,
    config: &ConvertConfig,
    equations: EquationPipeline,
) -> Result<ConversionReport, PipelineError> {
    let document = read_document(input)?;
    let output = convert(&document, config, &document_dir(input), equations);
    let files = write_outputs(&output, config.language, output_dir, &config.output)?;
    Ok(ConversionReport { output, files })
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read document: {0}")]
    ReadError(#[from] ReadError),

    #[error("IO error writing {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),
}
