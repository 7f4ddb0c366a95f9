//! Source document model
//!
//! This module defines the ordered block stream read from a `.docx` file:
//! paragraphs and tables in body order, with the presence flags the
//! conversion engine needs. Blocks are immutable once read.

use std::path::Path;

// Submodules
mod block;
mod error;
mod minimal;
mod reader;

// Re-export public types
pub use block::{Block, BlockId, BlockKind, ListKind, Paragraph, Table};
pub use error::ReadError;
pub use minimal::single_paragraph_docx;
pub use reader::{parse_document_xml, parse_styles_xml, StyleNames};

/// A whole source document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Body blocks in document order
    pub blocks: Vec<Block>,

    /// Namespace declarations of the root `w:document` element
    ///
    /// Needed to re-wrap a single paragraph into a standalone document.
    pub namespaces: String,
}

impl Document {
    /// Open and parse a `.docx` file
    ///
    /// # Parameters
    /// * `path` - Path to the `.docx` archive
    ///
    /// # Returns
    /// * `Ok(Document)` - All body blocks in order
    /// * `Err(ReadError)` - The file is missing or is not a readable docx
    pub fn open(path: &Path) -> Result<Self, ReadError> {
        reader::read_docx(path)
    }

    /// Build a document directly from blocks (namespaces left empty)
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            namespaces: String::new(),
        }
    }

    /// Index of the first block after the `---` content-start sentinel
    ///
    /// Returns 0 when the document has no sentinel paragraph.
    pub fn content_start(&self) -> usize {
        self.blocks
            .iter()
            .position(|block| {
                block
                    .as_paragraph()
                    .is_some_and(|p| p.clean_text() == crate::markers::SENTINEL)
            })
            .map_or(0, |i| i + 1)
    }

    /// Number of paragraph blocks
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.as_paragraph().is_some())
            .count()
    }

    /// Number of table blocks
    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Table(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_start_after_sentinel() {
        // Arrange: cover text, sentinel, body
        let doc = Document::from_blocks(vec![
            Block::paragraph(0, "Lab Report"),
            Block::paragraph(1, " --- "),
            Block::paragraph(2, "INTRODUCTION"),
        ]);

        // Act / Assert
        assert_eq!(doc.content_start(), 2);
    }

    #[test]
    fn test_content_start_defaults_to_zero() {
        let doc = Document::from_blocks(vec![Block::paragraph(0, "INTRODUCTION")]);
        assert_eq!(doc.content_start(), 0);
    }

    #[test]
    fn test_block_counts() {
        let doc = Document::from_blocks(vec![
            Block::paragraph(0, "a"),
            Block::table(1, vec![vec!["x".to_string()]]),
        ]);
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.table_count(), 1);
    }
}
