//! Block-level document elements

use crate::text::clean_line;

/// Opaque block identity, used for "already consumed" membership tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

/// Native list style of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Bulleted list (`itemize`)
    Bulleted,
    /// Numbered list (`enumerate`)
    Numbered,
}

impl ListKind {
    /// LaTeX environment name for this list style
    pub fn environment(self) -> &'static str {
        match self {
            ListKind::Bulleted => "itemize",
            ListKind::Numbered => "enumerate",
        }
    }
}

/// A paragraph of the source document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Raw text (tabs and manual line breaks preserved)
    pub text: String,
    /// Contains a native (OMML) equation object
    pub has_native_equation: bool,
    /// Contains an embedded picture
    pub has_inline_image: bool,
    /// Native list formatting, if any
    pub list: Option<ListKind>,
    /// Raw `w:p` XML, kept only for equation paragraphs
    pub xml: Option<String>,
}

impl Paragraph {
    /// Cleaned and trimmed text
    pub fn clean_text(&self) -> String {
        clean_line(&self.text)
    }
}

/// A table of the source document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Rows of cell texts
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Column count, fixed by the first row
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Paragraph or table content of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// One body element in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Identity of the block
    pub id: BlockId,
    /// Block content
    pub kind: BlockKind,
}

impl Block {
    /// Create a plain text paragraph block
    pub fn paragraph(index: usize, text: &str) -> Self {
        Self::with_paragraph(
            index,
            Paragraph {
                text: text.to_string(),
                ..Paragraph::default()
            },
        )
    }

    /// Create a paragraph block from a prepared paragraph
    pub fn with_paragraph(index: usize, paragraph: Paragraph) -> Self {
        Self {
            id: BlockId(index),
            kind: BlockKind::Paragraph(paragraph),
        }
    }

    /// Create an empty paragraph holding only a picture
    pub fn image(index: usize) -> Self {
        Self::with_paragraph(
            index,
            Paragraph {
                has_inline_image: true,
                ..Paragraph::default()
            },
        )
    }

    /// Create an empty paragraph holding only a native equation
    pub fn equation(index: usize, xml: &str) -> Self {
        Self::with_paragraph(
            index,
            Paragraph {
                has_native_equation: true,
                xml: Some(xml.to_string()),
                ..Paragraph::default()
            },
        )
    }

    /// Create a native list item paragraph
    pub fn list_item(index: usize, text: &str, kind: ListKind) -> Self {
        Self::with_paragraph(
            index,
            Paragraph {
                text: text.to_string(),
                list: Some(kind),
                ..Paragraph::default()
            },
        )
    }

    /// Create a table block
    pub fn table(index: usize, rows: Vec<Vec<String>>) -> Self {
        Self {
            id: BlockId(index),
            kind: BlockKind::Table(Table { rows }),
        }
    }

    /// Borrow the paragraph, if this block is one
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match &self.kind {
            BlockKind::Paragraph(p) => Some(p),
            BlockKind::Table(_) => None,
        }
    }

    /// Cleaned paragraph text, empty for tables
    pub fn paragraph_text(&self) -> String {
        self.as_paragraph()
            .map(Paragraph::clean_text)
            .unwrap_or_default()
    }
}
