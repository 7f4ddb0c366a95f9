//! Mutable conversion state threaded through every block handler

use crate::diagnostics::Diagnostic;
use crate::document::BlockId;
use crate::lists::{NativeList, TightList};
use crate::markers::MediaKind;
use crate::numbering::{Counters, SectionNumber};
use crate::text::ends_sentence;
use crate::toc::TocEntry;
use std::collections::HashSet;

/// What was emitted last; drives spacing before the next element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LastKind {
    /// Nothing yet
    #[default]
    None,
    /// Prose, list items, bibliography entries
    Text,
    /// Section heading
    Heading,
    /// Figure or plot
    Figure,
    /// Table
    Table,
    /// Equation without trailing prose
    Equation,
}

/// Media announced by an insertion marker, waiting for its caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMedia {
    /// Figure or plot
    pub kind: MediaKind,
    /// Asset link relative to the document
    pub link: String,
    /// Number allocated when the marker was seen
    pub number: SectionNumber,
}

/// Everything the engine remembers between blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionState {
    /// Emitted markup lines
    pub out: Vec<String>,
    /// Section, visual and equation counters
    pub counters: Counters,
    /// Native Word list
    pub native_list: NativeList,
    /// Inferred colon-triggered list
    pub tight_list: TightList,
    /// Table caption waiting for its table
    pub pending_table_caption: Option<String>,
    /// Figure caption waiting for its inline picture
    pub pending_figure_caption: Option<String>,
    /// Marker-announced media waiting for its caption
    pub pending_media: Option<PendingMedia>,
    /// Inside the bibliography section
    pub in_bibliography: bool,
    /// Last bibliography entry number
    pub bib_counter: usize,
    /// Blocks swallowed as captions
    pub consumed: HashSet<BlockId>,
    /// Kind of the last emitted element
    pub last_kind: LastKind,
    /// Index in `out` of the last prose line, until something else follows it
    pub open_sentence: Option<usize>,
    /// Collected diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Headings in emission order
    pub headings: Vec<TocEntry>,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionState {
    /// Fresh state; the body opens with `\color{black}`
    pub fn new() -> Self {
        Self {
            out: vec![r"\color{black}".to_string()],
            counters: Counters::default(),
            native_list: NativeList::default(),
            tight_list: TightList::default(),
            pending_table_caption: None,
            pending_figure_caption: None,
            pending_media: None,
            in_bibliography: false,
            bib_counter: 0,
            consumed: HashSet::new(),
            last_kind: LastKind::None,
            open_sentence: None,
            diagnostics: Vec::new(),
            headings: Vec::new(),
        }
    }

    /// Append one markup line
    pub fn emit(&mut self, line: impl Into<String>) {
        self.out.push(line.into());
    }

    /// Append several markup lines
    pub fn emit_all(&mut self, lines: impl IntoIterator<Item = String>) {
        self.out.extend(lines);
    }

    /// Emit an already-escaped prose paragraph
    pub fn push_paragraph(&mut self, escaped: String) {
        self.out.push(escaped);
        self.open_sentence = Some(self.out.len() - 1);
        self.out.push(r"\par".to_string());
        self.out.push(r"\vspace{\baselineskip}".to_string());
        self.last_kind = LastKind::Text;
    }

    /// End the last prose paragraph with a period if it has no sentence punctuation
    pub fn terminate_open_sentence(&mut self) {
        if let Some(line) = self.open_sentence.take().and_then(|i| self.out.get_mut(i)) {
            if !line.is_empty() && !ends_sentence(line) {
                line.push('.');
            }
        }
    }

    /// Emit the spacing a visual needs right after a heading
    pub fn space_after_heading(&mut self) {
        if self.last_kind == LastKind::Heading {
            self.emit(r"\vspace{\baselineskip}");
        }
    }

    /// Mark blocks as swallowed captions
    pub fn consume(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        self.consumed.extend(ids);
    }
}
