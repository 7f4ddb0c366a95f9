//! Section and visual numbering
//!
//! Section-relative numbers (`2.3`) label captions; global indices locate
//! the externally numbered asset files and never reset.

use crate::locale::Casing;
use crate::text::clean_line;
use std::fmt;

/// A section-relative number such as `2.3`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionNumber {
    /// Enclosing section
    pub section: usize,
    /// Position inside the section, starting at 1
    pub local: usize,
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.local)
    }
}

/// All counters of one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    /// Headings seen so far
    pub heading_no: usize,
    /// Figures in the current section
    pub fig_in_section: usize,
    /// Plots in the current section
    pub plot_in_section: usize,
    /// Tables in the current section
    pub table_in_section: usize,
    /// Inline pictures and figure markers seen so far (asset `image{N}`)
    pub image_global: usize,
    /// Plot markers seen so far (asset `plot{N}`)
    pub plot_global: usize,
    /// Equations emitted so far
    pub equation_no: usize,
}

impl Counters {
    /// Open a new section; returns its number
    pub fn start_section(&mut self) -> usize {
        self.heading_no += 1;
        self.fig_in_section = 0;
        self.plot_in_section = 0;
        self.table_in_section = 0;
        self.heading_no
    }

    /// Current section number; content before the first heading is section 1
    pub fn section(&self) -> usize {
        self.heading_no.max(1)
    }

    /// Allocate the next figure number in the current section
    pub fn next_figure(&mut self) -> SectionNumber {
        self.fig_in_section += 1;
        SectionNumber {
            section: self.section(),
            local: self.fig_in_section,
        }
    }

    /// Allocate the next plot number in the current section
    pub fn next_plot(&mut self) -> SectionNumber {
        self.plot_in_section += 1;
        SectionNumber {
            section: self.section(),
            local: self.plot_in_section,
        }
    }

    /// Allocate the next table number in the current section
    pub fn next_table(&mut self) -> SectionNumber {
        self.table_in_section += 1;
        SectionNumber {
            section: self.section(),
            local: self.table_in_section,
        }
    }

    /// Advance the global image index
    pub fn next_image_index(&mut self) -> usize {
        self.image_global += 1;
        self.image_global
    }

    /// Advance the global plot index
    pub fn next_plot_index(&mut self) -> usize {
        self.plot_global += 1;
        self.plot_global
    }

    /// Advance the equation number
    pub fn next_equation(&mut self) -> usize {
        self.equation_no += 1;
        self.equation_no
    }
}

/// Normalise caption text: cleaned, first letter capitalised, period-terminated
///
/// Empty input stays empty.
pub fn caption_body(casing: Casing, text: &str) -> String {
    let text = casing.capitalize_first(&clean_line(text));
    if text.is_empty() || text.ends_with(['.', '!', '?']) {
        text
    } else {
        format!("{text}.")
    }
}

/// Format a full caption: `"{label} {section}.{local}: {Text}."`
///
/// An empty caption text yields just `"{label} {section}.{local}."`.
pub fn format_caption(label: &str, casing: Casing, number: SectionNumber, text: &str) -> String {
    let body = caption_body(casing, text);
    if body.is_empty() {
        format!("{label} {number}.")
    } else {
        format!("{label} {number}: {body}")
    }
}
