//! Table-of-contents fragment
//!
//! Entries point at the `sec:N` anchors emitted with each heading. Page
//! numbers come from `\pageref`, so the final document must be compiled
//! twice before they resolve.

use crate::locale::LocaleTable;
use crate::text::escape_latex;

/// One heading as listed in the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Section number (also the anchor suffix)
    pub number: usize,
    /// Upper-cased heading title
    pub title: String,
}

impl TocEntry {
    /// Anchor label referenced by the entry
    pub fn anchor(&self) -> String {
        format!("sec:{}", self.number)
    }

    /// Displayed text, `N. TITLE`
    pub fn display(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }
}

/// Render the TOC fragment for a list of headings
pub fn render_toc(entries: &[TocEntry], locale: &LocaleTable) -> String {
    let mut lines = vec![
        format!(r"\section*{{{}}}", locale.toc_title),
        r"\begingroup".to_string(),
        r"\setlength{\parindent}{0pt}".to_string(),
        r"\setlength{\parskip}{0pt}".to_string(),
        r"\noindent".to_string(),
    ];

    for entry in entries {
        let anchor = entry.anchor();
        lines.push(format!(
            r"\hyperref[{anchor}]{{{}}}\dotfill \hyperref[{anchor}]{{\pageref{{{anchor}}}}}\\",
            escape_latex(&entry.display())
        ));
    }

    lines.push(r"\endgroup".to_string());
    lines.push(String::new());
    lines.join("\n")
}
