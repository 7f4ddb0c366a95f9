//! List state machines
//!
//! Two independent machines: native Word lists (bulleted / numbered) and
//! "tight" lists inferred from a colon-terminated trigger line followed by
//! short item-shaped lines.

use crate::document::ListKind;
use regex::RegexSet;
use std::sync::LazyLock;

/// Longest line (in characters) that can open a tight list
pub const TRIGGER_MAX_CHARS: usize = 80;

/// Longest line (in characters) accepted as a tight-list item
pub const ITEM_MAX_CHARS: usize = 120;

static ITEM_SHAPES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^[-–•]\s+\S+",
        r"^\d+[\.\)]\s+\S+",
        r"^\p{L}[\)\.]\s+\S+",
        r"^[^:]{1,25}\s*:\s+\S+",
    ])
    .expect("valid tight list item regexes")
});

/// Native list state: closed, or open with a kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeList {
    open: Option<ListKind>,
}

impl NativeList {
    /// Emit one item, opening (or switching) the list as needed
    ///
    /// A kind switch closes the old list before opening the new one; lists
    /// are never nested.
    pub fn item(&mut self, kind: ListKind, escaped_text: &str, out: &mut Vec<String>) {
        if self.open != Some(kind) {
            self.close(out);
            out.push(r"\begin{samepage}".to_string());
            out.push(format!(r"\begin{{{}}}", kind.environment()));
            self.open = Some(kind);
        }
        out.push(format!(r"\item {escaped_text}"));
    }

    /// Close the list if open; returns whether anything was emitted
    pub fn close(&mut self, out: &mut Vec<String>) -> bool {
        match self.open.take() {
            Some(kind) => {
                out.push(format!(r"\end{{{}}}", kind.environment()));
                out.push(r"\end{samepage}".to_string());
                true
            }
            None => false,
        }
    }
}

/// Tight list state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TightList {
    open: bool,
}

impl TightList {
    /// Start a tight list after a trigger line
    pub fn start(&mut self) {
        self.open = true;
    }

    /// End the tight list
    pub fn end(&mut self) {
        self.open = false;
    }

    /// Feed a line while open; returns true if it continues the list
    ///
    /// A non-item line ends the list.
    pub fn accepts(&mut self, line: &str) -> bool {
        if self.open && is_tight_list_item(line) {
            return true;
        }
        self.open = false;
        false
    }
}

/// A short line ending with a colon
pub fn is_tight_list_trigger(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().count() <= TRIGGER_MAX_CHARS && line.ends_with(':')
}

/// A short line shaped like a list item
pub fn is_tight_list_item(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().count() <= ITEM_MAX_CHARS && ITEM_SHAPES.is_match(line)
}

/// Markup for one tight-list item (no vertical space between items)
pub fn tight_item_line(escaped_text: &str) -> String {
    format!(r"\noindent {escaped_text}\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_list_open_and_close() {
        // Arrange
        let mut list = NativeList::default();
        let mut out = Vec::new();

        // Act
        list.item(ListKind::Bulleted, "one", &mut out);
        list.item(ListKind::Bulleted, "two", &mut out);
        let closed = list.close(&mut out);

        // Assert
        assert!(closed);
        assert_eq!(
            out,
            vec![
                r"\begin{samepage}",
                r"\begin{itemize}",
                r"\item one",
                r"\item two",
                r"\end{itemize}",
                r"\end{samepage}",
            ]
        );
        assert_eq!(list, NativeList::default());
    }

    #[test]
    fn test_native_list_kind_switch_closes_then_reopens() {
        let mut list = NativeList::default();
        let mut out = Vec::new();

        list.item(ListKind::Bulleted, "a", &mut out);
        list.item(ListKind::Numbered, "b", &mut out);

        assert_eq!(
            out,
            vec![
                r"\begin{samepage}",
                r"\begin{itemize}",
                r"\item a",
                r"\end{itemize}",
                r"\end{samepage}",
                r"\begin{samepage}",
                r"\begin{enumerate}",
                r"\item b",
            ]
        );
        out.clear();
        assert!(list.close(&mut out));
        assert_eq!(out, vec![r"\end{enumerate}", r"\end{samepage}"]);
    }

    #[test]
    fn test_close_when_closed_emits_nothing() {
        let mut out = Vec::new();
        assert!(!NativeList::default().close(&mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_trigger_detection() {
        assert!(is_tight_list_trigger("Measured values:"));
        assert!(!is_tight_list_trigger("Measured values"));
        assert!(!is_tight_list_trigger(&format!("{}:", "x".repeat(80))));
    }

    #[test]
    fn test_item_shapes() {
        assert!(is_tight_list_item("- first point"));
        assert!(is_tight_list_item("• bullet"));
        assert!(is_tight_list_item("2) second"));
        assert!(is_tight_list_item("b. alpha label"));
        assert!(is_tight_list_item("ç) Turkish label"));
        assert!(is_tight_list_item("position: f = 13.65 Hz,"));
        assert!(!is_tight_list_item("This is an ordinary sentence without a label."));
        assert!(!is_tight_list_item(&format!("- {}", "x".repeat(130))));
    }

    #[test]
    fn test_tight_list_ends_on_first_non_item() {
        let mut tight = TightList::default();
        tight.start();

        assert!(tight.accepts("- one"));
        assert!(!tight.accepts("Back to prose here"));
        assert_eq!(tight, TightList::default());
        // Closed lists do not reopen on item-shaped lines
        assert!(!tight.accepts("- two"));
    }
}
