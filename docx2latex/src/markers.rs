//! Whole-line marker recognition
//!
//! Three disjoint marker shapes are recognised on a cleaned line:
//! - insertion markers: `$fig$`, `$plot$` (token vocabulary per locale)
//! - caption delimiters: a bare `---` or `--- caption text ---`
//! - equation delimiters: `$$ formula $$ optional trailing prose`
//!
//! Matching is strictly whole-line; markers inside a sentence are plain text.

use crate::locale::LocaleTable;
use crate::text::clean_line;
use regex::Regex;
use std::sync::LazyLock;

/// The caption sentinel; alone on a line it also marks where content starts
pub const SENTINEL: &str = "---";

static CAPTION_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*(.+?)\s*---$").expect("valid caption delimiter regex"));

/// Kind of media an insertion marker asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Next `image{N}` asset
    Figure,
    /// Next `plot{N}` asset
    Plot,
}

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Not a marker; ordinary text
    None,
    /// `$fig$` / `$plot$` style insertion marker
    Insertion {
        /// Which asset family to insert
        kind: MediaKind,
    },
    /// `--- text ---` caption delimiter (empty text for a bare `---`)
    Caption {
        /// Caption payload
        text: String,
    },
    /// `$$ formula $$ trailing` equation line
    Equation {
        /// Raw formula between the delimiters
        formula: String,
        /// Prose following the closing delimiter on the same line
        trailing_text: String,
    },
}

/// Parse a raw paragraph line into a marker
pub fn parse_marker(raw: &str, locale: &LocaleTable) -> Marker {
    let line = clean_line(raw);

    if let Some(text) = parse_caption_delimiter(&line) {
        return Marker::Caption { text };
    }
    if let Some(kind) = parse_insertion_marker(&line, locale) {
        return Marker::Insertion { kind };
    }
    if let Some((formula, trailing_text)) = parse_equation_line(&line) {
        return Marker::Equation {
            formula,
            trailing_text,
        };
    }
    Marker::None
}

/// Parse a caption delimiter line, returning its (possibly empty) payload
pub fn parse_caption_delimiter(line: &str) -> Option<String> {
    if line == SENTINEL {
        return Some(String::new());
    }
    let caps = CAPTION_DELIMITER.captures(line)?;
    let inner = clean_line(caps.get(1)?.as_str());
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

/// Parse an insertion marker (`$token$`)
pub fn parse_insertion_marker(line: &str, locale: &LocaleTable) -> Option<MediaKind> {
    let inner = line.strip_prefix('$')?.strip_suffix('$')?.trim();
    if inner.is_empty() {
        return None;
    }

    let key = locale.casing.fold(inner);
    if locale.plot_tokens.contains(&key.as_str()) {
        Some(MediaKind::Plot)
    } else if locale.figure_tokens.contains(&key.as_str()) {
        Some(MediaKind::Figure)
    } else {
        None
    }
}

/// Parse an equation line into (formula, trailing prose)
///
/// Returns `None` when the closing `$$` is missing or the formula is empty.
pub fn parse_equation_line(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix("$$")?;
    let end = rest.find("$$")?;

    let formula = rest[..end].trim();
    if formula.is_empty() {
        return None;
    }
    let trailing = rest[end + 2..].trim();
    Some((formula.to_string(), trailing.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_caption_delimiter_with_text() {
        let en = Locale::En.table();
        assert_eq!(
            parse_marker("--- Displacement vs. time ---", en),
            Marker::Caption {
                text: "Displacement vs. time".to_string()
            }
        );
    }

    #[test]
    fn test_bare_sentinel_is_empty_caption() {
        let en = Locale::En.table();
        assert_eq!(
            parse_marker(" --- ", en),
            Marker::Caption {
                text: String::new()
            }
        );
    }

    #[test]
    fn test_insertion_markers_case_insensitive() {
        let en = Locale::En.table();
        assert_eq!(
            parse_marker("$FIG$", en),
            Marker::Insertion {
                kind: MediaKind::Figure
            }
        );
        assert_eq!(
            parse_marker("$ Plot $", en),
            Marker::Insertion {
                kind: MediaKind::Plot
            }
        );
    }

    #[test]
    fn test_turkish_insertion_vocabulary() {
        let tr = Locale::Tr.table();
        assert_eq!(
            parse_insertion_marker("$ŞEKİL$", tr),
            Some(MediaKind::Figure)
        );
        assert_eq!(parse_insertion_marker("$grafik$", tr), Some(MediaKind::Plot));
        // English-only token is not part of the Turkish vocabulary
        assert_eq!(parse_insertion_marker("$picture$", tr), None);
    }

    #[test]
    fn test_unknown_token_is_text() {
        let en = Locale::En.table();
        assert_eq!(parse_marker("$banana$", en), Marker::None);
    }

    #[test]
    fn test_marker_mid_sentence_not_recognised() {
        let en = Locale::En.table();
        assert_eq!(parse_marker("See $fig$ below", en), Marker::None);
        assert_eq!(parse_marker("as shown --- here ---.", en), Marker::None);
    }

    #[test]
    fn test_equation_with_trailing_text() {
        let en = Locale::En.table();
        assert_eq!(
            parse_marker("$$ F = m a $$ where m is the mass", en),
            Marker::Equation {
                formula: "F = m a".to_string(),
                trailing_text: "where m is the mass".to_string()
            }
        );
    }

    #[test]
    fn test_unbalanced_equation_is_text() {
        let en = Locale::En.table();
        assert_eq!(parse_marker("$$x=1", en), Marker::None);
        assert_eq!(parse_marker("$$  $$", en), Marker::None);
    }
}
