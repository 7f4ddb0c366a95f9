//! Caption-line recognition and bounded neighbourhood lookups
//!
//! Everything here is a pure function over a read-only window of the block
//! list. Functions report which blocks a caption would swallow; applying
//! that to the conversion state is the engine's job.

use crate::document::{Block, BlockId};
use crate::locale::LocaleTable;
use crate::text::clean_line;
use regex::Regex;
use std::collections::HashSet;

/// Blocks inspected after a caption line when looking for its visual
const LOOKAHEAD: usize = 4;

/// Visual kind a caption line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionKind {
    /// Inline picture
    Figure,
    /// Table
    Table,
}

/// A caption found in the neighbourhood of a visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionMatch {
    /// Caption text without the user's own label and number
    pub text: String,
    /// Blocks that must not be emitted as body text anymore
    pub consumed: Vec<BlockId>,
}

/// Recogniser for "Label N[.M][: text]" lines of one locale
#[derive(Debug, Clone)]
pub struct CaptionMatcher {
    figure: Regex,
    table: Regex,
}

impl CaptionMatcher {
    /// Build the matcher for a locale's caption words
    pub fn new(locale: &LocaleTable) -> Self {
        Self {
            figure: label_regex(locale.figure_caption_words),
            table: label_regex(locale.table_caption_words),
        }
    }

    /// Parse a caption-shaped line into its kind and trailing text
    ///
    /// The user's own number is discarded; captions are renumbered on output.
    pub fn parse(&self, line: &str) -> Option<(CaptionKind, String)> {
        let line = clean_line(line);
        if line.is_empty() {
            return None;
        }
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");

        [(CaptionKind::Figure, &self.figure), (CaptionKind::Table, &self.table)]
            .into_iter()
            .find_map(|(kind, regex)| {
                regex
                    .captures(&collapsed)
                    .map(|caps| (kind, caps.get(1).map_or("", |m| m.as_str()).trim().to_string()))
            })
    }

    /// Whether a line looks like any caption line
    pub fn is_caption_line(&self, line: &str) -> bool {
        self.parse(line).is_some()
    }
}

fn label_regex(words: &[&str]) -> Regex {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?i)^(?:{alternatives})\.?\s*\d+(?:[\.\-]\d+)*\s*[:\-\.\)]?\s*(.*)$");
    Regex::new(&pattern).expect("valid caption label regex")
}

/// Cleaned text of a paragraph block at `j`, empty when out of range or a table
fn paragraph_text_at(blocks: &[Block], j: usize) -> String {
    blocks.get(j).map(Block::paragraph_text).unwrap_or_default()
}

/// Complete a caption found at block `j`
///
/// When the caption line carries no text, the paragraph right after it is
/// taken as the caption text, unless that paragraph is a caption line too.
pub fn caption_with_continuation(
    blocks: &[Block],
    j: usize,
    text: String,
    matcher: &CaptionMatcher,
    consumed: &HashSet<BlockId>,
) -> CaptionMatch {
    let mut result = CaptionMatch {
        text,
        consumed: vec![blocks[j].id],
    };

    if result.text.is_empty() {
        let next = paragraph_text_at(blocks, j + 1);
        let next_free = blocks
            .get(j + 1)
            .is_some_and(|b| !consumed.contains(&b.id));
        if !next.is_empty() && next_free && !matcher.is_caption_line(&next) {
            result.text = next;
            result.consumed.push(blocks[j + 1].id);
        }
    }

    result
}

/// Look for a caption of kind `want` right before, then right after block `i`
///
/// The previous block wins when both neighbours are caption lines. Blocks
/// already in `consumed` are never taken twice.
pub fn collect_caption_around(
    blocks: &[Block],
    i: usize,
    want: CaptionKind,
    matcher: &CaptionMatcher,
    consumed: &HashSet<BlockId>,
) -> Option<CaptionMatch> {
    let candidates = [i.checked_sub(1), Some(i + 1)];

    for j in candidates.into_iter().flatten() {
        let Some(block) = blocks.get(j) else {
            continue;
        };
        if consumed.contains(&block.id) {
            continue;
        }
        let text = block.paragraph_text();
        if text.is_empty() {
            continue;
        }
        if let Some((kind, caption)) = matcher.parse(&text) {
            if kind == want {
                return Some(caption_with_continuation(blocks, j, caption, matcher, consumed));
            }
        }
    }

    None
}

/// Whether a visual of `kind` follows block `i` within the lookahead window
///
/// Tables: blank paragraphs are skipped, any text stops the search.
/// Figures: the first blank paragraph holding a picture qualifies; tables in
/// between are stepped over.
pub fn visual_follows(blocks: &[Block], i: usize, kind: CaptionKind) -> bool {
    let end = blocks.len().min(i + 1 + LOOKAHEAD);

    for block in blocks.iter().take(end).skip(i + 1) {
        match (kind, block.as_paragraph()) {
            (CaptionKind::Table, None) => return true,
            (CaptionKind::Figure, None) => continue,
            (kind, Some(paragraph)) => {
                if !paragraph.clean_text().is_empty() {
                    return false;
                }
                if kind == CaptionKind::Figure && paragraph.has_inline_image {
                    return true;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    fn matcher(locale: Locale) -> CaptionMatcher {
        CaptionMatcher::new(locale.table())
    }

    fn table_block(index: usize) -> Block {
        Block::table(index, vec![vec!["f".to_string(), "Hz".to_string()]])
    }

    #[test]
    fn test_parse_caption_line_shapes() {
        let m = matcher(Locale::En);
        assert_eq!(
            m.parse("Table 2: Measured frequencies"),
            Some((CaptionKind::Table, "Measured frequencies".to_string()))
        );
        assert_eq!(
            m.parse("Figure 3.1 - Test rig"),
            Some((CaptionKind::Figure, "Test rig".to_string()))
        );
        assert_eq!(
            m.parse("fig.   4)   Spring"),
            Some((CaptionKind::Figure, "Spring".to_string()))
        );
        assert_eq!(m.parse("Table 1:"), Some((CaptionKind::Table, String::new())));
        assert_eq!(m.parse("The table shows"), None);
    }

    #[test]
    fn test_parse_turkish_caption_words() {
        let m = matcher(Locale::Tr);
        assert_eq!(
            m.parse("Tablo 1: Ölçümler"),
            Some((CaptionKind::Table, "Ölçümler".to_string()))
        );
        assert_eq!(
            m.parse("Sekil 2 Düzenek"),
            Some((CaptionKind::Figure, "Düzenek".to_string()))
        );
        // English labels are not caption words in Turkish
        assert_eq!(m.parse("Table 1: x"), None);
    }

    #[test]
    fn test_collect_prefers_previous_block() {
        // Arrange: caption lines on both sides of the table
        let blocks = vec![
            Block::paragraph(0, "Table 1: Before"),
            table_block(1),
            Block::paragraph(2, "Table 2: After"),
        ];
        let consumed = HashSet::new();

        // Act
        let found =
            collect_caption_around(&blocks, 1, CaptionKind::Table, &matcher(Locale::En), &consumed);

        // Assert
        assert_eq!(
            found,
            Some(CaptionMatch {
                text: "Before".to_string(),
                consumed: vec![BlockId(0)],
            })
        );
    }

    #[test]
    fn test_collect_falls_back_to_next_block() {
        let blocks = vec![
            Block::paragraph(0, "Some prose."),
            table_block(1),
            Block::paragraph(2, "Table 7: After"),
        ];
        let found = collect_caption_around(
            &blocks,
            1,
            CaptionKind::Table,
            &matcher(Locale::En),
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(found.text, "After");
        assert_eq!(found.consumed, vec![BlockId(2)]);
    }

    #[test]
    fn test_collect_ignores_wrong_kind() {
        let blocks = vec![Block::paragraph(0, "Figure 1: Rig"), table_block(1)];
        let found = collect_caption_around(
            &blocks,
            1,
            CaptionKind::Table,
            &matcher(Locale::En),
            &HashSet::new(),
        );
        assert_eq!(found, None);
    }

    #[test]
    fn test_empty_caption_takes_plain_continuation() {
        let blocks = vec![
            table_block(0),
            Block::paragraph(1, "Table 1:"),
            Block::paragraph(2, "Spring constants"),
        ];
        let found = collect_caption_around(
            &blocks,
            0,
            CaptionKind::Table,
            &matcher(Locale::En),
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(found.text, "Spring constants");
        assert_eq!(found.consumed, vec![BlockId(1), BlockId(2)]);
    }

    #[test]
    fn test_empty_caption_does_not_swallow_next_caption_line() {
        // Arrange: empty caption followed by another caption-shaped line
        let blocks = vec![
            table_block(0),
            Block::paragraph(1, "Table 1:"),
            Block::paragraph(2, "Table 2: Other"),
        ];

        // Act
        let found = collect_caption_around(
            &blocks,
            0,
            CaptionKind::Table,
            &matcher(Locale::En),
            &HashSet::new(),
        )
        .unwrap();

        // Assert: resolves to an empty caption, second line untouched
        assert_eq!(found.text, "");
        assert_eq!(found.consumed, vec![BlockId(1)]);
    }

    #[test]
    fn test_consumed_blocks_are_not_reused() {
        let blocks = vec![Block::paragraph(0, "Table 1: Used"), table_block(1)];
        let consumed = HashSet::from([BlockId(0)]);
        let found =
            collect_caption_around(&blocks, 1, CaptionKind::Table, &matcher(Locale::En), &consumed);
        assert_eq!(found, None);
    }

    #[test]
    fn test_visual_follows_table_skips_blank_paragraphs() {
        let blocks = vec![
            Block::paragraph(0, "Table 2: Measured"),
            Block::paragraph(1, ""),
            table_block(2),
        ];
        assert!(visual_follows(&blocks, 0, CaptionKind::Table));
    }

    #[test]
    fn test_visual_follows_table_stops_at_text() {
        let blocks = vec![
            Block::paragraph(0, "Table 2: Measured"),
            Block::paragraph(1, "Prose first."),
            table_block(2),
        ];
        assert!(!visual_follows(&blocks, 0, CaptionKind::Table));
    }

    #[test]
    fn test_visual_follows_window_is_bounded() {
        let mut blocks = vec![Block::paragraph(0, "Table 2: Far")];
        for i in 1..=4 {
            blocks.push(Block::paragraph(i, ""));
        }
        blocks.push(table_block(5));
        assert!(!visual_follows(&blocks, 0, CaptionKind::Table));
    }

    #[test]
    fn test_visual_follows_figure_steps_over_tables() {
        let blocks = vec![
            Block::paragraph(0, "Figure 1: Rig"),
            table_block(1),
            Block::image(2),
        ];
        assert!(visual_follows(&blocks, 0, CaptionKind::Figure));
    }

    #[test]
    fn test_visual_follows_figure_needs_picture() {
        let blocks = vec![
            Block::paragraph(0, "Figure 1: Rig"),
            Block::paragraph(1, ""),
            Block::paragraph(2, "Text before any picture."),
            Block::image(3),
        ];
        assert!(!visual_follows(&blocks, 0, CaptionKind::Figure));
    }
}
