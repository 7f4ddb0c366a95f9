//! Recoverable conversion diagnostics
//!
//! Every diagnostic is logged as a warning in the document language and kept
//! in the conversion result. None of them stops the conversion.

use crate::locale::LocaleTable;
use crate::markers::MediaKind;

/// A recoverable problem found while converting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `$fig$` / `$plot$` with no caption delimiter after it
    MarkerWithoutCaption { kind: MediaKind },
    /// No backing file for an image or plot index
    MissingAsset { kind: MediaKind, index: usize },
    /// A table with neither a pending nor a neighbouring caption (skipped)
    TableWithoutCaption,
    /// A second table caption arrived before the first was used
    TableCaptionOverwritten { previous: String },
    /// A heading arrived while a table caption was still pending
    StaleTableCaption { caption: String },
    /// A heading arrived while a figure caption was still pending
    StaleFigureCaption { caption: String },
    /// Tables are disabled but a captioned table was found
    TableCaptionDisabled { caption: String },
    /// The document ended with a table caption still pending
    TableCaptionUnused { caption: String },
    /// An inline picture had no caption anywhere near it
    FigureWithoutCaption { index: usize },
    /// No equation converter or renderer is installed
    EquationToolsMissing { number: usize },
    /// Every equation tool failed
    EquationRenderFailed { number: usize },
}

impl Diagnostic {
    /// Human-readable message in the document language
    pub fn message(&self, locale: &LocaleTable) -> String {
        let messages = &locale.messages;
        match self {
            Diagnostic::MarkerWithoutCaption { kind } => {
                let marker = match kind {
                    MediaKind::Figure => "$fig$",
                    MediaKind::Plot => "$plot$",
                };
                messages.marker_without_caption.replace("{marker}", marker)
            }
            Diagnostic::MissingAsset { kind, index } => messages
                .missing_asset
                .replace("{stem}", &crate::assets::AssetResolver::stem(*kind, *index)),
            Diagnostic::TableWithoutCaption => messages.table_without_caption.to_string(),
            Diagnostic::TableCaptionOverwritten { previous } => {
                messages.table_caption_overwritten.replace("{caption}", previous)
            }
            Diagnostic::StaleTableCaption { caption } => {
                messages.stale_table_caption.replace("{caption}", caption)
            }
            Diagnostic::StaleFigureCaption { caption } => {
                messages.stale_figure_caption.replace("{caption}", caption)
            }
            Diagnostic::TableCaptionDisabled { caption } => {
                messages.table_caption_disabled.replace("{caption}", caption)
            }
            Diagnostic::TableCaptionUnused { caption } => {
                messages.table_caption_unused.replace("{caption}", caption)
            }
            Diagnostic::FigureWithoutCaption { index } => messages
                .figure_without_caption
                .replace("{index}", &index.to_string()),
            Diagnostic::EquationToolsMissing { number } => messages
                .equation_tools_missing
                .replace("{number}", &number.to_string()),
            Diagnostic::EquationRenderFailed { number } => messages
                .equation_render_failed
                .replace("{number}", &number.to_string()),
        }
    }
}
