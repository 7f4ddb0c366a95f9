//! Block-stream conversion engine
//!
//! A single forward pass over the document blocks. Each block is handled by
//! exactly one branch, in this priority order:
//!
//! 1. blocks already swallowed as captions are skipped
//! 2. tables
//! 3. empty paragraphs holding a native equation
//! 4. empty paragraphs holding a picture
//! 5. native list items
//! 6. caption delimiters (`--- text ---`)
//! 7. insertion markers (`$fig$`, `$plot$`)
//! 8. `$$ ... $$` equation lines
//! 9. upper-case section headings
//! 10. "Table N: ..." / "Figure N: ..." lines right before their visual
//! 11. ordinary text
//!
//! All mutable state lives in [`ConversionState`]; lookarounds are pure
//! functions in [`crate::captions`].

use crate::assets::AssetResolver;
use crate::captions::{
    caption_with_continuation, collect_caption_around, visual_follows, CaptionKind,
    CaptionMatcher,
};
use crate::config::{ConvertConfig, Features};
use crate::diagnostics::Diagnostic;
use crate::document::{BlockKind, Document, ListKind, Paragraph, Table};
use crate::equations::{normalize_equation, EquationBody, EquationPipeline};
use crate::locale::LocaleTable;
use crate::markers::{parse_marker, Marker, MediaKind, SENTINEL};
use crate::numbering::{format_caption, Counters, SectionNumber};
use crate::text::{prose, split_manual_line_breaks};
use crate::toc::TocEntry;
use std::path::Path;

// Submodules
mod headings;
mod markup;
mod state;

// Re-export public types
pub use headings::{heading_title, is_bibliography_heading, is_heading};
pub use state::{ConversionState, LastKind, PendingMedia};

/// Result of converting one document
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Body markup lines
    pub lines: Vec<String>,
    /// Detected headings, for the TOC
    pub headings: Vec<TocEntry>,
    /// Recoverable problems, in order of occurrence
    pub diagnostics: Vec<Diagnostic>,
    /// Final counter values
    pub counters: Counters,
}

impl ConversionOutput {
    /// Body markup as one string
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

/// The conversion engine with its read-only context
pub struct Converter {
    locale: &'static LocaleTable,
    features: Features,
    assets: AssetResolver,
    equations: EquationPipeline,
    matcher: CaptionMatcher,
}

impl Converter {
    /// Create a converter
    ///
    /// # Parameters
    /// * `config` - Language, features and asset lookup settings
    /// * `base_dir` - Directory of the source document (asset links are relative to it)
    /// * `equations` - Provider chain for native equations
    pub fn new(config: &ConvertConfig, base_dir: &Path, equations: EquationPipeline) -> Self {
        let locale = config.language.table();
        Self {
            locale,
            features: config.features,
            assets: AssetResolver::new(base_dir, &config.assets),
            equations,
            matcher: CaptionMatcher::new(locale),
        }
    }

    /// Convert a whole document
    pub fn convert(&self, doc: &Document) -> ConversionOutput {
        let mut state = ConversionState::new();
        let start = doc.content_start();
        log::info!(
            "Converting blocks {}..{} ({})",
            start,
            doc.blocks.len(),
            self.locale.code
        );

        for i in start..doc.blocks.len() {
            self.step(&mut state, doc, i);
        }
        self.finish(&mut state);

        ConversionOutput {
            lines: state.out,
            headings: state.headings,
            diagnostics: state.diagnostics,
            counters: state.counters,
        }
    }

    /// Handle block `i`
    pub fn step(&self, state: &mut ConversionState, doc: &Document, i: usize) {
        let Some(block) = doc.blocks.get(i) else {
            return;
        };
        if state.consumed.contains(&block.id) {
            return;
        }

        match &block.kind {
            BlockKind::Table(table) => self.on_table(state, doc, i, table),
            BlockKind::Paragraph(paragraph) => self.on_paragraph(state, doc, i, paragraph),
        }
    }

    /// Close everything still open at the end of the stream
    pub fn finish(&self, state: &mut ConversionState) {
        state.native_list.close(&mut state.out);
        state.tight_list.end();
        self.flush_pending_media(state);

        if let Some(caption) = state.pending_table_caption.take() {
            if self.features.tables {
                self.diagnose(state, Diagnostic::TableCaptionUnused { caption });
            }
        }
    }

    fn diagnose(&self, state: &mut ConversionState, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic.message(self.locale));
        state.diagnostics.push(diagnostic);
    }

    fn close_native_list(&self, state: &mut ConversionState) {
        if state.native_list.close(&mut state.out) {
            state.last_kind = LastKind::Text;
            state.open_sentence = None;
        }
    }

    fn caption_label(&self, kind: MediaKind) -> &'static str {
        match kind {
            MediaKind::Figure => self.locale.figure_label,
            MediaKind::Plot => self.locale.plot_label,
        }
    }

    fn emit_figure(&self, state: &mut ConversionState, link: &str, kind: MediaKind, caption: Option<&str>) {
        state.terminate_open_sentence();
        state.space_after_heading();
        state.emit_all(markup::figure_lines(link, kind, caption));
        state.last_kind = LastKind::Figure;
    }

    /// Emit marker-announced media without a caption
    fn flush_pending_media(&self, state: &mut ConversionState) {
        if let Some(media) = state.pending_media.take() {
            self.diagnose(state, Diagnostic::MarkerWithoutCaption { kind: media.kind });
            self.emit_figure(state, &media.link, media.kind, None);
        }
    }

    fn on_table(&self, state: &mut ConversionState, doc: &Document, i: usize, table: &Table) {
        self.close_native_list(state);
        state.tight_list.end();

        if !self.features.tables {
            if let Some(caption) = state.pending_table_caption.take() {
                self.diagnose(state, Diagnostic::TableCaptionDisabled { caption });
            }
            return;
        }
        if state.in_bibliography {
            return;
        }

        self.flush_pending_media(state);

        // A pending caption wins even when empty
        let caption = match state.pending_table_caption.take() {
            Some(text) => Some(text),
            None => collect_caption_around(
                &doc.blocks,
                i,
                CaptionKind::Table,
                &self.matcher,
                &state.consumed,
            )
            .map(|found| {
                state.consume(found.consumed);
                found.text
            }),
        };

        let Some(caption) = caption else {
            self.diagnose(state, Diagnostic::TableWithoutCaption);
            return;
        };

        let number = state.counters.next_table();
        let caption = format_caption(self.locale.table_label, self.locale.casing, number, &caption);

        state.terminate_open_sentence();
        state.space_after_heading();
        state.emit_all(markup::table_lines(table, &caption));
        state.last_kind = LastKind::Table;
    }

    fn on_paragraph(&self, state: &mut ConversionState, doc: &Document, i: usize, paragraph: &Paragraph) {
        let text = paragraph.clean_text();

        if text.is_empty() {
            if state.in_bibliography {
                return;
            }
            if paragraph.has_native_equation && self.features.equations {
                self.on_native_equation(state, doc, paragraph);
            } else if paragraph.has_inline_image && self.features.figures {
                self.on_inline_image(state, doc, i);
            }
            return;
        }

        if state.in_bibliography {
            if is_heading(&text, self.locale) {
                self.on_heading(state, &text);
            } else {
                self.on_bibliography_entry(state, &text);
            }
            return;
        }

        if let Some(kind) = paragraph.list {
            if text != SENTINEL {
                self.on_list_item(state, kind, &text);
                return;
            }
        }
        self.close_native_list(state);

        match parse_marker(&text, self.locale) {
            Marker::Caption { text } => self.on_caption_delimiter(state, text),
            Marker::Insertion { kind } => self.on_insertion(state, kind),
            Marker::Equation {
                formula,
                trailing_text,
            } => self.on_text_equation(state, &formula, &trailing_text),
            Marker::None => {
                if is_heading(&text, self.locale) {
                    self.on_heading(state, &text);
                } else if !self.on_auto_caption(state, doc, i, &text) {
                    self.on_text(state, paragraph, &text);
                }
            }
        }
    }

    fn on_native_equation(&self, state: &mut ConversionState, doc: &Document, paragraph: &Paragraph) {
        self.close_native_list(state);
        self.flush_pending_media(state);

        let number = state.counters.next_equation();
        let body = match paragraph.xml.as_deref() {
            Some(xml) => self.equations.extract(xml, &doc.namespaces, number),
            None => EquationBody::Failed {
                tools_missing: false,
            },
        };
        match body {
            EquationBody::Failed { tools_missing: true } => {
                self.diagnose(state, Diagnostic::EquationToolsMissing { number })
            }
            EquationBody::Failed {
                tools_missing: false,
            } => self.diagnose(state, Diagnostic::EquationRenderFailed { number }),
            _ => {}
        }

        self.open_equation(state);
        state.emit_all(markup::equation_lines(number, markup::equation_body_line(&body)));
        state.emit(r"\par");
        state.last_kind = LastKind::Equation;
    }

    /// Sentence termination and spacing before an equation environment
    fn open_equation(&self, state: &mut ConversionState) {
        state.terminate_open_sentence();
        if matches!(
            state.last_kind,
            LastKind::Heading | LastKind::Table | LastKind::Figure
        ) {
            state.emit(r"\par");
        }
    }

    fn on_inline_image(&self, state: &mut ConversionState, doc: &Document, i: usize) {
        self.close_native_list(state);
        self.flush_pending_media(state);

        let index = state.counters.next_image_index();
        let pending_caption = state.pending_figure_caption.take();
        let Some(link) = self.assets.resolve(MediaKind::Figure, index) else {
            self.diagnose(
                state,
                Diagnostic::MissingAsset {
                    kind: MediaKind::Figure,
                    index,
                },
            );
            return;
        };

        let number = state.counters.next_figure();
        let caption = match pending_caption {
            Some(text) => Some(text),
            None => collect_caption_around(
                &doc.blocks,
                i,
                CaptionKind::Figure,
                &self.matcher,
                &state.consumed,
            )
            .map(|found| {
                state.consume(found.consumed);
                found.text
            }),
        };

        let caption = match caption {
            Some(text) => Some(format_caption(
                self.locale.figure_label,
                self.locale.casing,
                number,
                &text,
            )),
            None => {
                self.diagnose(state, Diagnostic::FigureWithoutCaption { index });
                None
            }
        };

        self.emit_figure(state, &link, MediaKind::Figure, caption.as_deref());
    }

    fn on_list_item(&self, state: &mut ConversionState, kind: ListKind, text: &str) {
        self.flush_pending_media(state);
        state.native_list.item(kind, &prose(text), &mut state.out);
        state.last_kind = LastKind::Text;
        state.open_sentence = None;
    }

    fn on_caption_delimiter(&self, state: &mut ConversionState, text: String) {
        if let Some(media) = state.pending_media.take() {
            let caption = format_caption(
                self.caption_label(media.kind),
                self.locale.casing,
                media.number,
                &text,
            );
            self.emit_figure(state, &media.link, media.kind, Some(&caption));
            return;
        }

        if let Some(previous) = state.pending_table_caption.replace(text) {
            self.diagnose(state, Diagnostic::TableCaptionOverwritten { previous });
        }
    }

    fn on_insertion(&self, state: &mut ConversionState, kind: MediaKind) {
        self.flush_pending_media(state);

        let enabled = match kind {
            MediaKind::Figure => self.features.figures,
            MediaKind::Plot => self.features.plots,
        };
        if !enabled {
            return;
        }

        let index = match kind {
            MediaKind::Figure => state.counters.next_image_index(),
            MediaKind::Plot => state.counters.next_plot_index(),
        };
        let Some(link) = self.assets.resolve(kind, index) else {
            self.diagnose(state, Diagnostic::MissingAsset { kind, index });
            return;
        };

        let number: SectionNumber = match kind {
            MediaKind::Figure => state.counters.next_figure(),
            MediaKind::Plot => state.counters.next_plot(),
        };
        log::debug!("Marker {:?} {} -> {}", kind, number, link);
        state.pending_media = Some(PendingMedia { kind, link, number });
    }

    fn on_text_equation(&self, state: &mut ConversionState, formula: &str, trailing_text: &str) {
        self.flush_pending_media(state);
        if !self.features.equations {
            return;
        }

        let body = normalize_equation(formula);
        if body.is_empty() {
            return;
        }

        let number = state.counters.next_equation();
        self.open_equation(state);
        state.emit_all(markup::equation_lines(number, body));

        if trailing_text.is_empty() {
            state.emit(r"\par");
            state.last_kind = LastKind::Equation;
        } else {
            state.push_paragraph(prose(trailing_text));
        }
    }

    fn on_heading(&self, state: &mut ConversionState, text: &str) {
        self.flush_pending_media(state);
        self.close_native_list(state);
        state.tight_list.end();

        if let Some(caption) = state.pending_table_caption.take() {
            self.diagnose(state, Diagnostic::StaleTableCaption { caption });
        }
        if let Some(caption) = state.pending_figure_caption.take() {
            self.diagnose(state, Diagnostic::StaleFigureCaption { caption });
        }

        state.in_bibliography =
            self.features.bibliography && is_bibliography_heading(text, self.locale);
        if state.in_bibliography {
            state.bib_counter = 0;
        }

        state.terminate_open_sentence();

        let number = state.counters.start_section();
        let title = heading_title(text, self.locale);
        state.emit_all(markup::heading_lines(number, &title));
        state.headings.push(TocEntry { number, title });
        state.last_kind = LastKind::Heading;
    }

    /// Swallow a "Table N: ..." / "Figure N: ..." line that precedes its visual
    fn on_auto_caption(&self, state: &mut ConversionState, doc: &Document, i: usize, text: &str) -> bool {
        let Some((kind, caption)) = self.matcher.parse(text) else {
            return false;
        };
        let enabled = match kind {
            CaptionKind::Table => self.features.tables,
            CaptionKind::Figure => self.features.figures,
        };
        if !enabled || !visual_follows(&doc.blocks, i, kind) {
            return false;
        }

        let found = caption_with_continuation(&doc.blocks, i, caption, &self.matcher, &state.consumed);
        state.consume(found.consumed);

        match kind {
            CaptionKind::Table => {
                if state.pending_table_caption.is_none() {
                    state.pending_table_caption = Some(found.text);
                }
            }
            CaptionKind::Figure => {
                if !found.text.is_empty() {
                    state.pending_figure_caption = Some(found.text);
                }
            }
        }
        true
    }

    fn on_bibliography_entry(&self, state: &mut ConversionState, text: &str) {
        state.bib_counter += 1;
        state.emit(format!(r"[{}] {}\par", state.bib_counter, prose(text)));
        state.last_kind = LastKind::Text;
        state.open_sentence = None;
    }

    fn on_text(&self, state: &mut ConversionState, paragraph: &Paragraph, text: &str) {
        self.flush_pending_media(state);

        if paragraph.text.contains('\n') {
            for part in split_manual_line_breaks(&paragraph.text) {
                if part != SENTINEL {
                    state.push_paragraph(prose(&part));
                }
            }
            return;
        }

        if crate::lists::is_tight_list_trigger(text) {
            state.push_paragraph(prose(text));
            state.tight_list.start();
            return;
        }

        if state.tight_list.accepts(text) {
            state.emit(crate::lists::tight_item_line(&prose(text)));
            state.last_kind = LastKind::Text;
            state.open_sentence = None;
            return;
        }

        state.push_paragraph(prose(text));
    }
}
