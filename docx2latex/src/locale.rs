//! Locale vocabulary and casing rules
//!
//! All language-dependent words (caption labels, marker tokens, section names,
//! cover labels) live in one static table per locale. The table is selected
//! once when a conversion starts; the rest of the crate never branches on the
//! language itself.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported document languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Turkish
    Tr,
}

impl Locale {
    /// Get the vocabulary table for this locale
    pub fn table(self) -> &'static LocaleTable {
        match self {
            Locale::En => &EN,
            Locale::Tr => &TR,
        }
    }

    /// Short language code (`en` / `tr`)
    pub fn code(self) -> &'static str {
        self.table().code
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Letter casing rule of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// Default Unicode case mapping
    Unicode,
    /// Turkish dotted/dotless i handling (`i` <-> `İ`, `ı` <-> `I`)
    Turkish,
}

impl Casing {
    /// Upper-case a string
    pub fn upper(self, s: &str) -> String {
        match self {
            Casing::Unicode => s.to_uppercase(),
            Casing::Turkish => s
                .chars()
                .map(|c| match c {
                    'i' => 'İ'.to_string(),
                    'ı' => 'I'.to_string(),
                    other => other.to_uppercase().collect(),
                })
                .collect(),
        }
    }

    /// Upper-case the first character only
    pub fn capitalize_first(self, s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => self.upper(&first.to_string()) + chars.as_str(),
        }
    }

    /// Fold a string for case-insensitive token comparison
    ///
    /// Dotted capital `İ` folds to a plain `i` so `$ŞEKİL$` and `$şekil$`
    /// compare equal; ASCII tokens fold the same way in every locale.
    pub fn fold(self, s: &str) -> String {
        s.chars()
            .map(|c| match c {
                'İ' => "i".to_string(),
                other => other.to_lowercase().collect(),
            })
            .collect()
    }
}

/// Labels substituted into the cover-page template
#[derive(Debug)]
pub struct CoverLabels {
    pub department_name: &'static str,
    pub report_type: &'static str,
    pub prepared_by: &'static str,
    pub name_surname: &'static str,
    pub student_id: &'static str,
    pub submission_date: &'static str,
}

/// Diagnostic message templates
///
/// Placeholders: `{marker}`, `{stem}`, `{caption}`, `{index}`, `{number}`.
#[derive(Debug)]
pub struct DiagnosticMessages {
    pub marker_without_caption: &'static str,
    pub missing_asset: &'static str,
    pub table_without_caption: &'static str,
    pub table_caption_overwritten: &'static str,
    pub stale_table_caption: &'static str,
    pub stale_figure_caption: &'static str,
    pub table_caption_disabled: &'static str,
    pub table_caption_unused: &'static str,
    pub figure_without_caption: &'static str,
    pub equation_tools_missing: &'static str,
    pub equation_render_failed: &'static str,
}

/// Vocabulary for one locale
#[derive(Debug)]
pub struct LocaleTable {
    /// Language code
    pub code: &'static str,
    /// Caption label for inline figures
    pub figure_label: &'static str,
    /// Caption label for plots
    pub plot_label: &'static str,
    /// Caption label for tables
    pub table_label: &'static str,
    /// Words accepted as the label of a figure caption line ("Figure 2: ...")
    pub figure_caption_words: &'static [&'static str],
    /// Words accepted as the label of a table caption line ("Table 1: ...")
    pub table_caption_words: &'static [&'static str],
    /// Insertion-marker tokens meaning "insert the next image"
    pub figure_tokens: &'static [&'static str],
    /// Insertion-marker tokens meaning "insert the next plot"
    pub plot_tokens: &'static [&'static str],
    /// Heading text that opens the bibliography section
    pub bibliography_heading: &'static str,
    /// Title of the table-of-contents fragment
    pub toc_title: &'static str,
    /// Casing rule used for heading detection and caption capitalisation
    pub casing: Casing,
    /// Cover page labels
    pub cover: CoverLabels,
    /// Warning texts
    pub messages: DiagnosticMessages,
}

static EN: LocaleTable = LocaleTable {
    code: "en",
    figure_label: "Figure",
    plot_label: "Plot",
    table_label: "Table",
    figure_caption_words: &["Figure", "Fig"],
    table_caption_words: &["Table", "Tab"],
    figure_tokens: &["fig", "figure", "image", "picture", "photo"],
    plot_tokens: &["plot", "grafik"],
    bibliography_heading: "APPENDIX",
    toc_title: "Index",
    casing: Casing::Unicode,
    cover: CoverLabels {
        department_name: "Mechanical Engineering",
        report_type: "Lab Report",
        prepared_by: "Prepared by",
        name_surname: "Name Surname",
        student_id: "Student ID",
        submission_date: "Submission Date",
    },
    messages: DiagnosticMessages {
        marker_without_caption: "Found {marker} marker but no --- caption --- below it. Inserted without caption.",
        missing_asset: "{stem} not found. Skipped.",
        table_without_caption: "Found a table without a caption. Table skipped. (Write --- ... --- before the table)",
        table_caption_overwritten: "New table caption came before the previous one was used. Skipped: '{caption}'",
        stale_table_caption: "A heading appeared but there was a pending table caption (not used): '{caption}'",
        stale_figure_caption: "A heading appeared but there was a pending figure caption (not used): '{caption}'",
        table_caption_disabled: "Tables are disabled but a caption+table was found. Caption skipped: '{caption}'",
        table_caption_unused: "Table caption found but no table followed: '{caption}'",
        figure_without_caption: "No caption found for image{index}. Inserted without caption.",
        equation_tools_missing: "Equation {number}: no converter or LaTeX engine available, placeholder emitted.",
        equation_render_failed: "Equation {number}: rendering failed, placeholder emitted.",
    },
};

static TR: LocaleTable = LocaleTable {
    code: "tr",
    figure_label: "Şekil",
    plot_label: "Grafik",
    table_label: "Tablo",
    figure_caption_words: &["Şekil", "Sekil"],
    table_caption_words: &["Tablo"],
    figure_tokens: &[
        "fig", "şekil", "sekil", "görsel", "gorsel", "resim", "foto", "fotograf", "fotoğraf",
    ],
    plot_tokens: &["grafik", "plot"],
    bibliography_heading: "KAYNAKÇA",
    toc_title: "İçindekiler",
    casing: Casing::Turkish,
    cover: CoverLabels {
        department_name: "Makine Mühendisliği",
        report_type: "Deney Raporu",
        prepared_by: "Hazırlayan(lar)",
        name_surname: "Ad Soyad",
        student_id: "Öğr. No",
        submission_date: "Teslim Tarihi",
    },
    messages: DiagnosticMessages {
        marker_without_caption: "{marker} bulundu ama altında --- caption --- yok. Captionsız basıldı.",
        missing_asset: "{stem} bulunamadı. Atlandı.",
        table_without_caption: "Caption olmadan tablo bulundu. Tablo atlandı. (Tablodan önce: --- ... --- yaz)",
        table_caption_overwritten: "Önceki tablo caption kullanılmadan yenisi geldi. Önceki atlandı: '{caption}'",
        stale_table_caption: "Başlık geldi ama bekleyen tablo caption vardı (kullanılmadı): '{caption}'",
        stale_figure_caption: "Başlık geldi ama bekleyen şekil caption vardı (kullanılmadı): '{caption}'",
        table_caption_disabled: "Tablo kapalı ama caption + tablo bulundu. Caption atlandı: '{caption}'",
        table_caption_unused: "Tablo caption bulundu ama ardından tablo gelmedi: '{caption}'",
        figure_without_caption: "image{index} için caption bulunamadı. Captionsız basıldı.",
        equation_tools_missing: "Denklem {number}: dönüştürücü/LaTeX motoru yok, yer tutucu basıldı.",
        equation_render_failed: "Denklem {number}: görüntüye dönüştürülemedi, yer tutucu basıldı.",
    },
};
