//! docx2latex - convert semi-structured Word reports into LaTeX bodies
//!
//! The conversion is a single forward pass over the paragraphs and tables of
//! a `.docx` document. Inline markers (`$fig$`, `--- caption ---`,
//! `$$ formula $$`), upper-case headings and "Table N: ..." lines drive the
//! numbering of sections, figures, plots, tables and equations.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod assets;
pub mod captions;
pub mod config;
pub mod cover;
pub mod diagnostics;
pub mod document;
pub mod engine;
pub mod equations;
pub mod lists;
pub mod locale;
pub mod markers;
pub mod numbering;
pub mod pipeline;
pub mod text;
pub mod toc;
