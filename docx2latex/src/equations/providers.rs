//! External tool providers for native equations
//!
//! Each provider wraps one host tool behind a uniform attempt contract.
//! Scratch files live in a [`TempDir`] that is removed when the attempt
//! returns, whether it succeeded or not.

use super::error::ToolError;
use super::normalize::extract_wrapped_math;
use crate::document::single_paragraph_docx;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// LaTeX engines in order of preference
pub const LATEX_ENGINES: [&str; 2] = ["xelatex", "pdflatex"];

/// Turns one native equation paragraph into LaTeX math
pub trait FormulaSource {
    /// Tool name for diagnostics
    fn name(&self) -> &str;

    /// Convert the raw `w:p` XML (with its document namespaces) to a formula
    fn formula(&self, paragraph_xml: &str, namespaces: &str) -> Result<String, ToolError>;
}

/// Renders a formula to a PNG image
pub trait FormulaRenderer {
    /// Tool chain name for diagnostics
    fn name(&self) -> &str;

    /// Render `formula` as display math into `output`
    fn render(&self, formula: &str, output: &Path) -> Result<(), ToolError>;
}

/// Run a command and fail on a non-zero exit
fn run(tool: &str, command: &mut Command) -> Result<Output, ToolError> {
    log::debug!("Running {:?}", command);
    let output = command.output().map_err(|source| ToolError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ToolError::Exit {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

/// Document-to-formula conversion through pandoc
#[derive(Debug, Clone)]
pub struct PandocSource {
    program: PathBuf,
}

impl PandocSource {
    /// Locate pandoc on `PATH`
    pub fn detect() -> Option<Self> {
        which::which("pandoc")
            .ok()
            .map(|program| Self { program })
    }
}

impl FormulaSource for PandocSource {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn formula(&self, paragraph_xml: &str, namespaces: &str) -> Result<String, ToolError> {
        let scratch = TempDir::new()?;
        let mini = scratch.path().join("mini.docx");
        single_paragraph_docx(&mini, namespaces, paragraph_xml)?;

        let output = run(
            self.name(),
            Command::new(&self.program)
                .arg(&mini)
                .args(["-f", "docx", "-t", "latex", "--wrap=none"]),
        )?;

        let fragment = String::from_utf8_lossy(&output.stdout);
        extract_wrapped_math(&fragment).ok_or_else(|| ToolError::Unparseable {
            tool: self.name().to_string(),
        })
    }
}

/// PDF-to-PNG rasterizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rasterizer {
    /// ImageMagick `magick`
    Magick(PathBuf),
    /// Poppler `pdftocairo`
    Pdftocairo(PathBuf),
}

impl Rasterizer {
    /// First installed rasterizer, `magick` preferred
    pub fn detect() -> Option<Self> {
        which::which("magick")
            .ok()
            .map(Rasterizer::Magick)
            .or_else(|| which::which("pdftocairo").ok().map(Rasterizer::Pdftocairo))
    }

    fn rasterize(&self, pdf: &Path, output: &Path) -> Result<(), ToolError> {
        match self {
            Rasterizer::Magick(program) => {
                run(
                    "magick",
                    Command::new(program)
                        .args(["-density", "300"])
                        .arg(pdf)
                        .args(["-trim", "+repage"])
                        .arg(output),
                )?;
            }
            Rasterizer::Pdftocairo(program) => {
                let prefix = output.with_extension("");
                run(
                    "pdftocairo",
                    Command::new(program)
                        .args(["-png", "-r", "300"])
                        .arg(pdf)
                        .arg(&prefix),
                )?;

                let mut produced = prefix.into_os_string();
                produced.push("-1.png");
                let produced = PathBuf::from(produced);
                if !produced.exists() {
                    return Err(ToolError::MissingOutput {
                        tool: "pdftocairo".to_string(),
                        path: produced,
                    });
                }
                if std::fs::rename(&produced, output).is_err() {
                    std::fs::copy(&produced, output)?;
                    std::fs::remove_file(&produced)?;
                }
            }
        }

        if output.exists() {
            Ok(())
        } else {
            Err(ToolError::MissingOutput {
                tool: "rasterizer".to_string(),
                path: output.to_path_buf(),
            })
        }
    }
}

/// Standalone LaTeX document for one display formula
pub fn standalone_source(formula: &str) -> String {
    format!(
        "\\documentclass[border=2pt]{{standalone}}\n\
         \\usepackage{{amsmath,amssymb}}\n\
         \\begin{{document}}\n\
         \\[\n{formula}\n\\]\n\
         \\end{{document}}\n"
    )
}

/// LaTeX engine plus rasterizer chain
#[derive(Debug, Clone)]
pub struct LatexRenderer {
    engine: PathBuf,
    engine_name: &'static str,
    rasterizer: Option<Rasterizer>,
}

impl LatexRenderer {
    /// First installed LaTeX engine, with the first installed rasterizer
    ///
    /// Returns `None` when no engine is installed at all.
    pub fn detect() -> Option<Self> {
        LATEX_ENGINES.iter().find_map(|name| {
            which::which(name).ok().map(|engine| Self {
                engine,
                engine_name: *name,
                rasterizer: Rasterizer::detect(),
            })
        })
    }
}

impl FormulaRenderer for LatexRenderer {
    fn name(&self) -> &str {
        self.engine_name
    }

    fn render(&self, formula: &str, output: &Path) -> Result<(), ToolError> {
        let scratch = TempDir::new()?;
        let tex = scratch.path().join("eq.tex");
        let pdf = scratch.path().join("eq.pdf");
        std::fs::write(&tex, standalone_source(formula))?;

        run(
            self.engine_name,
            Command::new(&self.engine)
                .args(["-interaction=nonstopmode", "-halt-on-error"])
                .arg(&tex)
                .current_dir(scratch.path()),
        )?;
        if !pdf.exists() {
            return Err(ToolError::MissingOutput {
                tool: self.engine_name.to_string(),
                path: pdf,
            });
        }

        let rasterizer = self.rasterizer.as_ref().ok_or(ToolError::NoRasterizer)?;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        rasterizer.rasterize(&pdf, output)
    }
}
