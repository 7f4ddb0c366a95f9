//! Equation extraction
//!
//! Two entry points:
//! - textual `$$ ... $$` lines are normalised directly ([`normalize_equation`])
//! - native equation objects go through [`EquationPipeline`]: a formula
//!   source first, then an image renderer, then a textual failure marker

use std::path::{Path, PathBuf};

// Submodules
mod error;
mod normalize;
mod providers;

// Re-export public types
pub use error::ToolError;
pub use normalize::{extract_wrapped_math, normalize_equation};
pub use providers::{
    standalone_source, FormulaRenderer, FormulaSource, LatexRenderer, PandocSource, Rasterizer,
    LATEX_ENGINES,
};

/// Formula rendered when the source converter gave nothing usable
pub const PLACEHOLDER_FORMULA: &str = r"\text{[Equation]}";

/// Body of an emitted equation environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquationBody {
    /// LaTeX math
    Formula(String),
    /// Rendered image, path relative to the output directory
    Image(String),
    /// Nothing worked
    Failed {
        /// No renderer was installed at all
        tools_missing: bool,
    },
}

/// Ordered provider chain for native equations
pub struct EquationPipeline {
    sources: Vec<Box<dyn FormulaSource>>,
    renderers: Vec<Box<dyn FormulaRenderer>>,
    output_dir: PathBuf,
    image_dir: String,
}

impl EquationPipeline {
    /// Build a pipeline from explicit providers
    ///
    /// # Parameters
    /// * `output_dir` - Directory the LaTeX body is written to
    /// * `image_dir` - Equation image directory, relative to `output_dir`
    pub fn new(
        sources: Vec<Box<dyn FormulaSource>>,
        renderers: Vec<Box<dyn FormulaRenderer>>,
        output_dir: &Path,
        image_dir: &str,
    ) -> Self {
        Self {
            sources,
            renderers,
            output_dir: output_dir.to_path_buf(),
            image_dir: image_dir.trim_end_matches('/').to_string(),
        }
    }

    /// Build a pipeline from whatever tools are installed on this host
    pub fn detect(output_dir: &Path, image_dir: &str) -> Self {
        let mut sources: Vec<Box<dyn FormulaSource>> = Vec::new();
        if let Some(pandoc) = PandocSource::detect() {
            log::info!("Equation source: pandoc");
            sources.push(Box::new(pandoc));
        }

        let mut renderers: Vec<Box<dyn FormulaRenderer>> = Vec::new();
        if let Some(latex) = LatexRenderer::detect() {
            log::info!("Equation renderer: {}", latex.name());
            renderers.push(Box::new(latex));
        }

        Self::new(sources, renderers, output_dir, image_dir)
    }

    /// A pipeline with no providers; every native equation fails
    pub fn offline() -> Self {
        Self::new(Vec::new(), Vec::new(), Path::new("."), "assets/equations")
    }

    /// Relative image path for equation `number` (`eq_007.png`)
    pub fn image_link(&self, number: usize) -> String {
        format!("{}/eq_{number:03}.png", self.image_dir)
    }

    /// Extract one native equation
    ///
    /// # Parameters
    /// * `paragraph_xml` - Raw `w:p` of the equation paragraph
    /// * `namespaces` - Root namespaces of the source document
    /// * `number` - Equation number already allocated for this equation
    pub fn extract(&self, paragraph_xml: &str, namespaces: &str, number: usize) -> EquationBody {
        for source in &self.sources {
            match source.formula(paragraph_xml, namespaces) {
                Ok(formula) => return EquationBody::Formula(formula),
                Err(e) => log::info!("Equation {number}: {} failed: {e}", source.name()),
            }
        }

        if self.renderers.is_empty() {
            return EquationBody::Failed {
                tools_missing: true,
            };
        }

        let link = self.image_link(number);
        let target = self.output_dir.join(&link);
        for renderer in &self.renderers {
            match renderer.render(PLACEHOLDER_FORMULA, &target) {
                Ok(()) => return EquationBody::Image(link),
                Err(e) => log::info!("Equation {number}: {} failed: {e}", renderer.name()),
            }
        }

        EquationBody::Failed {
            tools_missing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FixedSource(Result<&'static str, ()>);

    impl FormulaSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn formula(&self, _xml: &str, _ns: &str) -> Result<String, ToolError> {
            self.0.map(str::to_string).map_err(|_| ToolError::Unparseable {
                tool: "fixed".to_string(),
            })
        }
    }

    struct RecordingRenderer {
        succeed: bool,
        seen: RefCell<Vec<PathBuf>>,
    }

    impl FormulaRenderer for RecordingRenderer {
        fn name(&self) -> &str {
            "recording"
        }

        fn render(&self, formula: &str, output: &Path) -> Result<(), ToolError> {
            assert_eq!(formula, PLACEHOLDER_FORMULA);
            self.seen.borrow_mut().push(output.to_path_buf());
            if self.succeed {
                Ok(())
            } else {
                Err(ToolError::NoRasterizer)
            }
        }
    }

    #[test]
    fn test_first_successful_source_wins() {
        // Arrange
        let pipeline = EquationPipeline::new(
            vec![Box::new(FixedSource(Err(()))), Box::new(FixedSource(Ok("x^2")))],
            Vec::new(),
            Path::new("out"),
            "assets/equations",
        );

        // Act
        let body = pipeline.extract("<w:p/>", "", 1);

        // Assert
        assert_eq!(body, EquationBody::Formula("x^2".to_string()));
    }

    #[test]
    fn test_falls_back_to_image() {
        let pipeline = EquationPipeline::new(
            vec![Box::new(FixedSource(Err(())))],
            vec![Box::new(RecordingRenderer {
                succeed: true,
                seen: RefCell::new(Vec::new()),
            })],
            Path::new("out"),
            "assets/equations/",
        );

        let body = pipeline.extract("<w:p/>", "", 7);

        assert_eq!(
            body,
            EquationBody::Image("assets/equations/eq_007.png".to_string())
        );
    }

    #[test]
    fn test_no_tools_is_failure_marker() {
        assert_eq!(
            EquationPipeline::offline().extract("<w:p/>", "", 1),
            EquationBody::Failed {
                tools_missing: true
            }
        );
    }

    #[test]
    fn test_renderer_failure_is_failure_marker() {
        let pipeline = EquationPipeline::new(
            Vec::new(),
            vec![Box::new(RecordingRenderer {
                succeed: false,
                seen: RefCell::new(Vec::new()),
            })],
            Path::new("out"),
            "eq",
        );
        assert_eq!(
            pipeline.extract("<w:p/>", "", 2),
            EquationBody::Failed {
                tools_missing: false
            }
        );
    }
}
