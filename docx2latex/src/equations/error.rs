//! Error type for external equation tools

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one external tool attempt
///
/// Never fatal: the pipeline moves on to the next provider.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool could not be started
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully
    #[error("{tool} exited with {status}: {stderr}")]
    Exit {
        tool: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The tool output contained no recognisable math
    #[error("{tool} produced no recognisable math")]
    Unparseable { tool: String },

    /// The tool reported success but its output file is missing
    #[error("{tool} did not produce {path}", path = .path.display())]
    MissingOutput { tool: String, path: PathBuf },

    /// No PDF-to-image rasterizer is installed
    #[error("No rasterizer available (tried magick, pdftocairo)")]
    NoRasterizer,

    /// Staging files for the tool failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
