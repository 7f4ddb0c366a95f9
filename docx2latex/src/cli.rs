//! Command-line interface definitions for docx2latex

use clap::{Parser, Subcommand};
use docx2latex::locale::Locale;
use std::path::PathBuf;

/// CLI structure for the docx2latex application
#[derive(Parser)]
#[command(name = "docx2latex")]
#[command(version)]
#[command(about = "Convert Word lab reports into numbered LaTeX", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for docx2latex
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a .docx report into content.tex and toc.tex
    Convert {
        /// Input document (".docx" is appended when the extension is missing)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Document language (overrides the configuration file)
        #[arg(short, long, value_enum)]
        lang: Option<Locale>,

        /// Configuration file (defaults to docx2latex.toml next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Do not convert inline pictures and figure markers
        #[arg(long)]
        no_figures: bool,

        /// Do not convert tables
        #[arg(long)]
        no_tables: bool,

        /// Do not convert equations
        #[arg(long)]
        no_equations: bool,

        /// Do not number bibliography entries
        #[arg(long)]
        no_bibliography: bool,

        /// Do not insert plots
        #[arg(long)]
        no_plots: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a default docx2latex.toml
    InitConfig {
        /// Directory to write into (defaults to current directory)
        path: Option<PathBuf>,

        /// Document language
        #[arg(short, long, value_enum)]
        lang: Option<Locale>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Fill a cover page template
    Cover {
        /// LaTeX template with <<KEY>> placeholders
        #[arg(short, long)]
        template: PathBuf,

        /// TOML file with course, title, date and group members
        #[arg(short, long)]
        info: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "cover.tex")]
        output: PathBuf,

        /// Cover language (overrides the info file)
        #[arg(short, long, value_enum)]
        lang: Option<Locale>,
    },
}
