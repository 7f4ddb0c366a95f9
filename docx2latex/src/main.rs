//! docx2latex - convert Word lab reports into numbered LaTeX
//!
//! A CLI tool that turns a semi-structured `.docx` report into a LaTeX body
//! and a table-of-contents fragment, and fills cover page templates.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::fn_params_excessive_bools)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use docx2latex::config::{ConvertConfig, CONFIG_FILE_NAME};
use docx2latex::cover::{generate_cover, CoverInfo};
use docx2latex::equations::EquationPipeline;
use docx2latex::locale::Locale;
use docx2latex::pipeline;
use std::path::{Path, PathBuf};

/// Main entry point for the docx2latex CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            lang,
            config,
            output_dir,
            no_figures,
            no_tables,
            no_equations,
            no_bibliography,
            no_plots,
            verbose,
        } => {
            init_logging(verbose);
            let input = pipeline::with_docx_extension(&input);
            let mut config = load_config(&input, config.as_deref())?;
            if let Some(lang) = lang {
                config.language = lang;
            }
            let features = &mut config.features;
            features.figures &= !no_figures;
            features.tables &= !no_tables;
            features.equations &= !no_equations;
            features.bibliography &= !no_bibliography;
            features.plots &= !no_plots;

            handle_convert_command(&input, output_dir, &config)?;
        }

        Commands::InitConfig { path, lang, force } => {
            init_logging(false);
            handle_init_config_command(path, lang, force)?;
        }

        Commands::Cover {
            template,
            info,
            output,
            lang,
        } => {
            init_logging(false);
            handle_cover_command(&template, &info, &output, lang)?;
        }
    }

    Ok(())
}

/// Warnings are always shown; `--verbose` adds progress details
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Load the explicit configuration file, or the one next to the input
fn load_config(input: &Path, explicit: Option<&Path>) -> Result<ConvertConfig> {
    match explicit {
        Some(path) => ConvertConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => {
            let dir = pipeline::document_dir(input);
            ConvertConfig::load_or_default(&dir).with_context(|| {
                format!(
                    "Failed to load {} from {}",
                    CONFIG_FILE_NAME,
                    dir.display()
                )
            })
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &Path,
    output_dir: Option<PathBuf>,
    config: &ConvertConfig,
) -> Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| pipeline::document_dir(input));

    println!("Converting {}", input.display());
    println!("Output: {}", output_dir.display());

    // Stage 1: Read the document
    println!("\n[Stage 1/3] Reading document...");
    let document = pipeline::read_document(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    println!(
        "✓ Read {} paragraphs and {} tables",
        document.paragraph_count(),
        document.table_count()
    );

    // Stage 2: Convert
    println!("\n[Stage 2/3] Converting...");
    let equations = EquationPipeline::detect(&output_dir, &config.output.equations_dir);
    let output = pipeline::convert(
        &document,
        config,
        &pipeline::document_dir(input),
        equations,
    );
    println!(
        "✓ Converted {} sections ({} warnings)",
        output.headings.len(),
        output.diagnostics.len()
    );

    // Stage 3: Write
    println!("\n[Stage 3/3] Writing LaTeX...");
    let files = pipeline::write_outputs(&output, config.language, &output_dir, &config.output)
        .context("Failed to write output files")?;
    println!("✓ Successfully wrote: {}", files.body.display());
    println!("✓ Successfully wrote: {}", files.toc.display());

    println!("\nLanguage: {}", config.language);
    println!("Headings: {}", output.headings.len());
    println!("Features: {}", config.features);
    println!(
        "\nNote: compile the LaTeX document twice so the table of contents page numbers resolve."
    );

    Ok(())
}

/// Handle the init-config command
fn handle_init_config_command(path: Option<PathBuf>, lang: Option<Locale>, force: bool) -> Result<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));
    let target = target_dir.join(CONFIG_FILE_NAME);

    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            target.display()
        );
    }

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create directory {}", target_dir.display()))?;
    }

    let config = ConvertConfig {
        language: lang.unwrap_or_default(),
        ..ConvertConfig::default()
    };
    config
        .save(&target)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("✓ Successfully wrote: {}", target.display());
    Ok(())
}

/// Handle the cover command
fn handle_cover_command(
    template: &Path,
    info_path: &Path,
    output: &Path,
    lang: Option<Locale>,
) -> Result<()> {
    let mut info = CoverInfo::load(info_path)
        .with_context(|| format!("Failed to load cover info {}", info_path.display()))?;
    if let Some(lang) = lang {
        info.language = lang;
    }

    let logo = generate_cover(template, &info, output)
        .with_context(|| format!("Failed to generate cover from {}", template.display()))?;

    println!(
        "✓ Successfully wrote: {} (lang = {}, logo = {})",
        output.display(),
        info.language,
        logo
    );
    Ok(())
}
