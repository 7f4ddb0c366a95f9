//! End-to-end conversion of real `.docx` archives

use docx2latex::config::ConvertConfig;
use docx2latex::diagnostics::Diagnostic;
use docx2latex::document::{BlockKind, Document, ListKind};
use docx2latex::equations::EquationPipeline;
use docx2latex::locale::Locale;
use docx2latex::pipeline;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math""#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="ListNumber"><w:name w:val="List Number"/></w:style><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/></w:style></w:styles>"#;

fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

fn list_para(style: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{style}"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
    )
}

fn cell(text: &str) -> String {
    format!("<w:tc>{}</w:tc>", para(text))
}

fn table(rows: &[&[&str]]) -> String {
    let rows = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| cell(c)).collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect::<String>();
    format!("<w:tbl>{rows}</w:tbl>")
}

fn write_docx(path: &Path, body: &[String]) {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document {NAMESPACES}><w:body>{}</w:body></w:document>"#,
        body.concat()
    );

    let file = std::fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn touch(dir: &Path, rel: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"png").unwrap();
}

fn report_body() -> Vec<String> {
    vec![
        para("Lab Report 3"),
        para("---"),
        para("INTRODUCTION"),
        para("The spring was stretched"),
        para("$plot$"),
        para("--- Displacement vs. time ---"),
        para("Table 2: Measured frequencies"),
        table(&[&["Mode", "f (Hz)"], &["1", "13.65"]]),
        list_para("ListNumber", "first step"),
        list_para("ListNumber", "second step"),
        r#"<w:p><m:oMathPara><m:oMath><m:r><m:t>x=1</m:t></m:r></m:oMath></m:oMathPara></w:p>"#
            .to_string(),
        para("$$ ω = 2π f $$"),
        para("APPENDIX"),
        para("Rao, S. Mechanical Vibrations"),
        para("$fig$"),
        para("Inman, D. Engineering Vibration"),
    ]
}

#[test]
fn test_reader_builds_block_stream() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.docx");
    write_docx(&input, &report_body());

    // Act
    let document = Document::open(&input).unwrap();

    // Assert
    assert_eq!(document.blocks.len(), 16);
    assert_eq!(document.content_start(), 2);
    assert_eq!(document.table_count(), 1);
    match &document.blocks[7].kind {
        BlockKind::Table(t) => assert_eq!(t.rows[1], vec!["1", "13.65"]),
        other => panic!("expected a table, got {other:?}"),
    }
    let item = document.blocks[8].as_paragraph().unwrap();
    assert_eq!(item.list, Some(ListKind::Numbered));
    let equation = document.blocks[10].as_paragraph().unwrap();
    assert!(equation.has_native_equation);
    assert_eq!(equation.text, "");
    assert!(equation.xml.as_deref().unwrap().contains("m:oMath"));
    assert!(document.namespaces.contains("xmlns:m="));
}

#[test]
fn test_convert_full_report() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.docx");
    write_docx(&input, &report_body());
    touch(dir.path(), "assets/plots/plot1.png");
    let out_dir = dir.path().join("out");

    // Act
    let report = pipeline::run(
        &input,
        &out_dir,
        &ConvertConfig::default(),
        EquationPipeline::offline(),
    )
    .unwrap();

    // Assert
    let body = std::fs::read_to_string(out_dir.join("content.tex")).unwrap();
    assert!(!body.contains("Lab Report 3"));
    assert!(body.contains(r"\section*{1. INTRODUCTION}"));
    assert!(body.contains("The spring was stretched.\n"));
    assert!(body.contains(r"\caption*{Plot 1.1: Displacement vs. time.}"));
    assert!(body.contains(r"\includegraphics[width=0.7\textwidth]{assets/plots/plot1.png}"));
    assert!(body.contains(r"\caption*{Table 1.1: Measured frequencies.}"));
    assert!(!body.contains("Table 2"));
    assert!(body.contains("\\begin{enumerate}\n\\item first step\n\\item second step\n\\end{enumerate}"));
    assert!(body.contains("\\tag{1}\n\\text{[Equation rendering failed]}"));
    assert!(body.contains("\\tag{2}\n\\omega = 2\\pi f"));
    assert!(body.contains(r"\section*{2. APPENDIX}"));
    assert!(body.contains(r"[1] Rao, S. Mechanical Vibrations\par"));
    assert!(body.contains(r"[2] \$fig\$\par"));
    assert!(body.contains(r"[3] Inman, D. Engineering Vibration\par"));

    let toc = std::fs::read_to_string(out_dir.join("toc.tex")).unwrap();
    assert!(toc.contains(r"\hyperref[sec:1]{1. INTRODUCTION}"));
    assert!(toc.contains(r"\hyperref[sec:2]{2. APPENDIX}"));

    assert_eq!(report.output.counters.plot_global, 1);
    assert_eq!(report.output.counters.equation_no, 2);
    assert_eq!(
        report.output.diagnostics,
        vec![Diagnostic::EquationToolsMissing { number: 1 }]
    );
}

#[test]
fn test_convert_with_features_disabled() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.docx");
    write_docx(&input, &report_body());
    let mut config = ConvertConfig::default();
    config.features.tables = false;
    config.features.figures = false;
    config.features.equations = false;
    config.features.plots = false;
    config.features.bibliography = false;

    // Act
    let report = pipeline::run(&input, dir.path(), &config, EquationPipeline::offline()).unwrap();

    // Assert
    let body = report.output.body();
    assert!(!body.contains("tabularx"));
    assert!(!body.contains(r"\begin{equation}"));
    assert!(!body.contains("includegraphics"));
    assert!(body.contains("Rao, S. Mechanical Vibrations"));
    assert!(!body.contains("[1] Rao"));
    assert_eq!(report.output.counters.plot_global, 0);
    assert_eq!(report.output.counters.image_global, 0);
}

#[test]
fn test_turkish_report() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rapor.docx");
    write_docx(
        &input,
        &[
            para("GİRİŞ"),
            para("Tablo 1: Ölçülen frekanslar"),
            table(&[&["Mod", "f"], &["1", "2"]]),
            para("KAYNAKÇA"),
            para("Rao, S."),
        ],
    );
    let config = ConvertConfig {
        language: Locale::Tr,
        ..ConvertConfig::default()
    };

    // Act
    let report = pipeline::run(&input, dir.path(), &config, EquationPipeline::offline()).unwrap();

    // Assert
    let body = report.output.body();
    assert!(body.contains(r"\caption*{Tablo 1.1: Ölçülen frekanslar.}"));
    assert!(body.contains(r"[1] Rao, S.\par"));
    let toc = std::fs::read_to_string(dir.path().join("toc.tex")).unwrap();
    assert!(toc.starts_with(r"\section*{İçindekiler}"));
}

#[test]
fn test_missing_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = pipeline::run(
        &dir.path().join("nope.docx"),
        dir.path(),
        &ConvertConfig::default(),
        EquationPipeline::offline(),
    );
    assert!(result.is_err());
}
