//! Streaming `.docx` body reader
//!
//! Walks `word/document.xml` with quick-xml and turns every top-level body
//! child into one [`Block`]. Paragraphs nested in tables become cell text;
//! text inside math objects is excluded from paragraph text.

use super::block::{Block, ListKind, Paragraph};
use super::error::ReadError;
use super::Document;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use zip::read::ZipArchive;
use zip::result::ZipError;

/// Style-id to display-name map from `word/styles.xml`
#[derive(Debug, Clone, Default)]
pub struct StyleNames(HashMap<String, String>);

impl StyleNames {
    /// Resolve a style id to its display name (falls back to the id)
    pub fn resolve<'a>(&'a self, style_id: &'a str) -> &'a str {
        self.0.get(style_id).map_or(style_id, String::as_str)
    }
}

/// Read a `.docx` archive from disk
pub(super) fn read_docx(path: &Path) -> Result<Document, ReadError> {
    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|e| ReadError::Io(path.to_path_buf(), e))?;
    let mut archive = ZipArchive::new(file)?;

    let document_xml = read_part(&mut archive, "word/document.xml", path)?;
    let styles = match read_part(&mut archive, "word/styles.xml", path) {
        Ok(xml) => parse_styles_xml(&xml)?,
        Err(ReadError::Zip(ZipError::FileNotFound)) => StyleNames::default(),
        Err(e) => return Err(e),
    };

    let document = parse_document_xml(&document_xml, &styles)?;
    log::info!(
        "Read {} blocks ({} paragraphs, {} tables) from {}",
        document.blocks.len(),
        document.paragraph_count(),
        document.table_count(),
        path.display()
    );
    Ok(document)
}

fn read_part(
    archive: &mut ZipArchive<std::fs::File>,
    name: &str,
    path: &Path,
) -> Result<String, ReadError> {
    let mut part = archive.by_name(name)?;
    let mut contents = String::new();
    part.read_to_string(&mut contents)
        .map_err(|e| ReadError::Io(path.to_path_buf(), e))?;
    Ok(contents)
}

/// Parse `word/styles.xml` into a style-name map
pub fn parse_styles_xml(xml: &str) -> Result<StyleNames, ReadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut names = HashMap::new();
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) => match local_name(e.name().as_ref()) {
                b"style" => current_id = attr_value(e, b"styleId"),
                b"name" => {
                    if let (Some(id), Some(name)) = (current_id.as_ref(), attr_value(e, b"val")) {
                        names.insert(id.clone(), name);
                    }
                }
                _ => {}
            },
            Event::End(ref e) if local_name(e.name().as_ref()) == b"style" => current_id = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(StyleNames(names))
}

/// Parse the body of `word/document.xml` into blocks
pub fn parse_document_xml(xml: &str, styles: &StyleNames) -> Result<Document, ReadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut body = BodyParser::new(styles);

    loop {
        let before = reader.buffer_position();
        match reader.read_event()? {
            Event::Start(ref e) => body.open(e, before, false),
            Event::Empty(ref e) => body.open(e, before, true),
            Event::Text(ref t) => {
                if body.in_text() {
                    if let Ok(text) = t.unescape() {
                        body.push_text(&text);
                    }
                }
            }
            Event::End(ref e) => body.close(local_name(e.name().as_ref()), xml, reader.buffer_position()),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Document {
        blocks: body.blocks,
        namespaces: body.namespaces,
    })
}

/// Paragraph being collected
#[derive(Default)]
struct ParagraphBuilder {
    text: String,
    has_equation: bool,
    has_image: bool,
    has_numbering: bool,
    style_id: Option<String>,
    start: usize,
}

/// Streaming state of the body walk
struct BodyParser<'s> {
    styles: &'s StyleNames,
    blocks: Vec<Block>,
    namespaces: String,
    in_body: bool,
    table_depth: usize,
    paragraph_depth: usize,
    math_depth: usize,
    text_depth: usize,
    paragraph: ParagraphBuilder,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell_paragraphs: Vec<String>,
    cell_span: usize,
}

impl<'s> BodyParser<'s> {
    fn new(styles: &'s StyleNames) -> Self {
        Self {
            styles,
            blocks: Vec::new(),
            namespaces: String::new(),
            in_body: false,
            table_depth: 0,
            paragraph_depth: 0,
            math_depth: 0,
            text_depth: 0,
            paragraph: ParagraphBuilder::default(),
            rows: Vec::new(),
            row: Vec::new(),
            cell_paragraphs: Vec::new(),
            cell_span: 1,
        }
    }

    fn in_text(&self) -> bool {
        self.text_depth > 0 && self.math_depth == 0
    }

    fn push_text(&mut self, text: &str) {
        if self.paragraph_depth > 0 {
            self.paragraph.text.push_str(text);
        }
    }

    fn open(&mut self, e: &BytesStart, position: usize, empty: bool) {
        match local_name(e.name().as_ref()) {
            b"document" => self.namespaces = namespace_declarations(e),
            b"body" => self.in_body = !empty,
            b"p" if self.in_body => {
                if self.paragraph_depth == 0 {
                    self.paragraph = ParagraphBuilder {
                        start: position,
                        ..ParagraphBuilder::default()
                    };
                }
                if empty {
                    if self.paragraph_depth == 0 {
                        self.finish_paragraph(None);
                    }
                } else {
                    self.paragraph_depth += 1;
                }
            }
            b"tbl" if self.in_body && !empty => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.rows.clear();
                }
            }
            b"tr" if self.table_depth == 1 && !empty => self.row.clear(),
            b"tc" if self.table_depth == 1 && !empty => {
                self.cell_paragraphs.clear();
                self.cell_span = 1;
            }
            b"gridSpan" if self.table_depth == 1 => {
                self.cell_span = attr_value(e, b"val")
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .max(1);
            }
            b"t" if !empty && is_word_prefix(e.name().as_ref()) => self.text_depth += 1,
            b"tab" if self.math_depth == 0 => self.push_text("\t"),
            b"br" | b"cr" if self.math_depth == 0 => self.push_text("\n"),
            b"oMath" | b"oMathPara" => {
                self.paragraph.has_equation = true;
                if !empty {
                    self.math_depth += 1;
                }
            }
            b"drawing" | b"pict" | b"imagedata" => self.paragraph.has_image = true,
            b"numPr" => self.paragraph.has_numbering = true,
            b"pStyle" if self.paragraph.style_id.is_none() => {
                self.paragraph.style_id = attr_value(e, b"val");
            }
            _ => {}
        }
    }

    fn close(&mut self, local: &[u8], xml: &str, position: usize) {
        match local {
            b"body" => self.in_body = false,
            b"t" if self.text_depth > 0 => self.text_depth -= 1,
            b"oMath" | b"oMathPara" if self.math_depth > 0 => self.math_depth -= 1,
            b"p" if self.paragraph_depth > 0 => {
                self.paragraph_depth -= 1;
                if self.paragraph_depth == 0 {
                    let raw = xml.get(self.paragraph.start..position);
                    self.finish_paragraph(raw);
                }
            }
            b"tc" if self.table_depth == 1 => {
                let text = self.cell_paragraphs.join("\n");
                for _ in 0..self.cell_span {
                    self.row.push(text.clone());
                }
            }
            b"tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.row);
                self.rows.push(row);
            }
            b"tbl" if self.table_depth > 0 => {
                self.table_depth -= 1;
                if self.table_depth == 0 {
                    self.finish_table();
                }
            }
            _ => {}
        }
    }

    fn finish_paragraph(&mut self, raw_xml: Option<&str>) {
        let paragraph = std::mem::take(&mut self.paragraph);

        if self.table_depth > 0 {
            self.cell_paragraphs.push(paragraph.text);
            return;
        }

        let list = paragraph.has_numbering.then(|| {
            let style = paragraph
                .style_id
                .as_deref()
                .map(|id| self.styles.resolve(id).to_lowercase())
                .unwrap_or_default();
            list_kind_for_style(&style)
        });

        let xml = if paragraph.has_equation {
            raw_xml.map(str::to_string)
        } else {
            None
        };

        let index = self.blocks.len();
        self.blocks.push(Block::with_paragraph(
            index,
            Paragraph {
                text: paragraph.text,
                has_native_equation: paragraph.has_equation,
                has_inline_image: paragraph.has_image,
                list,
                xml,
            },
        ));
    }

    fn finish_table(&mut self) {
        let mut rows = std::mem::take(&mut self.rows);
        let columns = rows.first().map_or(0, Vec::len);
        for row in rows.iter_mut() {
            row.resize(columns, String::new());
        }
        let index = self.blocks.len();
        self.blocks.push(Block::table(index, rows));
    }
}

/// Decide list style from a lower-cased paragraph style name
fn list_kind_for_style(style: &str) -> ListKind {
    if ["number", "numara", "enumer"]
        .iter()
        .any(|needle| style.contains(needle))
    {
        ListKind::Numbered
    } else {
        ListKind::Bulleted
    }
}

fn split_tag_name(name: &[u8]) -> (Option<&[u8]>, &[u8]) {
    match name.iter().position(|b| *b == b':') {
        Some(idx) => (Some(&name[..idx]), &name[idx + 1..]),
        None => (None, name),
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    split_tag_name(name).1
}

/// `w:t` carries run text; `m:t` (math) and other prefixes do not
fn is_word_prefix(name: &[u8]) -> bool {
    !matches!(split_tag_name(name).0, Some(b"m"))
}

fn attr_value(element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .with_checks(false)
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Collect the `xmlns:*` declarations of the root element verbatim
fn namespace_declarations(element: &BytesStart) -> String {
    element
        .attributes()
        .with_checks(false)
        .flatten()
        .filter(|attr| attr.key.as_ref().starts_with(b"xmlns"))
        .map(|attr| {
            format!(
                "{}=\"{}\"",
                String::from_utf8_lossy(attr.key.as_ref()),
                String::from_utf8_lossy(&attr.value)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
