//! Minimal standalone `.docx` writer
//!
//! Wraps one raw paragraph into the smallest archive a document converter
//! accepts: content types, package relationships and a `document.xml` that
//! reuses the namespaces of the source document.

use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const WORD_NAMESPACE: &str =
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

/// Write a single-paragraph `.docx` to `path`
///
/// # Parameters
/// * `path` - Destination archive path
/// * `namespaces` - Root namespace declarations of the source document
/// * `paragraph_xml` - Raw `w:p` element
pub fn single_paragraph_docx(
    path: &Path,
    namespaces: &str,
    paragraph_xml: &str,
) -> std::io::Result<()> {
    let namespaces = if namespaces.trim().is_empty() {
        WORD_NAMESPACE
    } else {
        namespaces
    };
    let document_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document {namespaces}><w:body>{paragraph_xml}</w:body></w:document>"#
    );

    let file = std::fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document_xml.as_str()),
    ] {
        zip.start_file(name, options).map_err(std::io::Error::other)?;
        zip.write_all(contents.as_bytes())?;
    }

    zip.finish().map_err(std::io::Error::other)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use tempfile::TempDir;

    #[test]
    fn test_single_paragraph_docx_reads_back() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eq.docx");

        // Act
        single_paragraph_docx(&path, "", "<w:p><w:r><w:t>hello</w:t></w:r></w:p>").unwrap();
        let doc = Document::open(&path).unwrap();

        // Assert
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].paragraph_text(), "hello");
    }
}
