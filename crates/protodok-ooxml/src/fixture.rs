//! Minimal DOCX builder
//!
//! Produces small but valid DOCX packages from a list of styled paragraphs.
//! Used by the test suites of this workspace and handy for demos.
//!
//! ```
//! use protodok_ooxml::{fixture::DocxFixture, read_document};
//! use std::io::Cursor;
//!
//! let bytes = DocxFixture::new()
//!     .heading1("Population")
//!     .body("Adults aged 65 and over")
//!     .build()?;
//!
//! let document = read_document(Cursor::new(bytes))?;
//! assert_eq!(document.paragraphs[0].style, "Heading 1");
//! # Ok::<(), protodok_ooxml::OoxmlError>(())
//! ```

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::archive::{DOCUMENT_PART, STYLES_PART};
use crate::error::Result;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

/// Styles as Word writes them: built-in names are stored lowercase
pub const FIXTURE_STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:outlineLvl w:val="0"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="heading 2"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:outlineLvl w:val="1"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading3">
    <w:name w:val="heading 3"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:outlineLvl w:val="2"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Title">
    <w:name w:val="Title"/>
    <w:basedOn w:val="Normal"/>
  </w:style>
  <w:style w:type="character" w:styleId="Strong">
    <w:name w:val="Strong"/>
  </w:style>
</w:styles>"#;

/// Builder for an in-memory DOCX package
#[derive(Debug, Clone, Default)]
pub struct DocxFixture {
    body: Vec<String>,
    without_styles: bool,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph with an optional `w:pStyle` style ID
    pub fn paragraph(mut self, style_id: Option<&str>, text: &str) -> Self {
        let ppr = style_id
            .map(|id| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, escape(id)))
            .unwrap_or_default();
        let run = if text.is_empty() {
            String::new()
        } else {
            format!(
                r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape(text)
            )
        };
        self.body.push(format!("<w:p>{}{}</w:p>", ppr, run));
        self
    }

    pub fn heading1(self, text: &str) -> Self {
        self.paragraph(Some("Heading1"), text)
    }

    pub fn heading2(self, text: &str) -> Self {
        self.paragraph(Some("Heading2"), text)
    }

    /// Body paragraph with the default style
    pub fn body(self, text: &str) -> Self {
        self.paragraph(None, text)
    }

    /// Append a raw XML fragment to `w:body`
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push(xml.to_string());
        self
    }

    /// Leave `word/styles.xml` out of the package
    pub fn without_styles(mut self) -> Self {
        self.without_styles = true;
        self
    }

    /// The `word/document.xml` content
    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>{}<w:sectPr/></w:body>
</w:document>"#,
            self.body.concat()
        )
    }

    /// Build the package bytes
    pub fn build(&self) -> Result<Vec<u8>> {
        self.build_filtered(None)
    }

    /// Build the package without one of its parts
    pub fn build_without(&self, part: &str) -> Result<Vec<u8>> {
        self.build_filtered(Some(part))
    }

    /// Build and write the package to a file
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.build()?)?;
        Ok(())
    }

    fn build_filtered(&self, skip: Option<&str>) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let document = self.document_xml();
        let mut parts: Vec<(&str, &str)> = vec![
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS),
            (DOCUMENT_PART, document.as_str()),
        ];
        if !self.without_styles {
            parts.push((STYLES_PART, FIXTURE_STYLES));
        }

        for (name, content) in parts {
            if Some(name) == skip {
                continue;
            }
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()?;
        Ok(buffer.into_inner())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
