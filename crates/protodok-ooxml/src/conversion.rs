//! Conversion from OOXML types to the protodok paragraph stream
//!
//! Resolves each body paragraph's style ID to the style's UI name and
//! produces a [`protodok_core::Document`].

use std::io::{Read, Seek};
use std::path::Path;

use protodok_core::{Document, Paragraph};
use tracing::{debug, warn};

use crate::archive::OoxmlArchive;
use crate::document::{BodyParagraph, DocumentBody};
use crate::error::Result;
use crate::styles::{humanize_style_id, StyleSheet};

/// Context for conversion, holding style information
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionContext<'a> {
    /// Style sheet for resolving style names
    pub styles: Option<&'a StyleSheet>,
}

impl<'a> ConversionContext<'a> {
    /// Create a new context without styles
    pub fn new() -> Self {
        Self { styles: None }
    }

    /// Create a context with style information
    pub fn with_styles(styles: &'a StyleSheet) -> Self {
        Self {
            styles: Some(styles),
        }
    }

    /// Style name for a paragraph
    ///
    /// Without a style sheet the raw ID is made readable ("Heading1" →
    /// "Heading 1") and unstyled paragraphs are "Normal".
    pub fn style_name(&self, style_id: Option<&str>) -> String {
        match self.styles {
            Some(styles) => styles.paragraph_style_name(style_id),
            None => style_id
                .map(humanize_style_id)
                .unwrap_or_else(|| "Normal".to_string()),
        }
    }

    pub fn paragraph(&self, paragraph: &BodyParagraph) -> Paragraph {
        Paragraph::new(
            self.style_name(paragraph.style_id.as_deref()),
            paragraph.text.clone(),
        )
    }

    pub fn document(&self, body: &DocumentBody) -> Document {
        body.paragraphs.iter().map(|p| self.paragraph(p)).collect()
    }
}

/// Build the paragraph stream of an unpacked archive
pub fn convert_archive(archive: &OoxmlArchive) -> Result<Document> {
    let body = DocumentBody::parse(archive.document_xml()?)?;

    let styles = match archive.styles_xml() {
        Some(xml) => Some(StyleSheet::parse(xml)?),
        None => {
            warn!("Document has no styles part; using raw style IDs");
            None
        }
    };

    let ctx = match styles.as_ref() {
        Some(styles) => ConversionContext::with_styles(styles),
        None => ConversionContext::new(),
    };

    let document = ctx.document(&body);
    debug!("Read {} body paragraphs", document.len());
    Ok(document)
}

/// Read a DOCX from any seekable reader
pub fn read_document<R: Read + Seek>(reader: R) -> Result<Document> {
    convert_archive(&OoxmlArchive::from_reader(reader)?)
}

/// Open a DOCX file and read its paragraph stream
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    convert_archive(&OoxmlArchive::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FIXTURE_STYLES;

    fn body() -> DocumentBody {
        DocumentBody {
            paragraphs: vec![
                BodyParagraph {
                    style_id: Some("Heading1".into()),
                    text: "Abstract".into(),
                },
                BodyParagraph {
                    style_id: None,
                    text: "Population: adults".into(),
                },
            ],
        }
    }

    #[test]
    fn test_convert_with_styles() {
        let styles = StyleSheet::parse(FIXTURE_STYLES.as_bytes()).unwrap();
        let doc = ConversionContext::with_styles(&styles).document(&body());

        assert_eq!(
            doc.paragraphs,
            vec![
                Paragraph::new("Heading 1", "Abstract"),
                Paragraph::new("Normal", "Population: adults"),
            ]
        );
    }

    #[test]
    fn test_convert_without_styles() {
        let doc = ConversionContext::new().document(&body());
        assert_eq!(doc.paragraphs[0].style, "Heading 1");
        assert_eq!(doc.paragraphs[1].style, "Normal");
    }
}
