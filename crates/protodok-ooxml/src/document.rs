//! Document content parsing (word/document.xml)
//!
//! Only the top-level paragraphs of `w:body` form the paragraph stream.
//! Paragraphs nested in tables, content controls or text boxes are skipped,
//! as is text belonging to drawings and embedded objects.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::styles::get_attr;

/// A top-level body paragraph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyParagraph {
    /// Style ID (references styles.xml)
    pub style_id: Option<String>,
    /// Visible text: `w:t` content, tabs as `\t`, line breaks as `\n`
    pub text: String,
}

/// The paragraph stream of a parsed `word/document.xml`
#[derive(Debug, Clone, Default)]
pub struct DocumentBody {
    /// Paragraphs in document order
    pub paragraphs: Vec<BodyParagraph>,
}

impl DocumentBody {
    /// Parse the body paragraphs from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Don't trim text - preserve whitespace in runs
        reader.config_mut().trim_text(false);

        let mut walker = BodyWalker::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    walker.depth += 1;
                    walker.open(e, walker.depth);
                }
                Ok(Event::Empty(ref e)) => {
                    let level = walker.depth + 1;
                    walker.open(e, level);
                    walker.close(e.local_name().as_ref(), level);
                }
                Ok(Event::End(ref e)) => {
                    walker.close(e.local_name().as_ref(), walker.depth);
                    walker.depth = walker.depth.saturating_sub(1);
                }
                Ok(Event::Text(ref e)) => walker.text(e),
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if walker.body_level.is_none() {
            return Err(OoxmlError::InvalidStructure(
                "document has no w:body element".to_string(),
            ));
        }

        Ok(Self {
            paragraphs: walker.paragraphs,
        })
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Element-depth driven state for the body walk
#[derive(Default)]
struct BodyWalker {
    depth: usize,
    body_level: Option<usize>,
    /// Open top-level paragraph and its element level
    current: Option<(usize, BodyParagraph)>,
    /// Level of an open run inside the current paragraph
    run_level: Option<usize>,
    /// Level of an element whose content is ignored
    skip_level: Option<usize>,
    in_text: bool,
    paragraphs: Vec<BodyParagraph>,
}

impl BodyWalker {
    fn open(&mut self, e: &BytesStart, level: usize) {
        if self.skip_level.is_some() {
            return;
        }

        let name = e.local_name();
        let Some((para_level, para)) = self.current.as_mut() else {
            match name.as_ref() {
                b"body" if self.body_level.is_none() => self.body_level = Some(level),
                b"p" if self.body_level.map(|b| b + 1) == Some(level) => {
                    self.current = Some((level, BodyParagraph::default()));
                }
                _ => {}
            }
            return;
        };

        match name.as_ref() {
            b"pStyle" if level == *para_level + 2 => {
                para.style_id = get_attr(e, b"w:val");
            }
            // Text boxes, shapes and embedded objects carry their own paragraphs
            b"drawing" | b"pict" | b"object" | b"txbxContent" => self.skip_level = Some(level),
            b"r" => self.run_level = Some(level),
            b"t" if self.run_level.is_some() => self.in_text = true,
            b"tab" if self.run_level.is_some() => para.text.push('\t'),
            b"br" | b"cr" if self.run_level.is_some() => {
                let kind = get_attr(e, b"w:type");
                if !matches!(kind.as_deref(), Some("page" | "column")) {
                    para.text.push('\n');
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8], level: usize) {
        if let Some(skip) = self.skip_level {
            if skip == level {
                self.skip_level = None;
            }
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" if self.run_level == Some(level) => self.run_level = None,
            b"p" => {
                if let Some((para_level, _)) = self.current {
                    if para_level == level {
                        if let Some((_, para)) = self.current.take() {
                            self.paragraphs.push(para);
                        }
                        self.run_level = None;
                        self.in_text = false;
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, e: &BytesText) {
        if !self.in_text || self.skip_level.is_some() {
            return;
        }
        if let Some((_, para)) = self.current.as_mut() {
            let text = e.unescape().unwrap_or_default();
            para.text.push_str(&text);
        }
    }
}
