//! Style definitions parsing (word/styles.xml)
//!
//! Paragraphs reference styles by ID (`Heading1`), while users and heading
//! classification work with display names (`Heading 1`). This module parses
//! the style definitions and resolves one to the other.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// Collection of styles from a document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// All styles, keyed by style ID
    styles: HashMap<String, Style>,
    /// Default paragraph style ID
    pub default_paragraph: Option<String>,
}

/// A Word style definition
#[derive(Debug, Clone)]
pub struct Style {
    /// Style ID (used in document references)
    pub id: String,
    /// Display name as stored (built-in names are lowercase, e.g. "heading 1")
    pub name: String,
    /// Style type
    pub style_type: StyleType,
    /// Base style ID (for inheritance)
    pub based_on: Option<String>,
}

/// Type of style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl Style {
    /// Name as shown in the word processor's UI
    pub fn ui_name(&self) -> String {
        ui_name(&self.name)
    }
}

impl StyleSheet {
    /// Parse styles from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stylesheet = StyleSheet::default();
        let mut buf = Vec::new();
        let mut current_style: Option<StyleBuilder> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"style" => {
                    stylesheet.finish(style_builder(e));
                }
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"style" => current_style = Some(style_builder(e)),
                        b"name" => {
                            if let Some(style) = current_style.as_mut() {
                                style.name = get_attr(e, b"w:val");
                            }
                        }
                        b"basedOn" => {
                            if let Some(style) = current_style.as_mut() {
                                style.based_on = get_attr(e, b"w:val");
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"style" {
                        if let Some(builder) = current_style.take() {
                            stylesheet.finish(builder);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(stylesheet)
    }

    fn finish(&mut self, builder: StyleBuilder) {
        let is_default = builder.is_default;
        if let Some(style) = builder.build() {
            if is_default && style.style_type == StyleType::Paragraph {
                self.default_paragraph = Some(style.id.clone());
            }
            self.styles.insert(style.id.clone(), style);
        }
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// UI name of the paragraph style a paragraph resolves to
    ///
    /// A missing or unknown style ID falls back to the default paragraph
    /// style, as word processors do; with no default declared the name is
    /// "Normal".
    pub fn paragraph_style_name(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.get(id))
            .or_else(|| self.default_paragraph.as_deref().and_then(|id| self.get(id)))
            .map(|style| style.ui_name())
            .unwrap_or_else(|| "Normal".to_string())
    }
}

#[derive(Default)]
struct StyleBuilder {
    id: Option<String>,
    name: Option<String>,
    style_type: Option<StyleType>,
    based_on: Option<String>,
    is_default: bool,
}

fn style_builder(e: &BytesStart) -> StyleBuilder {
    let style_type = get_attr(e, b"w:type").map(|t| match t.as_str() {
        "character" => StyleType::Character,
        "table" => StyleType::Table,
        "numbering" => StyleType::Numbering,
        _ => StyleType::Paragraph,
    });

    StyleBuilder {
        id: get_attr(e, b"w:styleId"),
        style_type,
        is_default: matches!(get_attr(e, b"w:default").as_deref(), Some("1" | "true")),
        ..StyleBuilder::default()
    }
}

impl StyleBuilder {
    fn build(self) -> Option<Style> {
        let id = self.id?;
        Some(Style {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            style_type: self.style_type.unwrap_or(StyleType::Paragraph),
            based_on: self.based_on,
        })
    }
}

/// Display name for a stored style name
///
/// Word stores built-in style names in lowercase ("heading 1", "title") and
/// shows them capitalised; custom names are shown as stored.
pub fn ui_name(stored: &str) -> String {
    let mut chars = stored.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => stored.to_string(),
    }
}

/// Readable name for a bare style ID ("Heading1" → "Heading 1")
///
/// Used when a package has no styles part to resolve against.
pub fn humanize_style_id(style_id: &str) -> String {
    let split = style_id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    match split {
        Some(i) if i > 0 && !style_id[..i].ends_with(' ') => {
            format!("{} {}", ui_name(&style_id[..i]), &style_id[i..])
        }
        _ => ui_name(style_id),
    }
}

pub(crate) fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}
