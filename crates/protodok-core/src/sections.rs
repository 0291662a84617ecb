//! Section extraction
//!
//! Splits the paragraph stream into `(heading, body)` pairs in a single
//! forward walk. The body of a section is the newline-joined, trimmed text of
//! every non-heading paragraph up to the next heading. Empty paragraphs are
//! kept as empty lines.
//!
//! The ABSTRACT section is never emitted here; its content is consumed by
//! [`crate::abstract_labels`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::heading::{HeadingClassifier, StyleClassifier};
use crate::model::Document;
use crate::vocabulary::Vocabulary;

/// A heading name and the body text that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, trimmed, original case
    pub heading: String,
    /// Newline-joined body lines
    pub body: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// Extract sections using the default style classifier and vocabulary
pub fn extract_sections(document: &Document) -> Vec<Section> {
    extract_sections_with(document, &StyleClassifier::default(), &Vocabulary::default())
}

/// Extract sections with a custom classifier and vocabulary
///
/// Paragraphs that precede the first heading belong to no section and are
/// dropped. A document without any heading yields an empty list.
pub fn extract_sections_with<C>(
    document: &Document,
    classifier: &C,
    vocabulary: &Vocabulary,
) -> Vec<Section>
where
    C: HeadingClassifier + ?Sized,
{
    let mut sections = Vec::new();
    let mut current_heading: Option<&str> = None;
    let mut lines: Vec<&str> = Vec::new();

    for (index, paragraph) in document.paragraphs().enumerate() {
        if classifier.is_heading_at(index, paragraph) {
            if let Some(heading) = current_heading {
                flush(&mut sections, heading, &lines, vocabulary);
            }
            current_heading = Some(paragraph.text.as_str());
            lines.clear();
        } else {
            lines.push(paragraph.text.trim());
        }
    }

    if let Some(heading) = current_heading {
        flush(&mut sections, heading, &lines, vocabulary);
    }

    sections
}

fn flush(sections: &mut Vec<Section>, heading: &str, lines: &[&str], vocabulary: &Vocabulary) {
    // An empty heading paragraph ends the previous section but opens none
    if heading.is_empty() {
        debug!("Dropping body of empty heading ({} lines)", lines.len());
        return;
    }
    if vocabulary.is_abstract(heading) {
        debug!("Skipping abstract section body ({} lines)", lines.len());
        return;
    }
    sections.push(Section::new(heading.trim(), lines.join("\n")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    fn h1(text: &str) -> Paragraph {
        Paragraph::new("Heading 1", text)
    }

    fn body(text: &str) -> Paragraph {
        Paragraph::new("Normal", text)
    }

    #[test]
    fn test_extract_simple_sections() {
        let doc = Document::new(vec![
            h1("Title"),
            body("A study of things"),
            h1("Study Design"),
            body("Cohort"),
            body("  Retrospective  "),
        ]);

        let sections = extract_sections(&doc);
        assert_eq!(
            sections,
            vec![
                Section::new("Title", "A study of things"),
                Section::new("Study Design", "Cohort\nRetrospective"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let doc = Document::new(vec![h1("Title"), body("one"), body("   "), body("two")]);
        let sections = extract_sections(&doc);
        assert_eq!(sections[0].body, "one\n\ntwo");
    }

    #[test]
    fn test_heading_is_trimmed_but_keeps_case() {
        let doc = Document::new(vec![h1("  Study Size \t"), body("100")]);
        let sections = extract_sections(&doc);
        assert_eq!(sections[0].heading, "Study Size");
    }

    #[test]
    fn test_abstract_is_never_emitted() {
        let doc = Document::new(vec![
            h1("Title"),
            body("t"),
            h1(" abstract "),
            body("Population: adults"),
            h1("Population"),
            body("cohort"),
        ]);

        let sections = extract_sections(&doc);
        let headings: Vec<_> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Title", "Population"]);
    }

    #[test]
    fn test_abstract_as_last_heading() {
        let doc = Document::new(vec![h1("Title"), body("t"), h1("ABSTRACT"), body("x")]);
        let sections = extract_sections(&doc);
        assert_eq!(sections, vec![Section::new("Title", "t")]);
    }

    #[test]
    fn test_text_before_first_heading_is_dropped() {
        let doc = Document::new(vec![body("cover page"), h1("Title"), body("t")]);
        let sections = extract_sections(&doc);
        assert_eq!(sections, vec![Section::new("Title", "t")]);
    }

    #[test]
    fn test_no_headings_yields_empty() {
        let doc = Document::new(vec![body("just"), body("text")]);
        assert!(extract_sections(&doc).is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_sections(&Document::default()).is_empty());
    }

    #[test]
    fn test_heading_without_body() {
        let doc = Document::new(vec![h1("Title"), h1("Population")]);
        let sections = extract_sections(&doc);
        assert_eq!(
            sections,
            vec![Section::new("Title", ""), Section::new("Population", "")]
        );
    }

    #[test]
    fn test_empty_heading_closes_section_without_opening_one() {
        let doc = Document::new(vec![
            h1("Title"),
            body("t"),
            h1(""),
            body("orphaned"),
            h1("Population"),
            body("cohort"),
        ]);
        let sections = extract_sections(&doc);
        assert_eq!(
            sections,
            vec![Section::new("Title", "t"), Section::new("Population", "cohort")]
        );
    }

    #[test]
    fn test_empty_last_heading_is_dropped() {
        let doc = Document::new(vec![h1("Title"), body("t"), h1(""), body("tail")]);
        assert_eq!(extract_sections(&doc), vec![Section::new("Title", "t")]);
    }

    #[test]
    fn test_heading_two_opens_section() {
        let doc = Document::new(vec![
            h1("Methods"),
            Paragraph::new("Heading 2", "Data Source"),
            body("Registry"),
        ]);
        let sections = extract_sections(&doc);
        assert_eq!(sections[1], Section::new("Data Source", "Registry"));
    }

    #[test]
    fn test_custom_classifier() {
        let doc = Document::new(vec![
            body("TITLE"),
            body("something"),
            body("POPULATION"),
            body("adults"),
        ]);
        let upper = |p: &Paragraph| !p.text.is_empty() && p.text == p.text.to_uppercase();
        let sections = extract_sections_with(&doc, &upper, &Vocabulary::default());
        assert_eq!(
            sections,
            vec![
                Section::new("TITLE", "something"),
                Section::new("POPULATION", "adults")
            ]
        );
    }
}
