//! Abstract sub-parsing
//!
//! The ABSTRACT section of a protocol is a list of labelled lines such as
//! `Population: elderly adults`. This pass finds the ABSTRACT heading, then
//! tests every following body paragraph against the wanted heading catalog
//! until the next heading ends the abstract.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::heading::{HeadingClassifier, StyleClassifier};
use crate::model::Document;
use crate::vocabulary::Vocabulary;

/// Label → fragment mapping; keys are lower-cased wanted names
pub type AbstractLabels = IndexMap<String, String>;

/// Outcome of scanning a document for its abstract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractScan {
    /// The document has no ABSTRACT heading
    NotFound,
    /// The abstract was found; labels absent from it are absent here
    Found(AbstractLabels),
}

impl AbstractScan {
    pub fn is_found(&self) -> bool {
        matches!(self, AbstractScan::Found(_))
    }

    /// The label map, if an abstract exists
    pub fn labels(&self) -> Option<&AbstractLabels> {
        match self {
            AbstractScan::Found(labels) => Some(labels),
            AbstractScan::NotFound => None,
        }
    }

    /// Fragment for a wanted name (any case)
    pub fn get(&self, wanted: &str) -> Option<&str> {
        self.labels()
            .and_then(|labels| labels.get(&wanted.to_lowercase()))
            .map(|s| s.as_str())
    }

    pub fn into_labels(self) -> Option<AbstractLabels> {
        match self {
            AbstractScan::Found(labels) => Some(labels),
            AbstractScan::NotFound => None,
        }
    }
}

/// Parse the abstract using the default style classifier and vocabulary
pub fn parse_abstract(document: &Document) -> AbstractScan {
    parse_abstract_with(document, &StyleClassifier::default(), &Vocabulary::default())
}

/// Parse the abstract with a custom classifier and vocabulary
///
/// The scan stops at the first heading after ABSTRACT; nothing later in the
/// document is inspected. Each paragraph contributes to at most one label
/// (the first wanted name it contains), and each label keeps the first
/// fragment captured for it.
pub fn parse_abstract_with<C>(
    document: &Document,
    classifier: &C,
    vocabulary: &Vocabulary,
) -> AbstractScan
where
    C: HeadingClassifier + ?Sized,
{
    let mut in_abstract = false;
    let mut labels = AbstractLabels::new();

    for (index, paragraph) in document.paragraphs().enumerate() {
        let is_heading = classifier.is_heading_at(index, paragraph);

        if is_heading && vocabulary.is_abstract(&paragraph.text) {
            in_abstract = true;
        } else if is_heading && in_abstract {
            debug!("Abstract ended at paragraph {}", index);
            return AbstractScan::Found(labels);
        } else if in_abstract && !is_heading {
            let Some(label) = vocabulary.first_match(&paragraph.text) else {
                continue;
            };
            let key = label.to_lowercase();
            if labels.contains_key(&key) {
                debug!("Abstract label '{}' already captured, ignoring", key);
                continue;
            }
            let fragment = strip_label(&paragraph.text, &key);
            labels.insert(key, fragment);
        }
    }

    if in_abstract {
        AbstractScan::Found(labels)
    } else {
        warn!("No {} heading found", vocabulary.abstract_heading());
        AbstractScan::NotFound
    }
}

/// Lower-case the line and drop every `label:` occurrence
fn strip_label(text: &str, label: &str) -> String {
    let lowered = text.to_lowercase();
    let marker = format!("{}:", label);
    lowered.replace(&marker, "").trim().to_string()
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
    fn test_missing_abstract_is_not_found() {
        let doc = Document::new(vec![h1("Title"), body("Population: adults")]);
        assert_eq!(parse_abstract(&doc), AbstractScan::NotFound);
    }

    #[test]
    fn test_empty_document_is_not_found() {
        assert_eq!(parse_abstract(&Document::default()), AbstractScan::NotFound);
    }

    #[test]
    fn test_labels_between_abstract_and_next_heading() {
        let doc = Document::new(vec![
            h1("Abstract"),
            body("Title: A cohort study"),
            body("Population: Elderly adults"),
            body("Unlabelled commentary"),
            h1("Population"),
            body("Study Size: 1000"),
        ]);

        let scan = parse_abstract(&doc);
        let labels = scan.labels().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["title"], "a cohort study");
        assert_eq!(labels["population"], "elderly adults");
        assert_eq!(scan.get("STUDY SIZE"), None);
    }

    #[test]
    fn test_first_label_wins_per_paragraph() {
        // Contains both TITLE and POPULATION; TITLE comes first in the catalog
        let doc = Document::new(vec![h1("Abstract"), body("Population title: x")]);
        let scan = parse_abstract(&doc);
        assert_eq!(scan.get("title"), Some("population  x"));
        assert_eq!(scan.get("population"), None);
    }

    #[test]
    fn test_label_captured_once() {
        let doc = Document::new(vec![
            h1("Abstract"),
            body("Population: first"),
            body("Population: second"),
        ]);
        assert_eq!(parse_abstract(&doc).get("population"), Some("first"));
    }

    #[test]
    fn test_abstract_as_last_heading_returns_collected() {
        let doc = Document::new(vec![
            h1("Title"),
            body("x"),
            h1("ABSTRACT"),
            body("Data Source: claims database"),
        ]);
        let scan = parse_abstract(&doc);
        assert!(scan.is_found());
        assert_eq!(scan.get("data source"), Some("claims database"));
    }

    #[test]
    fn test_abstract_immediately_followed_by_heading_is_empty() {
        let doc = Document::new(vec![
            h1("Abstract"),
            h1("Population"),
            body("Population: adults"),
        ]);
        assert_eq!(parse_abstract(&doc), AbstractScan::Found(AbstractLabels::new()));
    }

    #[test]
    fn test_text_before_abstract_is_ignored() {
        let doc = Document::new(vec![
            h1("Title"),
            body("Study Design: ignored"),
            h1("Abstract"),
            body("Study Design: cohort"),
        ]);
        assert_eq!(parse_abstract(&doc).get("study design"), Some("cohort"));
    }

    #[test]
    fn test_strip_label_removes_every_occurrence() {
        assert_eq!(
            strip_label("Population: adults (population: 65+)", "population"),
            "adults ( 65+)"
        );
        assert_eq!(
            strip_label("Population without colon", "population"),
            "population without colon"
        );
    }

    #[test]
    fn test_label_inside_sentence_is_matched() {
        let doc = Document::new(vec![h1("Abstract"), body("The study size is 200")]);
        assert_eq!(
            parse_abstract(&doc).get("study size"),
            Some("the study size is 200")
        );
    }
}
