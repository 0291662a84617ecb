//! Extraction facade
//!
//! [`Extractor`] bundles a heading classifier with a vocabulary and runs the
//! two independent passes (sections, abstract) before assembling them.

use tracing::{debug, warn};

use crate::abstract_labels::{parse_abstract_with, AbstractScan};
use crate::assemble::assemble_with;
use crate::config::ExtractionSettings;
use crate::heading::{HeadingClassifier, StyleClassifier};
use crate::model::Document;
use crate::result::ResultMapping;
use crate::sections::{extract_sections_with, Section};
use crate::vocabulary::Vocabulary;

/// Runs section extraction and abstract parsing over a document
pub struct Extractor<C = StyleClassifier> {
    classifier: C,
    vocabulary: Vocabulary,
}

impl Default for Extractor<StyleClassifier> {
    fn default() -> Self {
        Self::new(StyleClassifier::default(), Vocabulary::default())
    }
}

impl Extractor<StyleClassifier> {
    /// Build an extractor from settings
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self::new(settings.classifier(), settings.vocabulary())
    }
}

impl<C: HeadingClassifier> Extractor<C> {
    pub fn new(classifier: C, vocabulary: Vocabulary) -> Self {
        Self {
            classifier,
            vocabulary,
        }
    }

    /// Swap the heading classifier
    pub fn with_classifier<D: HeadingClassifier>(self, classifier: D) -> Extractor<D> {
        Extractor {
            classifier,
            vocabulary: self.vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn sections(&self, document: &Document) -> Vec<Section> {
        extract_sections_with(document, &self.classifier, &self.vocabulary)
    }

    pub fn abstract_labels(&self, document: &Document) -> AbstractScan {
        parse_abstract_with(document, &self.classifier, &self.vocabulary)
    }

    /// Extract, parse the abstract, and assemble the result
    pub fn process(&self, document: &Document) -> ResultMapping {
        let sections = self.sections(document);
        let abstract_scan = self.abstract_labels(document);

        if sections.is_empty() && !document.is_empty() {
            warn!(
                "No headings detected in {} paragraphs; check heading styles",
                document.len()
            );
        }

        let mapping = assemble_with(&sections, &abstract_scan, &self.vocabulary);
        debug!(
            "Assembled {} of {} sections (abstract: {})",
            mapping.len(),
            sections.len(),
            if abstract_scan.is_found() { "found" } else { "missing" }
        );
        mapping
    }
}

/// Process a document with the default classifier and vocabulary
pub fn process_document(document: &Document) -> ResultMapping {
    Extractor::<StyleClassifier>::default().process(document)
}
