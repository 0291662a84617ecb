//! # protodok-core
//!
//! Section extraction for clinical-study protocol documents.
//!
//! A protocol arrives as an ordered stream of styled paragraphs. This crate
//! provides functionality to:
//! - Classify paragraphs as headings (by style name, or any custom predicate)
//! - Split the paragraph stream into `(heading, body)` sections
//! - Parse the labelled lines of the ABSTRACT section
//! - Merge both into a [`ResultMapping`] keyed by the wanted headings
//!
//! ## Example
//!
//! ```
//! use protodok_core::{process_document, Document, Paragraph};
//!
//! let document = Document::new(vec![
//!     Paragraph::new("Heading 1", "Abstract"),
//!     Paragraph::new("Normal", "Population: elderly adults"),
//!     Paragraph::new("Heading 1", "Population"),
//!     Paragraph::new("Normal", "full cohort description"),
//! ]);
//!
//! let result = process_document(&document);
//! let entry = result.get("POPULATION").unwrap();
//! assert_eq!(entry.section, "full cohort description");
//! assert_eq!(entry.abstract_text.as_deref(), Some("elderly adults"));
//! ```

pub mod abstract_labels;
pub mod assemble;
pub mod config;
pub mod error;
pub mod extractor;
pub mod heading;
pub mod model;
pub mod result;
pub mod sections;
pub mod vocabulary;

pub use abstract_labels::{parse_abstract, parse_abstract_with, AbstractLabels, AbstractScan};
pub use assemble::{assemble, assemble_with};
pub use config::{ExtractionSettings, ModelKind, Settings, SummarizationSettings};
pub use error::{CoreError, Result};
pub use extractor::{process_document, Extractor};
pub use heading::{BoundaryList, HeadingClassifier, StyleClassifier};
pub use model::{Document, Paragraph};
pub use result::{ResultMapping, SectionEntry};
pub use sections::{extract_sections, extract_sections_with, Section};
pub use vocabulary::{normalize_heading, Vocabulary, ABSTRACT_HEADING, WANTED_HEADINGS};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
