//! # protodok-ooxml
//!
//! DOCX reading for protodok.
//!
//! This crate provides functionality to:
//! - Unpack a DOCX container
//! - Parse the top-level body paragraphs of `word/document.xml`
//! - Resolve paragraph style IDs to style names via `word/styles.xml`
//! - Produce the [`protodok_core::Document`] paragraph stream
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! use protodok_ooxml::load_document;
//!
//! let document = load_document("protocol.docx")?;
//! for paragraph in document.paragraphs() {
//!     println!("[{}] {}", paragraph.style, paragraph.text);
//! }
//! # Ok::<(), protodok_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod conversion;
pub mod document;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod fixture;
pub mod styles;

pub use archive::OoxmlArchive;
pub use conversion::{convert_archive, load_document, read_document, ConversionContext};
pub use document::{BodyParagraph, DocumentBody};
pub use error::{OoxmlError, Result};
pub use styles::{Style, StyleSheet, StyleType};


/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
