//! Paragraph stream data model
//!
//! A [`Document`] is the read-only input of every extraction pass: an
//! ordered list of [`Paragraph`]s as produced by a document reader.

/// A paragraph with its style name and raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Style display name (e.g. "Heading 1", "Normal")
    pub style: String,
    /// Raw text content, untrimmed
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph from a style name and text
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
        }
    }
}

/// An ordered sequence of paragraphs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a document from its paragraphs
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Iterate over paragraphs in document order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl FromIterator<Paragraph> for Document {
    fn from_iter<I: IntoIterator<Item = Paragraph>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
