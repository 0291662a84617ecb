//! Heading classification
//!
//! Headings are detected from paragraph style metadata only. A paragraph
//! that merely looks like a heading (bold, larger font) but carries a body
//! style is body text.

use std::collections::HashSet;

use crate::model::Paragraph;

/// Decides whether a paragraph opens a new section
pub trait HeadingClassifier {
    /// Check if the paragraph at `index` is a heading
    fn is_heading_at(&self, index: usize, paragraph: &Paragraph) -> bool {
        let _ = index;
        self.is_heading(paragraph)
    }

    /// Check if a paragraph is a heading
    fn is_heading(&self, paragraph: &Paragraph) -> bool;
}

impl<F> HeadingClassifier for F
where
    F: Fn(&Paragraph) -> bool,
{
    fn is_heading(&self, paragraph: &Paragraph) -> bool {
        self(paragraph)
    }
}

/// Default heading styles: level 1 and level 2
pub const DEFAULT_HEADING_STYLES: &[&str] = &["Heading 1", "Heading 2"];

/// Classifies by style name prefix
///
/// Matching is case-insensitive, so both the UI name `Heading 1` and the
/// stored built-in name `heading 1` are recognised. Prefix matching means
/// `Heading 1 Char`-style derivatives count as well.
#[derive(Debug, Clone)]
pub struct StyleClassifier {
    prefixes: Vec<String>,
}

impl Default for StyleClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_STYLES.iter().copied())
    }
}

impl StyleClassifier {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(|s| s.as_str())
    }
}

impl HeadingClassifier for StyleClassifier {
    fn is_heading(&self, paragraph: &Paragraph) -> bool {
        let style = paragraph.style.to_lowercase();
        self.prefixes.iter().any(|p| style.starts_with(p.as_str()))
    }
}

/// Headings given as explicit paragraph positions
#[derive(Debug, Clone, Default)]
pub struct BoundaryList {
    indices: HashSet<usize>,
}

impl BoundaryList {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }
}

impl HeadingClassifier for BoundaryList {
    fn is_heading_at(&self, index: usize, _paragraph: &Paragraph) -> bool {
        self.indices.contains(&index)
    }

    /// Without a position nothing can be a boundary
    fn is_heading(&self, _paragraph: &Paragraph) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_classifier_levels_one_and_two() {
        let classifier = StyleClassifier::default();
        assert!(classifier.is_heading(&Paragraph::new("Heading 1", "Title")));
        assert!(classifier.is_heading(&Paragraph::new("Heading 2", "Sub")));
        assert!(!classifier.is_heading(&Paragraph::new("Heading 3", "Deep")));
        assert!(!classifier.is_heading(&Paragraph::new("Normal", "Body")));
    }

    #[test]
    fn test_style_classifier_is_case_insensitive() {
        let classifier = StyleClassifier::default();
        assert!(classifier.is_heading(&Paragraph::new("heading 1", "Title")));
        assert!(classifier.is_heading(&Paragraph::new("HEADING 2", "Title")));
    }

    #[test]
    fn test_style_classifier_prefix_match() {
        let classifier = StyleClassifier::default();
        assert!(classifier.is_heading(&Paragraph::new("Heading 1 Numbered", "x")));
        // "Heading 10" starts with "Heading 1"
        assert!(classifier.is_heading(&Paragraph::new("Heading 10", "x")));
    }

    #[test]
    fn test_bold_body_text_is_not_a_heading() {
        let classifier = StyleClassifier::default();
        assert!(!classifier.is_heading(&Paragraph::new("Strong", "ABSTRACT")));
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |p: &Paragraph| p.text.ends_with(':');
        assert!(classifier.is_heading(&Paragraph::new("Normal", "Population:")));
        assert!(!classifier.is_heading(&Paragraph::new("Normal", "adults")));
    }

    #[test]
    fn test_boundary_list_uses_positions() {
        let boundaries = BoundaryList::new([0, 3]);
        let p = Paragraph::new("Normal", "x");
        assert!(boundaries.is_heading_at(0, &p));
        assert!(!boundaries.is_heading_at(1, &p));
        assert!(boundaries.is_heading_at(3, &p));
    }
}
