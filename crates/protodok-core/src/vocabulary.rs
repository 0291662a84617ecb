//! Wanted heading catalog
//!
//! Heading matching is substring based and case-insensitive: a heading
//! matches a wanted name when the wanted name appears anywhere within the
//! upper-cased heading text.

/// Section names extracted from a protocol, in output order
pub const WANTED_HEADINGS: &[&str] = &[
    "TITLE",
    "RATIONALE AND BACKGROUND",
    "RESEARCH QUESTION AND OBJECTIVES",
    "STUDY DESIGN",
    "POPULATION",
    "DATA SOURCE",
    "STUDY SIZE",
    "DATA ANALYSIS",
];

/// Heading whose body holds the labelled abstract lines
pub const ABSTRACT_HEADING: &str = "ABSTRACT";

/// Normalize a heading for comparison (trimmed, upper-cased)
pub fn normalize_heading(text: &str) -> String {
    text.trim().to_uppercase()
}

/// The wanted headings plus the name of the abstract heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    wanted: Vec<String>,
    abstract_heading: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(WANTED_HEADINGS.iter().copied(), ABSTRACT_HEADING)
    }
}

impl Vocabulary {
    /// Build a vocabulary; names are normalized on the way in
    pub fn new<I, S>(wanted: I, abstract_heading: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            wanted: wanted
                .into_iter()
                .map(|w| normalize_heading(w.as_ref()))
                .filter(|w| !w.is_empty())
                .collect(),
            abstract_heading: normalize_heading(abstract_heading),
        }
    }

    /// Wanted names in catalog order (upper-case)
    pub fn wanted(&self) -> impl Iterator<Item = &str> {
        self.wanted.iter().map(|s| s.as_str())
    }

    pub fn abstract_heading(&self) -> &str {
        &self.abstract_heading
    }

    /// True if the heading text normalizes to the abstract heading
    pub fn is_abstract(&self, heading: &str) -> bool {
        normalize_heading(heading) == self.abstract_heading
    }

    /// All wanted names contained in the given heading, in catalog order
    pub fn matches<'a>(&'a self, heading: &str) -> impl Iterator<Item = &'a str> + 'a {
        let heading = heading.to_uppercase();
        self.wanted
            .iter()
            .filter(move |w| heading.contains(w.as_str()))
            .map(|s| s.as_str())
    }

    /// First wanted name contained in the given text, if any
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.matches(text).next()
    }
}
