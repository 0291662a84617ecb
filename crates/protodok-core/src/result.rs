//! The combined extraction result
//!
//! Serialized form:
//!
//! ```json
//! {"POPULATION": {"section": "full cohort description", "abstract": "elderly adults"}}
//! ```
//!
//! `abstract` is omitted when the document has no abstract fragment for
//! that heading.

use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Body text of a wanted section plus its abstract fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Section body text
    pub section: String,
    /// Matching abstract fragment, if any
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
}

impl SectionEntry {
    pub fn new(section: impl Into<String>, abstract_text: Option<String>) -> Self {
        Self {
            section: section.into(),
            abstract_text,
        }
    }

    /// Leaf texts in serialization order (section, then abstract)
    pub fn leaves(&self) -> impl Iterator<Item = (&'static str, &str)> {
        std::iter::once(("section", self.section.as_str())).chain(
            self.abstract_text
                .as_deref()
                .map(|text| ("abstract", text)),
        )
    }
}

/// Wanted heading name (upper-case) → entry, in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMapping {
    entries: IndexMap<String, SectionEntry>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry; an overwritten key keeps its position
    pub fn insert(&mut self, wanted: impl Into<String>, entry: SectionEntry) -> Option<SectionEntry> {
        self.entries.insert(wanted.into(), entry)
    }

    pub fn get(&self, wanted: &str) -> Option<&SectionEntry> {
        self.entries.get(wanted)
    }

    pub fn contains(&self, wanted: &str) -> bool {
        self.entries.contains_key(wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry carries an abstract fragment
    pub fn has_abstract(&self) -> bool {
        self.entries.values().any(|e| e.abstract_text.is_some())
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from any reader producing JSON
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl<'a> IntoIterator for &'a ResultMapping {
    type Item = (&'a String, &'a SectionEntry);
    type IntoIter = indexmap::map::Iter<'a, String, SectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
