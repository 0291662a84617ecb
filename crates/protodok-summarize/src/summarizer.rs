//! Summarization of a result mapping
//!
//! Every leaf text of every entry is sent to the generator. A heading's
//! summary is the output for the last leaf processed, so an entry with an
//! abstract fragment is summarized from that fragment.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use protodok_core::ResultMapping;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::generator::TextGenerator;
use crate::policy::GenerationPolicy;

/// Heading → decoded output sequences, in first-insertion order
///
/// Each heading keeps every sequence the generator decoded, usually one.
/// [`SummaryMapping::summary_text`] gives the single-string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryMapping {
    entries: IndexMap<String, Vec<String>>,
}

impl SummaryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, heading: impl Into<String>, summary: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(heading.into(), summary)
    }

    pub fn get(&self, heading: &str) -> Option<&[String]> {
        self.entries.get(heading).map(|v| v.as_slice())
    }

    /// Decoded sequences of a heading joined into one summary string
    pub fn summary_text(&self, heading: &str) -> Option<String> {
        self.entries.get(heading).map(|sequences| sequences.join("\n"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
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

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Request-scoped summarization state
///
/// Once a request has produced its summary, further calls through
/// [`Summarizer::summarize_once`] with the same state reuse it instead of
/// running inference again.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    summary: Option<SummaryMapping>,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this request has already been summarized
    pub fn is_submitted(&self) -> bool {
        self.summary.is_some()
    }

    pub fn summary(&self) -> Option<&SummaryMapping> {
        self.summary.as_ref()
    }

    /// Forget the cached summary so the next call regenerates it
    pub fn reset(&mut self) {
        self.summary = None;
    }
}

/// Drives a [`TextGenerator`] over a result mapping
#[derive(Debug, Clone)]
pub struct Summarizer<G> {
    generator: G,
    policy: GenerationPolicy,
}

impl<G: TextGenerator> Summarizer<G> {
    pub fn new(generator: G, policy: GenerationPolicy) -> Self {
        Self { generator, policy }
    }

    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Summarize every leaf of the mapping
    pub fn summarize(&self, mapping: &ResultMapping) -> Result<SummaryMapping> {
        let mut summary = SummaryMapping::new();

        for (heading, entry) in mapping {
            for (leaf, text) in entry.leaves() {
                let request = self.policy.request_for(text);
                debug!(
                    "Summarizing {} of '{}' with {} ({} chars, penalty {:?})",
                    leaf,
                    heading,
                    self.generator.name(),
                    text.chars().count(),
                    request.repetition_penalty
                );
                let output = self.generator.generate(text, &request)?;
                summary.insert(heading, output);
            }
        }

        info!("Summarized {} headings with {}", summary.len(), self.policy.model);
        Ok(summary)
    }

    /// Summarize a serialized result mapping
    pub fn summarize_file<P: AsRef<Path>>(&self, path: P) -> Result<SummaryMapping> {
        let file = File::open(path.as_ref())?;
        let mapping: ResultMapping = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} entries from {}", mapping.len(), path.as_ref().display());
        self.summarize(&mapping)
    }

    /// Summarize once per request
    ///
    /// The first call runs the generator and stores the result in `state`;
    /// later calls return the stored summary untouched.
    pub fn summarize_once<'s>(
        &self,
        mapping: &ResultMapping,
        state: &'s mut RequestState,
    ) -> Result<&'s SummaryMapping> {
        let summary = match state.summary.take() {
            Some(cached) => {
                debug!("Request already summarized, reusing result");
                cached
            }
            None => self.summarize(mapping)?,
        };
        Ok(state.summary.insert(summary))
    }
}
