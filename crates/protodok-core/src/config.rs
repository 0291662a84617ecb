//! Configuration settings
//!
//! Settings are loaded from `protodok.toml`:
//!
//! ```toml
//! [extraction]
//! heading_styles = ["Heading 1", "Heading 2"]
//! abstract_heading = "ABSTRACT"
//! wanted_headings = ["TITLE", "POPULATION", "STUDY DESIGN"]
//!
//! [summarization]
//! endpoint = "http://localhost:8080"
//! model = "pegasus"
//! max_input_tokens = 500
//! max_new_tokens = 300
//! length_threshold = 500
//! repetition_penalty = 1.5
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::heading::{StyleClassifier, DEFAULT_HEADING_STYLES};
use crate::vocabulary::{Vocabulary, ABSTRACT_HEADING, WANTED_HEADINGS};

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "protodok.toml";

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Section extraction settings
    pub extraction: ExtractionSettings,
    /// Summarization settings
    pub summarization: SummarizationSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from the given file, or `protodok.toml` if present, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(SETTINGS_FILE).is_file() => Self::load(SETTINGS_FILE),
            None => Ok(Self::default()),
        }
    }
}

/// Heading detection and vocabulary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Style name prefixes that mark a heading
    pub heading_styles: Vec<String>,
    /// Name of the heading that holds the labelled abstract
    pub abstract_heading: String,
    /// Wanted section names, in output order
    pub wanted_headings: Vec<String>,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            heading_styles: DEFAULT_HEADING_STYLES.iter().map(|s| s.to_string()).collect(),
            abstract_heading: ABSTRACT_HEADING.to_string(),
            wanted_headings: WANTED_HEADINGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtractionSettings {
    pub fn classifier(&self) -> StyleClassifier {
        StyleClassifier::new(&self.heading_styles)
    }

    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(&self.wanted_headings, &self.abstract_heading)
    }
}

/// Generative model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Sequence-to-sequence summarizer; penalty only for long inputs
    #[default]
    Pegasus,
    /// Causal model; penalty on every call
    Llama2,
}

impl ModelKind {
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Pegasus => "pegasus",
            ModelKind::Llama2 => "llama2",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Summarization call parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummarizationSettings {
    /// Base URL of the inference server
    pub endpoint: String,
    pub model: ModelKind,
    /// Input token ceiling (inputs are padded/truncated to this length)
    pub max_input_tokens: usize,
    pub max_new_tokens: usize,
    /// Character count at which the repetition penalty kicks in
    pub length_threshold: usize,
    pub repetition_penalty: f32,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            model: ModelKind::Pegasus,
            max_input_tokens: 500,
            max_new_tokens: 300,
            length_threshold: 500,
            repetition_penalty: 1.5,
            timeout_secs: 120,
        }
    }
}
