//! Text generator abstraction
//!
//! A generator wraps a tokenizer and a generative model behind one call:
//! tokenize the input (padded and truncated to the input ceiling), generate,
//! then batch-decode the output sequences back to text.

use crate::error::Result;

/// Parameters for a single generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Input token ceiling
    pub max_input_tokens: usize,
    /// Pad inputs up to `max_input_tokens`
    pub pad_to_max_length: bool,
    /// Truncate inputs longer than `max_input_tokens`
    pub truncation: bool,
    pub max_new_tokens: usize,
    /// Repetition penalty; `None` leaves the model default
    pub repetition_penalty: Option<f32>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            max_input_tokens: 500,
            pad_to_max_length: true,
            truncation: true,
            max_new_tokens: 300,
            repetition_penalty: None,
        }
    }
}

impl GenerationRequest {
    pub fn with_repetition_penalty(mut self, penalty: f32) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }
}

/// A tokenizer plus generative model
///
/// Implementations return every decoded output sequence.
pub trait TextGenerator {
    /// Generate summaries for `text`
    fn generate(&self, text: &str, request: &GenerationRequest) -> Result<Vec<String>>;

    /// Name for log output
    fn name(&self) -> &str {
        "generator"
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, text: &str, request: &GenerationRequest) -> Result<Vec<String>> {
        (**self).generate(text, request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, text: &str, request: &GenerationRequest) -> Result<Vec<String>> {
        (**self).generate(text, request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
