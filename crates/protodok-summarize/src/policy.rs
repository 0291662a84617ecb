//! Per-model generation policy
//!
//! Pegasus gets a plain call for short inputs and a repetition penalty once
//! the input reaches the length threshold; Llama 2 always gets the penalty.

use protodok_core::{ModelKind, SummarizationSettings};

use crate::generator::GenerationRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPolicy {
    pub model: ModelKind,
    pub max_input_tokens: usize,
    pub max_new_tokens: usize,
    /// Input length in characters at which the penalty applies
    pub length_threshold: usize,
    pub repetition_penalty: f32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self::from_settings(&SummarizationSettings::default())
    }
}

impl GenerationPolicy {
    /// Default knobs for a model family
    pub fn for_model(model: ModelKind) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn from_settings(settings: &SummarizationSettings) -> Self {
        Self {
            model: settings.model,
            max_input_tokens: settings.max_input_tokens,
            max_new_tokens: settings.max_new_tokens,
            length_threshold: settings.length_threshold,
            repetition_penalty: settings.repetition_penalty,
        }
    }

    /// Whether `text` is generated with the repetition penalty
    pub fn penalizes(&self, text: &str) -> bool {
        match self.model {
            ModelKind::Pegasus => text.chars().count() >= self.length_threshold,
            ModelKind::Llama2 => true,
        }
    }

    pub fn request_for(&self, text: &str) -> GenerationRequest {
        let request = GenerationRequest {
            max_input_tokens: self.max_input_tokens,
            pad_to_max_length: true,
            truncation: true,
            max_new_tokens: self.max_new_tokens,
            repetition_penalty: None,
        };

        if self.penalizes(text) {
            request.with_repetition_penalty(self.repetition_penalty)
        } else {
            request
        }
    }
}
