//! Error types for summarization

use protodok_core::ModelKind;
use thiserror::Error;

/// Errors that can occur while summarizing a result mapping
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Inference server returned an error
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The model could not be loaded or reached
    ///
    /// Recoverable: report the guidance and carry on.
    #[error("Model {model} is unavailable: {guidance}")]
    ModelUnavailable { model: String, guidance: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SummarizeError {
    /// Unavailable-model error with guidance suited to the model family
    pub fn model_unavailable(model: ModelKind) -> Self {
        let guidance = match model {
            ModelKind::Llama2 => {
                "llama2 needs a GPU-backed inference server; use a lighter model such as pegasus"
            }
            ModelKind::Pegasus => "start the inference server or point --endpoint at a running one",
        };
        SummarizeError::ModelUnavailable {
            model: model.name().to_string(),
            guidance: guidance.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, SummarizeError::ModelUnavailable { .. })
    }
}

/// Result type for summarization
pub type Result<T> = std::result::Result<T, SummarizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llama2_guidance_suggests_lighter_model() {
        let err = SummarizeError::model_unavailable(ModelKind::Llama2);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("pegasus"));
        assert!(err.to_string().starts_with("Model llama2 is unavailable"));
    }

    #[test]
    fn test_server_error_is_fatal() {
        let err = SummarizeError::ServerError {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Server error (500): boom");
    }
}
