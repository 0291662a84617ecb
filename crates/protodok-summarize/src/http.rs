//! HTTP text-generation client
//!
//! Talks to an inference server exposing a text-generation-inference style
//! API: `POST /generate` for generation and `GET /health` for readiness.
//! Tokenization, padding and decoding happen on the server.

use std::time::Duration;

use protodok_core::{ModelKind, SummarizationSettings};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SummarizeError};
use crate::generator::{GenerationRequest, TextGenerator};

/// Default inference server URL
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Client for a remote generative model
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    /// Base URL of the inference server
    base_url: String,
    model: ModelKind,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeneratePayload<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncate: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Servers answer with a single object or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl GenerateResponse {
    fn into_texts(self) -> Vec<String> {
        match self {
            GenerateResponse::Single(one) => vec![one.generated_text],
            GenerateResponse::Batch(all) => all.into_iter().map(|g| g.generated_text).collect(),
        }
    }
}

impl<'a> GeneratePayload<'a> {
    fn new(text: &'a str, request: &GenerationRequest) -> Self {
        Self {
            inputs: text,
            parameters: GenerateParameters {
                max_new_tokens: request.max_new_tokens,
                repetition_penalty: request.repetition_penalty,
                truncate: request.truncation.then_some(request.max_input_tokens),
            },
        }
    }
}

impl HttpGenerator {
    /// Create a client with a 120 second timeout
    pub fn new(endpoint: impl Into<String>, model: ModelKind) -> Result<Self> {
        Self::with_timeout(endpoint, model, Duration::from_secs(120))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: ModelKind,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = endpoint.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    pub fn from_settings(settings: &SummarizationSettings) -> Result<Self> {
        Self::with_timeout(
            settings.endpoint.as_str(),
            settings.model,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Check if the inference server is up and its model loaded
    pub fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send() {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health check against {} failed: {}", url, e);
                false
            }
        }
    }
}

impl TextGenerator for HttpGenerator {
    fn generate(&self, text: &str, request: &GenerationRequest) -> Result<Vec<String>> {
        let url = format!("{}/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GeneratePayload::new(text, request))
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    warn!("Cannot reach inference server at {}", self.base_url);
                    SummarizeError::model_unavailable(self.model)
                } else {
                    SummarizeError::Http(e)
                }
            })?;

        let status = response.status();
        let body = if status.is_success() {
            response.text()?
        } else {
            response.text().unwrap_or_else(|_| "Unknown error".to_string())
        };
        classify(self.model, status, &body)
    }

    fn name(&self) -> &str {
        self.model.name()
    }
}

/// Turn a `/generate` response into texts or an error
///
/// 503 means the server is up but the model is not loaded.
fn classify(model: ModelKind, status: StatusCode, body: &str) -> Result<Vec<String>> {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        debug!("Inference server answered 503: {}", body);
        return Err(SummarizeError::model_unavailable(model));
    }
    if !status.is_success() {
        return Err(SummarizeError::ServerError {
            status: status.as_u16(),
            message: body.to_string(),
        });
    }

    let parsed: GenerateResponse = serde_json::from_str(body)?;
    Ok(parsed.into_texts())
}
