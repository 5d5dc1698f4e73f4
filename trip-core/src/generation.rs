//! Client for the Gemini generation backend.
//!
//! Unlike the data providers, generation failures are not absorbed: a
//! missing credential or a failing backend fails the whole request, since
//! the generated plan is the product of the pipeline.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::provider::http_client;

const GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Gemini API key is not configured")]
    MissingCredential,

    #[error("http: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini request failed with status {status}: {body}")]
    BackendHttp { status: u16, body: String },

    #[error("Gemini response could not be parsed as JSON: {body}")]
    MalformedResponse { body: String },

    #[error("Gemini response contained no candidates")]
    NoCandidates,
}

/// Seam between the planner and the generation backend, so the planner can
/// be exercised with a fake backend in tests.
#[async_trait]
pub trait SuggestionBackend: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    http: Client,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: http_client() }
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    // A candidate blocked by the safety filter carries no content.
    #[serde(default)]
    content: GeminiContentOut,
}

#[derive(Deserialize, Default)]
struct GeminiContentOut {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiRequest {
    /// Wrap the prompt in a single content part and attach the fixed safety
    /// thresholds. The thresholds are not user-adjustable.
    fn for_prompt(prompt: &str) -> Self {
        const BLOCK_MEDIUM_AND_ABOVE: &str = "BLOCK_MEDIUM_AND_ABOVE";

        Self {
            contents: vec![GeminiContent { parts: vec![GeminiPart { text: prompt.to_string() }] }],
            safety_settings: vec![
                SafetySetting {
                    category: "HARM_CATEGORY_HARASSMENT",
                    threshold: BLOCK_MEDIUM_AND_ABOVE,
                },
                SafetySetting {
                    category: "HARM_CATEGORY_HATE_SPEECH",
                    threshold: BLOCK_MEDIUM_AND_ABOVE,
                },
                SafetySetting {
                    category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
                    threshold: BLOCK_MEDIUM_AND_ABOVE,
                },
                SafetySetting {
                    category: "HARM_CATEGORY_DANGEROUS_CONTENT",
                    threshold: BLOCK_MEDIUM_AND_ABOVE,
                },
            ],
        }
    }
}

/// Pull the first candidate's first part out of a raw success body.
fn extract_suggestion(body: &str) -> Result<String, GenerationError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|_| GenerationError::MalformedResponse { body: body.to_string() })?;

    parsed
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(GenerationError::NoCandidates)
}

#[async_trait]
impl SuggestionBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::MissingCredential);
        };

        let request = GeminiRequest::for_prompt(prompt);

        let res = self
            .http
            .post(GENERATE_URL)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GenerationError::BackendHttp { status: status.as_u16(), body });
        }

        extract_suggestion(&body)
    }
}
