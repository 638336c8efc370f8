//! Gemini text-completion adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::task::ports::{ReasoningError, ReasoningResult, ReasoningService};

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Reasoning service backed by the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiReasoningService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiReasoningService {
    /// Creates an adapter for `model` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> ReasoningResult<Self> {
        let client = super::build_client(timeout).map_err(ReasoningError::transport)?;
        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base URL (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Joins the text parts of the first candidate. Blank text is still a
/// completion; callers decide what it means.
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    Some(text.trim().to_owned())
}

#[async_trait]
impl ReasoningService for GeminiReasoningService {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> ReasoningResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ReasoningError::NotConfigured("GEMINI_API_KEY".to_owned()))?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
            },
        };

        debug!(model = %self.model, max_tokens, "Requesting completion");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(ReasoningError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini request failed");
            return Err(ReasoningError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse =
            response.json().await.map_err(ReasoningError::transport)?;
        first_candidate_text(payload).ok_or(ReasoningError::NoCandidate)
    }
}
