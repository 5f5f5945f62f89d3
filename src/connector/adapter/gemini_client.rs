use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::http_error::{service_error, transport_error};
use crate::application::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const API_PATH: &str = "/v1beta/models";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
    /// Thought summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// The API key is passed in by the caller; nothing is read from the
/// environment here. The system instruction travels in `systemInstruction`
/// and the query as a single user turn.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + API_PATH + model + `:generateContent`).
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration(
                "Gemini API key is empty (set API_KEY or GEMINI_API_KEY)",
            ));
        }
        let model = model.into();
        let base: String = base_url.into();
        let url = format!(
            "{}{API_PATH}/{model}:generateContent",
            base.trim_end_matches('/')
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("GeminiClient: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
            url,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    fn request_body<'a>(system: &'a str, user: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: user }],
            }],
        }
    }

    /// Text of the first candidate, answer parts joined. Empty when the model
    /// produced nothing (including blocked prompts).
    fn extract_text(response: GenerateContentResponse) -> String {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            warn!("GeminiClient: prompt blocked ({reason})");
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            return String::new();
        };
        if let Some(reason) = &candidate.finish_reason {
            debug!("GeminiClient: finish reason {reason}");
        }

        candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(system, user))
            .send()
            .await
            .map_err(|e| transport_error("GeminiClient: request failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("GeminiClient: failed to read response", e))?;

        if !status.is_success() {
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(service_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::malformed(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        Ok(Self::extract_text(parsed))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
