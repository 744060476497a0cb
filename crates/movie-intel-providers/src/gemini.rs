//! Gemini generation backend.
//!
//! One [`GeminiAgent`] wraps one agent profile: the profile's
//! instructions travel as the system instruction on every call, the
//! prompt as the single user turn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use movie_intel_core::{AgentError, AgentProfile, AgentResult, GenerativeAgent};

use crate::config::ProviderConfig;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// A [`GenerativeAgent`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiAgent {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    profile: AgentProfile,
}

impl GeminiAgent {
    pub fn new(profile: AgentProfile, config: &ProviderConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("movie-intel/0.1.0")
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.gemini_api_key.clone(),
            profile,
        }
    }

    /// Override the API base URL (testing against a local stub).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }
}

#[async_trait]
impl GenerativeAgent for GeminiAgent {
    async fn run(&self, prompt: &str) -> AgentResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.profile.model
        );
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &self.profile.instructions,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(agent = %self.profile.name, model = %self.profile.model, "calling generation backend");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentError::Unavailable(format!(
                "backend returned {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Unavailable(format!("malformed backend response: {e}")))?;

        extract_text(parsed).ok_or_else(|| {
            AgentError::EmptyResponse(format!("no candidate text for {}", self.profile.name))
        })
    }
}
