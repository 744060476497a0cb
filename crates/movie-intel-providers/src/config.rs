//! Explicit provider configuration.
//!
//! Keys and endpoints are passed to constructors at startup; nothing in
//! this workspace reads ambient process-global state.

use std::time::Duration;

/// Configuration for all outbound collaborators.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// OMDb API key (descriptive metadata source).
    pub omdb_api_key: String,
    /// TMDb API key (best-effort financial source). Absent key disables
    /// the financial lookup; fields fall back to the unknown sentinel.
    pub tmdb_api_key: Option<String>,
    /// Gemini API key (generation backend).
    pub gemini_api_key: String,
    /// Backend model identifier for all four agent profiles.
    pub model: String,
    /// Bounded wait for every outbound HTTP call.
    pub request_timeout: Duration,
}

impl ProviderConfig {
    pub fn new(omdb_api_key: &str, gemini_api_key: &str) -> Self {
        Self {
            omdb_api_key: omdb_api_key.to_string(),
            tmdb_api_key: None,
            gemini_api_key: gemini_api_key.to_string(),
            model: "gemini-2.5-flash".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_tmdb_key(mut self, key: &str) -> Self {
        self.tmdb_api_key = Some(key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
