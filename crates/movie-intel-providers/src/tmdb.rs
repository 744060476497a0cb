//! TMDb financial source. Strictly best-effort: any failure here
//! degrades to "no financial data" and never blocks the pipeline.

use serde_json::Value;
use tracing::debug;

use movie_intel_core::{MovieIntelError, Result};

use crate::config::ProviderConfig;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Pull the first search result's movie id out of a TMDb search payload.
fn first_result_id(search: &Value) -> Option<u64> {
    search.get("results")?.get(0)?.get("id")?.as_u64()
}

/// Client for the TMDb financial-facts API.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Returns `None` when no TMDb key is configured; the caller then
    /// skips the financial lookup entirely.
    pub fn new(config: &ProviderConfig) -> Option<Self> {
        let api_key = config.tmdb_api_key.clone()?;
        let http = reqwest::Client::builder()
            .user_agent("movie-intel/0.1.0")
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Some(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Override the API base URL (testing against a local stub).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Best-effort budget/revenue lookup.
    ///
    /// Returns the movie detail payload, or `None` on any failure or
    /// miss. Errors are logged at debug level and swallowed.
    pub async fn financials(&self, title: &str) -> Option<Value> {
        match self.try_financials(title).await {
            Ok(detail) => detail,
            Err(e) => {
                debug!(title, error = %e, "financial lookup failed, continuing without");
                None
            }
        }
    }

    async fn try_financials(&self, title: &str) -> Result<Option<Value>> {
        let search: Value = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&[("query", title), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MovieIntelError::Decode(format!("financial search: {e}")))?
            .json()
            .await
            .map_err(|e| MovieIntelError::Decode(format!("financial search payload: {e}")))?;

        let Some(movie_id) = first_result_id(&search) else {
            return Ok(None);
        };

        let detail: Value = self
            .http
            .get(format!("{}/movie/{}", self.base_url, movie_id))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MovieIntelError::Decode(format!("financial detail: {e}")))?
            .json()
            .await
            .map_err(|e| MovieIntelError::Decode(format!("financial detail payload: {e}")))?;

        Ok(Some(detail))
    }
}
