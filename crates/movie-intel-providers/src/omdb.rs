//! OMDb metadata source: title search, then a full-plot detail lookup.

use serde_json::Value;
use tracing::{debug, info};

use movie_intel_core::{MovieIntelError, Result};

use crate::config::ProviderConfig;

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Pull the first search hit's IMDb id out of an OMDb search payload.
///
/// OMDb signals "no match" with `"Response": "False"` rather than an
/// HTTP error.
fn first_imdb_id(search: &Value) -> Option<String> {
    if search.get("Response").and_then(Value::as_str) == Some("False") {
        return None;
    }
    search
        .get("Search")?
        .get(0)?
        .get("imdbID")?
        .as_str()
        .map(str::to_string)
}

/// Client for the OMDb descriptive-metadata API.
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("movie-intel/0.1.0")
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.omdb_api_key.clone(),
        }
    }

    /// Override the API base URL (testing against a local stub).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Look a title up and return the full-plot detail payload.
    ///
    /// Returns [`MovieIntelError::SourceNotFound`] when the provider has
    /// no match, [`MovieIntelError::InsufficientData`] when it is
    /// unreachable.
    pub async fn lookup(&self, title: &str) -> Result<Value> {
        let search: Value = self
            .http
            .get(&self.base_url)
            .query(&[("s", title), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                MovieIntelError::InsufficientData(format!("metadata source unreachable: {e}"))
            })?
            .json()
            .await
            .map_err(|e| MovieIntelError::Decode(format!("metadata search payload: {e}")))?;

        let imdb_id = first_imdb_id(&search)
            .ok_or_else(|| MovieIntelError::SourceNotFound(title.to_string()))?;
        debug!(title, imdb_id = %imdb_id, "metadata search hit");

        let detail: Value = self
            .http
            .get(&self.base_url)
            .query(&[
                ("i", imdb_id.as_str()),
                ("plot", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                MovieIntelError::InsufficientData(format!("metadata source unreachable: {e}"))
            })?
            .json()
            .await
            .map_err(|e| MovieIntelError::Decode(format!("metadata detail payload: {e}")))?;

        info!(title, imdb_id = %imdb_id, "metadata retrieved");
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_imdb_id_from_search_hit() {
        let search = json!({
            "Response": "True",
            "Search": [
                { "Title": "Inception", "imdbID": "tt1375666" },
                { "Title": "Inception: The Cobol Job", "imdbID": "tt5295894" },
            ]
        });
        assert_eq!(first_imdb_id(&search).as_deref(), Some("tt1375666"));
    }

    #[test]
    fn test_first_imdb_id_not_found_response() {
        let search = json!({ "Response": "False", "Error": "Movie not found!" });
        assert!(first_imdb_id(&search).is_none());
    }

    #[test]
    fn test_first_imdb_id_malformed_payload() {
        assert!(first_imdb_id(&json!({})).is_none());
        assert!(first_imdb_id(&json!({ "Search": [] })).is_none());
        assert!(first_imdb_id(&json!({ "Search": [{ "Title": "X" }] })).is_none());
    }
}
