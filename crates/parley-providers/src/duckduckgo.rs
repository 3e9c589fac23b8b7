//! DuckDuckGo Instant Answer adapter.

use async_trait::async_trait;
use reqwest::Client;

use parley_core::{CapabilityError, SearchProviderConfig, WebSearch};

use crate::http::{status_error, transport_error};

const SERVICE: &str = "duckduckgo";

fn non_empty(value: &serde_json::Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Pick the best single answer from an instant-answer payload.
///
/// Preference: abstract, direct answer, definition, first related topic.
pub fn extract_answer(data: &serde_json::Value) -> Option<String> {
    non_empty(data, "AbstractText")
        .or_else(|| non_empty(data, "Answer"))
        .or_else(|| non_empty(data, "Definition"))
        .or_else(|| {
            data.get("RelatedTopics")
                .and_then(|v| v.as_array())
                .and_then(|topics| topics.iter().find_map(|t| non_empty(t, "Text")))
        })
}

/// [`WebSearch`] backed by the DuckDuckGo Instant Answer API.
pub struct DuckDuckGoSearch {
    client: Client,
    config: SearchProviderConfig,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client, config: SearchProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Option<String>, CapabilityError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response.status()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let answer = extract_answer(&body);
        tracing::debug!(query = %query, found = answer.is_some(), "Instant answer search");
        Ok(answer)
    }
}
