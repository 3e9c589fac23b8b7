//! Wikipedia REST page-summary adapter.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use parley_core::{CapabilityError, EncyclopediaLookup, EncyclopediaProviderConfig};

use crate::http::{status_error, transport_error};

const SERVICE: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: String,
}

/// Page titles use underscores for spaces.
fn page_title(topic: &str) -> String {
    topic.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Append the title as a single, percent-encoded path segment.
fn summary_url(base_url: &str, topic: &str) -> Result<Url, CapabilityError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| CapabilityError::Unavailable(format!("{}: bad base url: {}", SERVICE, e)))?;
    url.path_segments_mut()
        .map_err(|_| CapabilityError::Unavailable(format!("{}: base url cannot hold a path", SERVICE)))?
        .pop_if_empty()
        .push(&page_title(topic));
    Ok(url)
}

/// [`EncyclopediaLookup`] backed by the Wikipedia page-summary endpoint.
pub struct WikipediaSummaries {
    client: Client,
    config: EncyclopediaProviderConfig,
}

impl WikipediaSummaries {
    pub fn new(client: Client, config: EncyclopediaProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl EncyclopediaLookup for WikipediaSummaries {
    async fn summary(&self, topic: &str) -> Result<String, CapabilityError> {
        let url = summary_url(&self.config.base_url, topic)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response.status()));
        }

        let page: PageSummary = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if page.extract.trim().is_empty() {
            return Err(CapabilityError::NotFound(format!("no summary for '{}'", topic)));
        }
        Ok(page.extract)
    }
}
