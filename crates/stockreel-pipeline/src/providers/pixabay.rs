//! Pixabay video search.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use stockreel_models::Provider;
use tracing::debug;

use super::{clamp_per_page, endpoint, read_json, StockProvider};
use crate::error::{ProviderError, ProviderResult};

const PER_PAGE: std::ops::RangeInclusive<usize> = 3..=200;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hit {
    pub videos: Renditions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Renditions {
    #[serde(default)]
    pub large: Option<Rendition>,
    #[serde(default)]
    pub medium: Option<Rendition>,
    #[serde(default)]
    pub small: Option<Rendition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Rendition {
    #[serde(default)]
    pub url: String,
}

impl Hit {
    /// Largest rendition with a non-empty URL.
    fn best_url(&self) -> Option<&str> {
        [&self.videos.large, &self.videos.medium, &self.videos.small]
            .into_iter()
            .flatten()
            .map(|r| r.url.as_str())
            .find(|url| !url.is_empty())
    }
}

pub struct PixabayProvider {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PixabayProvider {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl StockProvider for PixabayProvider {
    fn provider(&self) -> Provider {
        Provider::Pixabay
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<String>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(Provider::Pixabay))?;
        let per_page = clamp_per_page(limit, PER_PAGE).to_string();
        let url = endpoint(&self.base_url, "videos/");

        debug!(query = %query, per_page = %per_page, "Searching Pixabay");

        let response = self
            .http
            .get(&url)
            .query(&[("key", key), ("q", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::request(Provider::Pixabay, e))?;

        let body: SearchResponse = read_json(Provider::Pixabay, response).await?;

        Ok(body
            .hits
            .iter()
            .filter_map(Hit::best_url)
            .take(limit)
            .map(str::to_string)
            .collect())
    }
}
