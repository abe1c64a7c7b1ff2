//! Unsplash photo search.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use stockreel_models::Provider;
use tracing::debug;

use super::{clamp_per_page, endpoint, read_json, StockProvider};
use crate::error::{ProviderError, ProviderResult};

const PER_PAGE: std::ops::RangeInclusive<usize> = 1..=30;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Photo {
    pub urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotoUrls {
    pub regular: String,
}

pub struct UnsplashProvider {
    http: Client,
    base_url: String,
    access_key: Option<String>,
}

impl UnsplashProvider {
    pub fn new(http: Client, base_url: impl Into<String>, access_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_key,
        }
    }
}

#[async_trait]
impl StockProvider for UnsplashProvider {
    fn provider(&self) -> Provider {
        Provider::Unsplash
    }

    fn is_configured(&self) -> bool {
        self.access_key.is_some()
    }

    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<String>> {
        let key = self
            .access_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(Provider::Unsplash))?;
        let per_page = clamp_per_page(limit, PER_PAGE).to_string();
        let url = endpoint(&self.base_url, "search/photos");

        debug!(query = %query, per_page = %per_page, "Searching Unsplash");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Client-ID {}", key))
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::request(Provider::Unsplash, e))?;

        let body: SearchResponse = read_json(Provider::Unsplash, response).await?;

        Ok(body
            .results
            .into_iter()
            .map(|photo| photo.urls.regular)
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_url_required() {
        let ok: SearchResponse = serde_json::from_value(serde_json::json!({
            "total": 1,
            "results": [{ "urls": { "raw": "https://images.unsplash.com/raw", "regular": "https://images.unsplash.com/regular" } }]
        }))
        .unwrap();
        assert_eq!(ok.results[0].urls.regular, "https://images.unsplash.com/regular");

        let missing: Result<SearchResponse, _> = serde_json::from_value(serde_json::json!({
            "results": [{ "urls": { "raw": "https://images.unsplash.com/raw" } }]
        }));
        assert!(missing.is_err());
    }
}
