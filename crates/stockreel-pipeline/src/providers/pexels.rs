//! Pexels video search.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use stockreel_models::Provider;
use tracing::debug;

use super::{clamp_per_page, endpoint, read_json, StockProvider};
use crate::error::{ProviderError, ProviderResult};

const PER_PAGE: std::ops::RangeInclusive<usize> = 1..=80;

/// File qualities accepted from a video's file list.
const ACCEPTED_QUALITIES: &[&str] = &["sd", "hd"];

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Video {
    pub video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoFile {
    #[serde(default)]
    pub quality: Option<String>,
    pub link: String,
}

impl Video {
    /// First file with an accepted quality.
    fn playable_link(&self) -> Option<&str> {
        self.video_files
            .iter()
            .find(|f| {
                f.quality
                    .as_deref()
                    .is_some_and(|q| ACCEPTED_QUALITIES.contains(&q))
            })
            .map(|f| f.link.as_str())
    }
}

pub struct PexelsProvider {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PexelsProvider {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl StockProvider for PexelsProvider {
    fn provider(&self) -> Provider {
        Provider::Pexels
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<String>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(Provider::Pexels))?;
        let per_page = clamp_per_page(limit, PER_PAGE).to_string();
        let url = endpoint(&self.base_url, "videos/search");

        debug!(query = %query, per_page = %per_page, "Searching Pexels");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::request(Provider::Pexels, e))?;

        let body: SearchResponse = read_json(Provider::Pexels, response).await?;

        Ok(body
            .videos
            .iter()
            .filter_map(Video::playable_link)
            .take(limit)
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sd_or_hd_file() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "videos": [
                { "video_files": [
                    { "quality": "uhd", "link": "https://videos.pexels.com/1-uhd.mp4" },
                    { "quality": "hd", "link": "https://videos.pexels.com/1-hd.mp4" },
                    { "quality": "sd", "link": "https://videos.pexels.com/1-sd.mp4" }
                ] },
                { "video_files": [
                    { "quality": null, "link": "https://videos.pexels.com/2-hls.m3u8" },
                    { "quality": "sd", "link": "https://videos.pexels.com/2-sd.mp4" }
                ] },
                { "video_files": [
                    { "quality": "uhd", "link": "https://videos.pexels.com/3-uhd.mp4" }
                ] }
            ]
        }))
        .unwrap();

        let links: Vec<&str> = response.videos.iter().filter_map(Video::playable_link).collect();
        assert_eq!(
            links,
            vec![
                "https://videos.pexels.com/1-hd.mp4",
                "https://videos.pexels.com/2-sd.mp4",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_key() {
        let provider = PexelsProvider::new(Client::new(), "http://127.0.0.1:1", None);
        let err = provider.search("ocean", 3).await.unwrap_err();
        assert_eq!(err.kind(), "missing_key");
    }
}
