//! Flickr photo search.
//!
//! Flickr answers HTTP 200 even for failed calls; the `stat` field carries
//! the real outcome.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use stockreel_models::Provider;
use tracing::debug;

use super::{clamp_per_page, endpoint, read_json, StockProvider};
use crate::error::{ProviderError, ProviderResult};

const PER_PAGE: std::ops::RangeInclusive<usize> = 1..=500;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub stat: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub photos: Option<PhotoPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotoPage {
    pub photo: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Photo {
    pub id: String,
    pub secret: String,
    pub server: String,
    #[serde(default)]
    pub url_l: Option<String>,
}

impl Photo {
    /// `url_l` when present, else the static CDN URL at size `b`.
    fn image_url(&self) -> String {
        match self.url_l.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "https://live.staticflickr.com/{}/{}_{}_b.jpg",
                self.server, self.id, self.secret
            ),
        }
    }
}

pub struct FlickrProvider {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FlickrProvider {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl StockProvider for FlickrProvider {
    fn provider(&self) -> Provider {
        Provider::Flickr
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<String>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(Provider::Flickr))?;
        let per_page = clamp_per_page(limit, PER_PAGE).to_string();
        let url = endpoint(&self.base_url, "services/rest/");

        debug!(query = %query, per_page = %per_page, "Searching Flickr");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("method", "flickr.photos.search"),
                ("api_key", key),
                ("text", query),
                ("per_page", per_page.as_str()),
                ("format", "json"),
                ("nojsoncallback", "1"),
                ("extras", "url_l"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::request(Provider::Flickr, e))?;

        let body: SearchResponse = read_json(Provider::Flickr, response).await?;
        collect_urls(body, limit)
    }
}

fn collect_urls(body: SearchResponse, limit: usize) -> ProviderResult<Vec<String>> {
    if body.stat != "ok" {
        return Err(ProviderError::Rejected {
            provider: Provider::Flickr,
            message: body.message.unwrap_or(body.stat),
        });
    }

    let page = body
        .photos
        .ok_or_else(|| ProviderError::decode(Provider::Flickr, "missing photos"))?;

    Ok(page.photo.iter().map(Photo::image_url).take(limit).collect())
}
