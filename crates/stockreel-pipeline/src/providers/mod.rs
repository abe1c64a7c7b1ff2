//! Stock media providers.
//!
//! Each provider (Pixabay, Pexels, Unsplash, Flickr) has its own client
//! implementing the [`StockProvider`] trait. The [`ProviderRegistry`] maps a
//! [`Provider`] to its client so tests can inject stubs.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use stockreel_models::Provider;

use crate::config::PipelineConfig;
use crate::error::{ProviderError, ProviderResult};

pub mod flickr;
pub mod pexels;
pub mod pixabay;
pub mod unsplash;

pub use flickr::FlickrProvider;
pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;
pub use unsplash::UnsplashProvider;

/// Longest error body kept in a [`ProviderError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// A stock media search backend.
#[async_trait]
pub trait StockProvider: Send + Sync {
    /// Which provider this client talks to.
    fn provider(&self) -> Provider;

    /// Whether the client has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Search for media matching `query`.
    ///
    /// Returns at most `limit` media URLs in provider order.
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<String>>;
}

/// Registry of provider clients.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Provider, Arc<dyn StockProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the HTTP clients for every provider.
    pub fn from_config(config: &PipelineConfig, http: Client) -> Self {
        let key = |p: Provider| config.credentials.get(p).map(str::to_string);
        let base = |p: Provider| config.endpoints.get(p).to_string();

        Self::new()
            .with_provider(Arc::new(PixabayProvider::new(
                http.clone(),
                base(Provider::Pixabay),
                key(Provider::Pixabay),
            )))
            .with_provider(Arc::new(PexelsProvider::new(
                http.clone(),
                base(Provider::Pexels),
                key(Provider::Pexels),
            )))
            .with_provider(Arc::new(UnsplashProvider::new(
                http.clone(),
                base(Provider::Unsplash),
                key(Provider::Unsplash),
            )))
            .with_provider(Arc::new(FlickrProvider::new(
                http,
                base(Provider::Flickr),
                key(Provider::Flickr),
            )))
    }

    /// Register a client, replacing any previous one for the same provider.
    pub fn register(&mut self, client: Arc<dyn StockProvider>) {
        self.providers.insert(client.provider(), client);
    }

    pub fn with_provider(mut self, client: Arc<dyn StockProvider>) -> Self {
        self.register(client);
        self
    }

    pub fn get(&self, provider: Provider) -> Option<Arc<dyn StockProvider>> {
        self.providers.get(&provider).cloned()
    }

    /// Registered providers that are ready to search.
    pub fn configured(&self) -> Vec<Provider> {
        Provider::ALL
            .iter()
            .copied()
            .filter(|p| self.providers.get(p).is_some_and(|c| c.is_configured()))
            .collect()
    }
}

/// Clamp a result limit into a provider's accepted `per_page` range.
pub fn clamp_per_page(limit: usize, range: RangeInclusive<usize>) -> usize {
    limit.clamp(*range.start(), *range.end())
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Check the status and decode a provider response body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: Provider,
    response: Response,
) -> ProviderResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::decode(provider, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unconfigured;

    #[async_trait]
    impl StockProvider for Unconfigured {
        fn provider(&self) -> Provider {
            Provider::Unsplash
        }

        fn is_configured(&self) -> bool {
            false
        }

        async fn search(&self, _query: &str, _limit: usize) -> ProviderResult<Vec<String>> {
            Err(ProviderError::MissingApiKey(Provider::Unsplash))
        }
    }

    #[test]
    fn test_clamp_per_page() {
        assert_eq!(clamp_per_page(1, 3..=200), 3);
        assert_eq!(clamp_per_page(40, 3..=200), 40);
        assert_eq!(clamp_per_page(500, 1..=80), 80);
        assert_eq!(clamp_per_page(0, 1..=30), 1);
    }

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("https://pixabay.com/api/", "/videos/"), "https://pixabay.com/api/videos/");
        assert_eq!(endpoint("http://127.0.0.1:9000", "search/photos"), "http://127.0.0.1:9000/search/photos");
    }

    #[test]
    fn test_registry_from_config() {
        let mut config = PipelineConfig::default();
        config.credentials.pexels = Some("key".to_string());

        let registry = ProviderRegistry::from_config(&config, Client::new());
        for provider in Provider::ALL {
            assert!(registry.get(*provider).is_some());
        }
        assert_eq!(registry.configured(), vec![Provider::Pexels]);
    }

    #[test]
    fn test_registry_register_replaces() {
        let mut config = PipelineConfig::default();
        config.credentials.unsplash = Some("key".to_string());

        let mut registry = ProviderRegistry::from_config(&config, Client::new());
        assert_eq!(registry.configured(), vec![Provider::Unsplash]);

        registry.register(Arc::new(Unconfigured));
        assert!(registry.configured().is_empty());
    }
}
