//! Pipeline configuration.

use std::time::Duration;

use stockreel_models::Provider;
use tracing::warn;
use url::Url;

/// Sample clips served when providers return too little footage.
pub const DEFAULT_FALLBACK_CLIPS: &[&str] = &[
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
];

/// API keys per provider. A missing key makes that provider's searches fail.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub pixabay: Option<String>,
    pub pexels: Option<String>,
    pub unsplash: Option<String>,
    pub flickr: Option<String>,
}

impl ProviderCredentials {
    pub fn from_env() -> Self {
        Self {
            pixabay: non_empty_var("PIXABAY_API_KEY"),
            pexels: non_empty_var("PEXELS_API_KEY"),
            unsplash: non_empty_var("UNSPLASH_ACCESS_KEY"),
            flickr: non_empty_var("FLICKR_API_KEY"),
        }
    }

    pub fn get(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Pixabay => self.pixabay.as_deref(),
            Provider::Pexels => self.pexels.as_deref(),
            Provider::Unsplash => self.unsplash.as_deref(),
            Provider::Flickr => self.flickr.as_deref(),
        }
    }
}

/// Search API base URLs per provider.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub pixabay: String,
    pub pexels: String,
    pub unsplash: String,
    pub flickr: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            pixabay: "https://pixabay.com/api".to_string(),
            pexels: "https://api.pexels.com".to_string(),
            unsplash: "https://api.unsplash.com".to_string(),
            flickr: "https://www.flickr.com".to_string(),
        }
    }
}

impl ProviderEndpoints {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            pixabay: non_empty_var("PIXABAY_BASE_URL").unwrap_or(defaults.pixabay),
            pexels: non_empty_var("PEXELS_BASE_URL").unwrap_or(defaults.pexels),
            unsplash: non_empty_var("UNSPLASH_BASE_URL").unwrap_or(defaults.unsplash),
            flickr: non_empty_var("FLICKR_BASE_URL").unwrap_or(defaults.flickr),
        }
    }

    pub fn get(&self, provider: Provider) -> &str {
        match provider {
            Provider::Pixabay => &self.pixabay,
            Provider::Pexels => &self.pexels,
            Provider::Unsplash => &self.unsplash,
            Provider::Flickr => &self.flickr,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub credentials: ProviderCredentials,
    pub endpoints: ProviderEndpoints,
    /// Fallback clip pool, never empty
    pub fallback_clips: Vec<String>,
    /// Timeout for a single provider call
    pub provider_timeout: Duration,
    /// Shared deadline for the whole fetch stage
    pub fetch_deadline: Duration,
    /// Maximum provider calls in flight per request
    pub max_parallel_fetches: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            credentials: ProviderCredentials::default(),
            endpoints: ProviderEndpoints::default(),
            fallback_clips: default_fallback_clips(),
            provider_timeout: Duration::from_secs(10),
            fetch_deadline: Duration::from_secs(45),
            max_parallel_fetches: 4,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            credentials: ProviderCredentials::from_env(),
            endpoints: ProviderEndpoints::from_env(),
            fallback_clips: std::env::var("FALLBACK_CLIP_URLS")
                .map(|raw| parse_fallback_clips(&raw))
                .unwrap_or_else(|_| default_fallback_clips()),
            provider_timeout: Duration::from_secs(
                std::env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            fetch_deadline: Duration::from_secs(
                std::env::var("FETCH_DEADLINE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(45),
            ),
            max_parallel_fetches: std::env::var("MAX_PARALLEL_FETCHES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4usize)
                .max(1),
        }
    }
}

fn default_fallback_clips() -> Vec<String> {
    DEFAULT_FALLBACK_CLIPS.iter().map(|s| s.to_string()).collect()
}

/// Parse a comma-separated fallback pool.
///
/// Entries that are not http(s) URLs are dropped. An empty result yields the
/// built-in samples.
pub fn parse_fallback_clips(raw: &str) -> Vec<String> {
    let clips: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => true,
            _ => {
                warn!(entry = %s, "Ignoring invalid fallback clip URL");
                false
            }
        })
        .map(str::to_string)
        .collect();

    if clips.is_empty() {
        default_fallback_clips()
    } else {
        clips
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.fallback_clips.len(), 5);
        assert_eq!(config.max_parallel_fetches, 4);
        assert_eq!(config.provider_timeout, Duration::from_secs(10));
        assert!(Provider::ALL
            .iter()
            .all(|p| config.credentials.get(*p).is_none()));
    }

    #[test]
    fn test_parse_fallback_clips() {
        let clips = parse_fallback_clips(
            " https://a.example/1.mp4 ,not a url, ftp://b.example/2.mp4,http://c.example/3.mp4",
        );
        assert_eq!(
            clips,
            vec!["https://a.example/1.mp4", "http://c.example/3.mp4"]
        );
    }

    #[test]
    fn test_parse_fallback_clips_empty_uses_defaults() {
        assert_eq!(parse_fallback_clips(" , ,"), default_fallback_clips());
        assert_eq!(parse_fallback_clips(""), default_fallback_clips());
    }

    #[test]
    fn test_credentials_lookup() {
        let credentials = ProviderCredentials {
            pexels: Some("px-key".to_string()),
            ..Default::default()
        };
        assert_eq!(credentials.get(Provider::Pexels), Some("px-key"));
        assert_eq!(credentials.get(Provider::Pixabay), None);
    }
}
