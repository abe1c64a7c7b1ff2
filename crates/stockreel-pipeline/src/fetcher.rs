//! Concurrent stock clip fetching.
//!
//! Every search term issues one provider search. Searches run concurrently
//! under a per-request semaphore, each with its own timeout, and the whole
//! stage shares one deadline and one cancellation signal. A failed term
//! yields no clips and never fails the request; when too little footage
//! comes back the result is topped up from the fallback pool.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use stockreel_models::{ClipCandidate, ClipPlan, Provider, SearchTerm, StockSource};
use tokio::sync::{watch, Semaphore};

use crate::config::PipelineConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::RequestLogger;
use crate::metrics;
use crate::providers::ProviderRegistry;

/// Below this many provider clips the fallback pool is used.
pub const MIN_PROVIDER_CLIPS: usize = 5;

/// Most fallback clips added to one result.
pub const MAX_FALLBACK_CLIPS: usize = 10;

/// Clips and bookkeeping from one fetch stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Provider clips in term order, followed by any fallback clips
    pub clips: Vec<ClipCandidate>,
    pub terms_succeeded: usize,
    pub terms_failed: usize,
    pub fallback_clips: usize,
}

impl FetchOutcome {
    pub fn urls(&self) -> Vec<String> {
        self.clips.iter().map(|c| c.url.clone()).collect()
    }

    /// Whether fallback footage was needed.
    pub fn is_degraded(&self) -> bool {
        self.fallback_clips > 0
    }
}

pub struct StockMediaFetcher {
    registry: Arc<ProviderRegistry>,
    fallback_clips: Vec<String>,
    provider_timeout: Duration,
    fetch_deadline: Duration,
    max_parallel_fetches: usize,
}

impl StockMediaFetcher {
    pub fn new(registry: Arc<ProviderRegistry>, config: &PipelineConfig) -> Self {
        Self {
            registry,
            fallback_clips: config.fallback_clips.clone(),
            provider_timeout: config.provider_timeout,
            fetch_deadline: config.fetch_deadline,
            max_parallel_fetches: config.max_parallel_fetches.max(1),
        }
    }

    /// Fetch clips for every term.
    ///
    /// Terms still pending when the deadline passes or `cancel` turns true
    /// count as failed. Provider clips keep term order regardless of which
    /// search finished first.
    pub async fn fetch_clips(
        &self,
        terms: &[SearchTerm],
        source: StockSource,
        plan: &ClipPlan,
        cancel: watch::Receiver<bool>,
        logger: &RequestLogger,
    ) -> FetchOutcome {
        let semaphore = Semaphore::new(self.max_parallel_fetches);
        let deadline = tokio::time::Instant::now() + self.fetch_deadline;

        logger.log_progress(&format!(
            "Fetching clips for {} terms from {} ({} per term)",
            terms.len(),
            source,
            plan.clips_per_term
        ));

        let searches = terms.iter().enumerate().map(|(index, term)| {
            let provider = source.provider_for_term(index);
            let semaphore = &semaphore;
            let mut cancel = cancel.clone();

            async move {
                let started = Instant::now();
                let result = tokio::select! {
                    result = self.search_term(semaphore, provider, term, plan.clips_per_term) => result,
                    _ = tokio::time::sleep_until(deadline) => Err(ProviderError::DeadlineExceeded),
                    _ = wait_for_cancel(&mut cancel) => Err(ProviderError::Cancelled),
                };

                let outcome = match &result {
                    Ok(_) => "success",
                    Err(e) => e.kind(),
                };
                metrics::record_provider_call(provider, outcome, started.elapsed().as_secs_f64());

                (provider, term, result)
            }
        });

        let results = join_all(searches).await;

        let mut outcome = FetchOutcome::default();
        for (provider, term, result) in results {
            match result {
                Ok(urls) => {
                    outcome.terms_succeeded += 1;
                    metrics::record_provider_clips(provider, urls.len());
                    outcome.clips.extend(
                        urls.into_iter()
                            .take(plan.clips_per_term)
                            .map(|url| ClipCandidate::from_provider(url, provider)),
                    );
                }
                Err(e) => {
                    outcome.terms_failed += 1;
                    logger.log_warning(&format!(
                        "Search for '{}' on {} failed: {}",
                        term.query, provider, e
                    ));
                }
            }
        }

        let fallback = self.fallback_top_up(outcome.clips.len(), plan.estimated_clips_needed);
        if !fallback.is_empty() {
            logger.log_warning(&format!(
                "Only {} provider clips collected, adding {} fallback clips",
                outcome.clips.len(),
                fallback.len()
            ));
            metrics::record_fallback_clips(fallback.len());
            outcome.fallback_clips = fallback.len();
            outcome.clips.extend(fallback);
        }

        logger.log_progress(&format!(
            "Fetched {} clips ({} terms ok, {} failed, {} fallback)",
            outcome.clips.len(),
            outcome.terms_succeeded,
            outcome.terms_failed,
            outcome.fallback_clips
        ));

        outcome
    }

    async fn search_term(
        &self,
        semaphore: &Semaphore,
        provider: Provider,
        term: &SearchTerm,
        limit: usize,
    ) -> ProviderResult<Vec<String>> {
        let client = self
            .registry
            .get(provider)
            .ok_or(ProviderError::NotRegistered(provider))?;

        let _permit = semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Cancelled)?;

        tokio::time::timeout(self.provider_timeout, client.search(&term.query, limit))
            .await
            .map_err(|_| ProviderError::Timeout(self.provider_timeout.as_secs()))?
    }

    /// Fallback clips to append when fewer than [`MIN_PROVIDER_CLIPS`] were
    /// collected. Taken round-robin from the start of the pool.
    fn fallback_top_up(&self, collected: usize, needed: usize) -> Vec<ClipCandidate> {
        if collected >= MIN_PROVIDER_CLIPS {
            return Vec::new();
        }

        let count = MAX_FALLBACK_CLIPS.min(needed.saturating_sub(collected));
        self.fallback_clips
            .iter()
            .cycle()
            .take(count)
            .map(ClipCandidate::fallback)
            .collect()
    }
}

/// Resolves once the flag turns true. A dropped sender never cancels.
async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use stockreel_models::ClipOrigin;

    use super::*;
    use crate::planner::plan_clips;
    use crate::providers::StockProvider;

    /// Returns `{provider}/{query}/{n}` URLs after an optional delay.
    struct StubProvider {
        provider: Provider,
        delay: Duration,
        fail: bool,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl StubProvider {
        fn new(provider: Provider) -> Self {
            Self {
                provider,
                delay: Duration::ZERO,
                fail: false,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        fn failing(provider: Provider) -> Self {
            Self {
                fail: true,
                ..Self::new(provider)
            }
        }

        fn slow(provider: Provider, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(provider)
            }
        }
    }

    #[async_trait]
    impl StockProvider for StubProvider {
        fn provider(&self) -> Provider {
            self.provider
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<String>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail {
                return Err(ProviderError::Status {
                    provider: self.provider,
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok((0..limit)
                .map(|n| format!("https://{}.example/{}/{}", self.provider, query, n))
                .collect())
        }
    }

    fn terms(n: usize) -> Vec<SearchTerm> {
        (0..n).map(|i| SearchTerm::new(i, format!("term{}", i))).collect()
    }

    fn fetcher(registry: ProviderRegistry, config: PipelineConfig) -> StockMediaFetcher {
        StockMediaFetcher::new(Arc::new(registry), &config)
    }

    fn logger() -> RequestLogger {
        RequestLogger::new("test", "fetch")
    }

    fn no_cancel() -> watch::Receiver<bool> {
        watch::channel(false).1
    }

    #[tokio::test]
    async fn test_all_failing_uses_fallback() {
        let registry = ProviderRegistry::new()
            .with_provider(Arc::new(StubProvider::failing(Provider::Pixabay)))
            .with_provider(Arc::new(StubProvider::failing(Provider::Pexels)));
        let fetcher = fetcher(registry, PipelineConfig::default());

        let terms = terms(15);
        let plan = plan_clips(10.0, terms.len());
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Mixed, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(outcome.terms_failed, 15);
        assert_eq!(outcome.terms_succeeded, 0);
        assert_eq!(outcome.clips.len(), MAX_FALLBACK_CLIPS);
        assert_eq!(outcome.fallback_clips, MAX_FALLBACK_CLIPS);
        assert!(outcome.is_degraded());

        // Each of the five default samples appears twice, in pool order
        let pool = PipelineConfig::default().fallback_clips;
        for (i, clip) in outcome.clips.iter().enumerate() {
            assert_eq!(clip.url, pool[i % pool.len()]);
            assert_eq!(clip.origin, ClipOrigin::Fallback);
        }
    }

    #[tokio::test]
    async fn test_mixed_rotation_and_order() {
        // Pixabay is slower, so Pexels results finish first
        let registry = ProviderRegistry::new()
            .with_provider(Arc::new(StubProvider::slow(
                Provider::Pixabay,
                Duration::from_millis(30),
            )))
            .with_provider(Arc::new(StubProvider::new(Provider::Pexels)));
        let fetcher = fetcher(registry, PipelineConfig::default());

        let terms = terms(4);
        let plan = plan_clips(10.0, terms.len());
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Mixed, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(plan.clips_per_term, 10);
        assert_eq!(outcome.clips.len(), 40);
        assert!(!outcome.is_degraded());

        for (i, chunk) in outcome.clips.chunks(10).enumerate() {
            let expected = if i % 2 == 0 { Provider::Pixabay } else { Provider::Pexels };
            for clip in chunk {
                assert_eq!(clip.origin.provider(), Some(expected));
                assert!(clip.url.contains(&format!("/term{}/", i)));
            }
        }
    }

    #[tokio::test]
    async fn test_single_source_never_rotates() {
        let registry =
            ProviderRegistry::new().with_provider(Arc::new(StubProvider::new(Provider::Unsplash)));
        let fetcher = fetcher(registry, PipelineConfig::default());

        let terms = terms(5);
        let plan = plan_clips(10.0, terms.len());
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Unsplash, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(outcome.terms_succeeded, 5);
        assert!(outcome
            .clips
            .iter()
            .all(|c| c.origin.provider() == Some(Provider::Unsplash)));
    }

    #[tokio::test]
    async fn test_partial_results_below_minimum_topped_up() {
        // Term 0 succeeds with 2 clips, term 1 (Pexels) is unregistered
        let registry =
            ProviderRegistry::new().with_provider(Arc::new(StubProvider::new(Provider::Pixabay)));
        let config = PipelineConfig {
            fallback_clips: vec!["https://fallback.example/only.mp4".to_string()],
            ..PipelineConfig::default()
        };
        let fetcher = fetcher(registry, config);

        let terms = terms(2);
        let plan = ClipPlan {
            estimated_clips_needed: 4,
            clips_per_term: 2,
        };
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Mixed, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(outcome.terms_succeeded, 1);
        assert_eq!(outcome.terms_failed, 1);
        // min(10, 4 - 2) fallback clips after the provider clips
        assert_eq!(outcome.fallback_clips, 2);
        assert_eq!(
            outcome.urls(),
            vec![
                "https://pixabay.example/term0/0",
                "https://pixabay.example/term0/1",
                "https://fallback.example/only.mp4",
                "https://fallback.example/only.mp4",
            ]
        );
    }

    #[tokio::test]
    async fn test_no_terms_fallback_only() {
        let fetcher = fetcher(ProviderRegistry::new(), PipelineConfig::default());
        let plan = plan_clips(10.0, 0);
        let outcome = fetcher
            .fetch_clips(&[], StockSource::Mixed, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(outcome.terms_succeeded + outcome.terms_failed, 0);
        assert_eq!(outcome.clips.len(), MAX_FALLBACK_CLIPS);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let stub = Arc::new(StubProvider::slow(Provider::Pexels, Duration::from_millis(20)));
        let registry = ProviderRegistry::new().with_provider(stub.clone());
        let config = PipelineConfig {
            max_parallel_fetches: 2,
            ..PipelineConfig::default()
        };
        let fetcher = fetcher(registry, config);

        let terms = terms(8);
        let plan = plan_clips(2.0, terms.len());
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Pexels, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(outcome.terms_succeeded, 8);
        assert!(stub.max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_provider_timeout_counts_as_failure() {
        let registry = ProviderRegistry::new().with_provider(Arc::new(StubProvider::slow(
            Provider::Pexels,
            Duration::from_secs(5),
        )));
        let config = PipelineConfig {
            provider_timeout: Duration::from_millis(20),
            ..PipelineConfig::default()
        };
        let fetcher = fetcher(registry, config);

        let terms = terms(3);
        let plan = plan_clips(1.0, terms.len());
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Pexels, &plan, no_cancel(), &logger())
            .await;

        assert_eq!(outcome.terms_failed, 3);
        assert_eq!(outcome.fallback_clips, MAX_FALLBACK_CLIPS);
    }

    #[tokio::test]
    async fn test_deadline_keeps_completed_terms() {
        // Pixabay answers immediately, Pexels outlives the deadline
        let registry = ProviderRegistry::new()
            .with_provider(Arc::new(StubProvider::new(Provider::Pixabay)))
            .with_provider(Arc::new(StubProvider::slow(
                Provider::Pexels,
                Duration::from_secs(5),
            )));
        let config = PipelineConfig {
            fetch_deadline: Duration::from_millis(50),
            ..PipelineConfig::default()
        };
        let fetcher = fetcher(registry, config);

        let terms = terms(4);
        let plan = plan_clips(10.0, terms.len());
        let started = Instant::now();
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Mixed, &plan, no_cancel(), &logger())
            .await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(outcome.terms_succeeded, 2);
        assert_eq!(outcome.terms_failed, 2);
        assert_eq!(outcome.clips.len(), 20);
        assert!(!outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_cancellation_fails_pending_terms() {
        let registry = ProviderRegistry::new().with_provider(Arc::new(StubProvider::slow(
            Provider::Pexels,
            Duration::from_secs(5),
        )));
        let fetcher = fetcher(registry, PipelineConfig::default());

        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });

        let terms = terms(3);
        let plan = plan_clips(1.0, terms.len());
        let started = Instant::now();
        let outcome = fetcher
            .fetch_clips(&terms, StockSource::Pexels, &plan, rx, &logger())
            .await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(outcome.terms_failed, 3);
        assert_eq!(outcome.clips.len(), MAX_FALLBACK_CLIPS);
        assert!(outcome.clips.iter().all(|c| c.origin.is_fallback()));
    }

    #[test]
    fn test_enough_clips_skip_fallback() {
        let fetcher = fetcher(ProviderRegistry::new(), PipelineConfig::default());
        assert!(fetcher.fallback_top_up(MIN_PROVIDER_CLIPS, 40).is_empty());
        assert_eq!(fetcher.fallback_top_up(4, 40).len(), MAX_FALLBACK_CLIPS);
        assert_eq!(fetcher.fallback_top_up(0, 3).len(), 3);
    }
}
