use std::env;
use std::time::Duration;

/// Caps and deadlines for one search call. Defaults mirror the documented
/// crawl contract; a handful of knobs accept env-var overrides.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// URLs fetched per source, counted after discovery and filtering.
    pub max_urls_per_source: usize,
    /// Results kept per source after scoring.
    pub max_results_per_source: usize,
    /// `<loc>` entries taken from a sitemap.
    pub sitemap_url_cap: usize,
    /// Output size when the caller does not pass a maximum.
    pub default_max_results: usize,
    /// Concurrent fetch+extract operations within one source.
    pub fetch_concurrency: usize,
    /// Process-wide in-flight request cap, enforced with a semaphore.
    pub total_connection_limit: usize,
    /// Idle connections reqwest keeps pooled per host.
    pub per_host_connection_limit: usize,
    /// Per-request deadline enforced by the HTTP client.
    pub request_timeout: Duration,
    /// Whole-call deadline for the blocking wrapper.
    pub overall_timeout: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_urls_per_source: 10,
            max_results_per_source: 5,
            sitemap_url_cap: 30,
            default_max_results: 20,
            fetch_concurrency: 5,
            total_connection_limit: 10,
            per_host_connection_limit: 5,
            request_timeout: Duration::from_secs(30),
            overall_timeout: Duration::from_secs(30),
        }
    }
}

impl SearchLimits {
    /// Defaults with env-var overrides applied.
    pub fn from_env() -> Self {
        let mut limits = Self::default();
        if let Some(v) = env_usize("DOC_SCOUT_FETCH_CONCURRENCY") {
            limits.fetch_concurrency = v;
        }
        if let Some(v) = env_usize("DOC_SCOUT_TOTAL_CONNECTIONS") {
            limits.total_connection_limit = v;
        }
        if let Some(v) = env_usize("DOC_SCOUT_REQUEST_TIMEOUT_SECS") {
            limits.request_timeout = Duration::from_secs(v as u64);
        }
        if let Some(v) = env_usize("DOC_SCOUT_SEARCH_TIMEOUT_SECS") {
            limits.overall_timeout = Duration::from_secs(v as u64);
        }
        limits
    }
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.trim().parse::<usize>().ok())
}
