use std::sync::Arc;

use anyhow::Result;

use crate::core::config::SearchLimits;
use crate::core::registry::SourceRegistry;

/// Static identifying user-agent sent with every outbound request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; DocScoutBot/1.0)";

/// Shared per-process state: the pooled HTTP client, the read-only source
/// registry, and the outbound concurrency limiter. Constructed by the caller
/// and passed into the search entry points; dropped at shutdown, which
/// releases the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    pub registry: Arc<SourceRegistry>,
    pub limits: SearchLimits,
    // Concurrency control for external calls
    pub outbound_limit: Arc<tokio::sync::Semaphore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sources", &self.registry.len())
            .field("limits", &self.limits)
            .finish()
    }
}

impl AppState {
    /// Build state with a client configured per the crawl contract: 30s
    /// total-request timeout, pooled connections, fixed user-agent.
    pub fn new(registry: Arc<SourceRegistry>) -> Result<Self> {
        let limits = SearchLimits::from_env();
        let http_client = reqwest::Client::builder()
            .timeout(limits.request_timeout)
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(limits.per_host_connection_limit)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self::with_client(http_client, registry, limits))
    }

    /// Build state around an externally constructed client. Lets callers own
    /// the client lifecycle and lets tests tighten the limits.
    pub fn with_client(
        http_client: reqwest::Client,
        registry: Arc<SourceRegistry>,
        limits: SearchLimits,
    ) -> Self {
        let outbound_limit = Arc::new(tokio::sync::Semaphore::new(limits.total_connection_limit));
        Self {
            http_client,
            registry,
            limits,
            outbound_limit,
        }
    }
}
