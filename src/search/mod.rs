pub mod discover;
pub mod score;
pub mod sitemap;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::core::types::{ExtractedDocument, FormattedResult, ScoredResult, Source};
use crate::core::AppState;
use crate::scraping::PageScraper;
use score::RelevanceScorer;

/// `updated_at` sentinel used when a page carried no publish date.
pub const FALLBACK_UPDATED_AT: &str = "2024-01-15T10:30:00Z";

/// Search the configured sources for a query and return ranked, attributed
/// results.
///
/// With `source_ids` absent, all search-enabled sources are queried;
/// otherwise only the named sources that resolve to enabled registry entries
/// (unknown ids are skipped, not an error). Never returns an error: any
/// failure inside one source's pipeline is caught at the source boundary and
/// that source contributes nothing.
pub async fn search_sources(
    state: &Arc<AppState>,
    query: &str,
    source_ids: Option<&[String]>,
    max_results: usize,
) -> Vec<FormattedResult> {
    let start = Instant::now();

    let sources: Vec<Source> = match source_ids {
        None => state
            .registry
            .list_enabled_sources()
            .into_iter()
            .cloned()
            .collect(),
        Some(ids) => ids
            .iter()
            .filter_map(|id| match state.registry.get_source(id) {
                Some(source) if source.search_enabled => Some(source.clone()),
                Some(_) => {
                    debug!("Source '{}' is not search-enabled, skipping", id);
                    None
                }
                None => {
                    debug!("Unknown source id '{}', skipping", id);
                    None
                }
            })
            .collect(),
    };

    let scraper = PageScraper::new(state);
    let mut all_results: Vec<FormattedResult> = Vec::new();

    for source in &sources {
        info!("Searching {} for: {}", source.name, query);
        match search_one_source(state, &scraper, source, query).await {
            Ok(mut results) => {
                info!("Found {} results from {}", results.len(), source.name);
                all_results.append(&mut results);
            }
            Err(e) => {
                warn!("Search failed for source {}: {}", source.id, e);
            }
        }
    }

    all_results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all_results.truncate(max_results);

    info!(
        "Search for '{}' returned {} results across {} sources in {}ms",
        query,
        all_results.len(),
        sources.len(),
        start.elapsed().as_millis()
    );
    all_results
}

/// Blocking variant for callers that cannot suspend.
///
/// Runs the whole pipeline on a dedicated thread with its own runtime under
/// one overall deadline. Timeout or any internal failure yields an empty
/// list; partial results are deliberately discarded in favor of a simple
/// timeout contract.
pub fn search_sources_blocking(
    state: Arc<AppState>,
    query: &str,
    source_ids: Option<Vec<String>>,
    max_results: usize,
) -> Vec<FormattedResult> {
    let query = query.to_string();
    let deadline = state.limits.overall_timeout;

    let worker = std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("Failed to start search runtime: {}", e);
                return Vec::new();
            }
        };
        runtime.block_on(async {
            let search = search_sources(&state, &query, source_ids.as_deref(), max_results);
            match tokio::time::timeout(deadline, search).await {
                Ok(results) => results,
                Err(_) => {
                    warn!(
                        "Search timed out after {:?} for query: {}",
                        deadline, query
                    );
                    Vec::new()
                }
            }
        })
    });

    match worker.join() {
        Ok(results) => results,
        Err(_) => {
            warn!("Search worker thread panicked");
            Vec::new()
        }
    }
}

/// Run one source's discover → fetch → extract → score pipeline.
///
/// Individual URL failures are skipped in place; anything else that errors
/// is propagated to the per-source boundary in `search_sources`.
async fn search_one_source(
    state: &Arc<AppState>,
    scraper: &PageScraper,
    source: &Source,
    query: &str,
) -> Result<Vec<FormattedResult>> {
    let limits = &state.limits;

    let urls = discover::urls_for_source(scraper, source, limits).await;
    if urls.is_empty() {
        debug!("No URLs resolved for {}", source.name);
        return Ok(Vec::new());
    }

    let documents: Vec<ExtractedDocument> =
        stream::iter(urls.into_iter().take(limits.max_urls_per_source))
            .map(|url| async move {
                match scraper.fetch_and_extract(&url).await {
                    Ok(document) => document,
                    Err(e) => {
                        warn!("Failed to fetch {}: {}", url, e);
                        None
                    }
                }
            })
            .buffer_unordered(limits.fetch_concurrency)
            .filter_map(|document| async move { document })
            .collect()
            .await;

    if documents.is_empty() {
        debug!("No content scraped from {}", source.name);
        return Ok(Vec::new());
    }

    let scorer = RelevanceScorer::new(query);
    let ranked = scorer.rank(&documents);

    Ok(ranked
        .into_iter()
        .take(limits.max_results_per_source)
        .map(|result| format_result(result, source))
        .collect())
}

/// Attach source attribution and display fallbacks to a scored result.
fn format_result(result: ScoredResult, source: &Source) -> FormattedResult {
    FormattedResult {
        title: result.title,
        url: result.url,
        source: source.id.clone(),
        source_name: source.name.clone(),
        source_icon: source.display_config.icon.clone(),
        snippet: result.snippet,
        updated_at: result
            .published_date
            .unwrap_or_else(|| FALLBACK_UPDATED_AT.to_string()),
        score: result.score,
        breadcrumb: result
            .breadcrumb
            .unwrap_or_else(|| format!("{} > Documentation", source.name)),
        category: source.display_config.category.clone(),
    }
}
