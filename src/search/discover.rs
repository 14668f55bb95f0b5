use std::collections::HashSet;

use tracing::{debug, warn};

use super::sitemap;
use crate::core::config::SearchLimits;
use crate::core::types::Source;
use crate::scraping::PageScraper;

/// Resolve the URLs to fetch for one source.
///
/// Order: sitemap URLs first, then configured additional URLs; only when
/// both are empty, the bare base URL (probed once, but returned even when
/// the probe fails). Include/exclude substring filters apply last.
/// Discovery never fails a source outright.
pub async fn urls_for_source(
    scraper: &PageScraper,
    source: &Source,
    limits: &SearchLimits,
) -> Vec<String> {
    let rules = &source.crawl_config;
    let mut urls: Vec<String> = Vec::new();

    if let Some(sitemap_url) = rules.sitemap_url.as_deref() {
        debug!("Checking sitemap: {}", sitemap_url);
        urls.extend(sitemap::discover_from_sitemap(scraper, sitemap_url, limits.sitemap_url_cap).await);
    }

    urls.extend(rules.additional_urls.iter().cloned());

    if urls.is_empty() && !source.base_url.trim().is_empty() {
        debug!(
            "No sitemap or configured URLs for {}, probing base URL {}",
            source.name, source.base_url
        );
        if let Err(e) = scraper.fetch(&source.base_url).await {
            // Kept anyway: the base URL is the last-resort candidate by policy.
            warn!("Base URL probe failed for {}: {}", source.base_url, e);
        }
        urls.push(source.base_url.clone());
    }

    let urls = dedupe_preserving_order(urls);
    let urls = apply_pattern_filters(urls, &rules.include_patterns, &rules.exclude_patterns);

    debug!("Resolved {} URLs for {}", urls.len(), source.name);
    urls
}

fn dedupe_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| !url.trim().is_empty())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Literal-substring filtering: include first (keep URLs matching at least
/// one pattern when the list is non-empty), then exclude (drop URLs matching
/// any pattern). Empty patterns are ignored.
pub(crate) fn apply_pattern_filters(
    urls: Vec<String>,
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Vec<String> {
    let include: Vec<&str> = include_patterns
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect();
    let exclude: Vec<&str> = exclude_patterns
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect();

    urls.into_iter()
        .filter(|url| include.is_empty() || include.iter().any(|p| url.contains(p)))
        .filter(|url| !exclude.iter().any(|p| url.contains(p)))
        .collect()
}
