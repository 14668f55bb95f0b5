use serde::{Deserialize, Serialize};

fn default_icon() -> String {
    "📄".to_string()
}

fn default_category() -> String {
    "documentation".to_string()
}

/// One externally configured documentation site eligible for on-demand
/// crawling and search. Owned by the source registry; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub search_enabled: bool,
    #[serde(default)]
    pub crawl_config: CrawlRules,
    #[serde(default)]
    pub display_config: DisplayConfig,
}

/// Per-source crawl rules: where to discover URLs and which to keep.
/// Patterns are plain substrings, not globs or regexes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlRules {
    #[serde(default)]
    pub sitemap_url: Option<String>,
    #[serde(default)]
    pub additional_urls: Vec<String>,
    #[serde(default)]
    pub include_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            category: default_category(),
        }
    }
}

/// Normalized document produced by the extractor for one fetched page.
/// Created once per successfully fetched page and discarded after scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub title: String,
    /// Whitespace-collapsed body text.
    pub content: String,
    pub url: String,
    /// First 200 characters of `content`, ellipsis-suffixed when truncated.
    pub snippet: String,
    pub published_date: Option<String>,
    pub breadcrumb: Option<String>,
}

/// Scorer output: one per extracted document with nonzero relevance.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub score: f64,
    pub published_date: Option<String>,
    pub breadcrumb: Option<String>,
}

/// Final per-match record handed to the API layer, source-attributed and
/// ranked. Lives only within one search call's response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedResult {
    pub title: String,
    pub url: String,
    /// Id of the owning source.
    pub source: String,
    pub source_name: String,
    pub source_icon: String,
    pub snippet: String,
    pub updated_at: String,
    pub score: f64,
    pub breadcrumb: String,
    pub category: String,
}
