use std::cmp::Ordering;

use crate::core::types::{ExtractedDocument, ScoredResult};

/// Lexical relevance heuristic: term-overlap counts weighted toward titles,
/// plus an exact-phrase bonus. Not semantic; no index.
pub struct RelevanceScorer {
    /// Full lowercased query, for the exact-phrase bonus.
    query: String,
    /// Lowercased whitespace-split query terms.
    terms: Vec<String>,
}

impl RelevanceScorer {
    pub fn new(query: &str) -> Self {
        let query = query.to_lowercase();
        let terms = query.split_whitespace().map(str::to_string).collect();
        Self { query, terms }
    }

    /// Score one document against the query.
    ///
    /// Each query term counts once per field it appears in (presence, not
    /// occurrence count). The exact-phrase bonus is mutually exclusive;
    /// title takes priority.
    pub fn score(&self, document: &ExtractedDocument) -> f64 {
        if document.content.is_empty() {
            return 0.0;
        }

        let title = document.title.to_lowercase();
        let content = document.content.to_lowercase();

        let title_matches = self
            .terms
            .iter()
            .filter(|term| title.contains(term.as_str()))
            .count();
        let content_matches = self
            .terms
            .iter()
            .filter(|term| content.contains(term.as_str()))
            .count();

        let mut score = title_matches as f64 * 2.0 + content_matches as f64 * 0.5;

        if !self.query.is_empty() {
            if title.contains(&self.query) {
                score += 3.0;
            } else if content.contains(&self.query) {
                score += 1.0;
            }
        }

        score
    }

    /// Score a set of documents and rank them: zero-score documents are
    /// dropped, the rest sorted by score descending. Ties keep input order
    /// (stable sort).
    pub fn rank(&self, documents: &[ExtractedDocument]) -> Vec<ScoredResult> {
        let mut results: Vec<ScoredResult> = documents
            .iter()
            .filter_map(|document| {
                let score = self.score(document);
                (score > 0.0).then(|| ScoredResult {
                    title: document.title.clone(),
                    url: document.url.clone(),
                    snippet: document.snippet.clone(),
                    score,
                    published_date: document.published_date.clone(),
                    breadcrumb: document.breadcrumb.clone(),
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results
    }
}
