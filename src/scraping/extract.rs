use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::metadata;
use crate::core::types::ExtractedDocument;

/// Bodies shorter than this from the primary pass trigger the structural
/// fallback.
const MIN_PRIMARY_CONTENT_CHARS: usize = 100;

const SNIPPET_CHARS: usize = 200;

const DEFAULT_TITLE: &str = "Untitled";

/// Likely main-content containers, probed in order by the fallback path.
const FALLBACK_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".main-content",
    ".post-content",
    ".entry-content",
    "#content",
    ".documentation",
    ".docs-content",
];

/// Extract a normalized document from raw page markup.
///
/// Runs a readability pass first; when that yields nothing or too little
/// text, parses the markup structurally instead. `None` from both paths
/// means the page had no usable content.
pub fn extract_document(html: &str, url: &str) -> Option<ExtractedDocument> {
    match extract_with_readability(html, url) {
        Some(document) if document.content.len() >= MIN_PRIMARY_CONTENT_CHARS => Some(document),
        _ => {
            debug!("Primary extraction too thin for {}, trying structural fallback", url);
            extract_structural(html, url)
        }
    }
}

/// Primary path: readability main-content extraction plus metadata lookup.
fn extract_with_readability(html: &str, url: &str) -> Option<ExtractedDocument> {
    let base = Url::parse(url).ok()?;
    let product = readability::extractor::extract(&mut html.as_bytes(), &base).ok()?;

    let content = collapse_whitespace(&product.text);
    if content.is_empty() {
        return None;
    }

    let title = match product.title.trim() {
        "" => DEFAULT_TITLE.to_string(),
        title => title.to_string(),
    };

    let document = Html::parse_document(html);
    let published_date = metadata::extract_published_date(&document);

    Some(build_document(title, content, url, published_date))
}

/// Fallback path: probe known content containers, else whole-body text.
fn extract_structural(html: &str, url: &str) -> Option<ExtractedDocument> {
    let document = Html::parse_document(html);

    let title = metadata::extract_title(&document).unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let mut content = String::new();
    for selector in FALLBACK_CONTENT_SELECTORS {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        let parts: Vec<String> = document
            .select(&sel)
            .map(|el| element_text(&el))
            .filter(|text| !text.trim().is_empty())
            .collect();
        if !parts.is_empty() {
            content = parts.join(" ");
            break;
        }
    }

    // No specific content area found: take the whole body.
    if content.trim().is_empty() {
        if let Ok(body_selector) = Selector::parse("body") {
            if let Some(body) = document.select(&body_selector).next() {
                content = element_text(&body);
            }
        }
    }

    let content = collapse_whitespace(&content);
    if content.is_empty() {
        return None;
    }

    let published_date = metadata::extract_published_date(&document);
    Some(build_document(title, content, url, published_date))
}

fn build_document(
    title: String,
    content: String,
    url: &str,
    published_date: Option<String>,
) -> ExtractedDocument {
    ExtractedDocument {
        title,
        snippet: make_snippet(&content),
        content,
        url: url.to_string(),
        published_date,
        breadcrumb: None,
    }
}

/// Text of an element subtree, skipping non-content elements.
fn element_text(element: &ElementRef) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    parts.join(" ")
}

fn collect_text(element: &ElementRef, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if matches!(child_element.value().name(), "script" | "style" | "noscript") {
                continue;
            }
            collect_text(&child_element, parts);
        } else if let Some(text) = child.value().as_text() {
            parts.push(text.text.to_string());
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First 200 characters of the content, ellipsis-suffixed when truncated.
fn make_snippet(content: &str) -> String {
    let mut chars = content.chars();
    let snippet: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{snippet}...")
    } else {
        snippet
    }
}
