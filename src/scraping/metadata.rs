use scraper::{Html, Selector};

/// Meta tags checked, in order, for a publish-date hint.
const PUBLISHED_DATE_SELECTORS: &[&str] = &[
    "meta[property=\"article:published_time\"]",
    "meta[name=\"date\"]",
    "meta[name=\"dcterms.date\"]",
];

/// Page title with fallback to the first h1.
pub(super) fn extract_title(document: &Html) -> Option<String> {
    if let Ok(title_selector) = Selector::parse("title") {
        if let Some(title_element) = document.select(&title_selector).next() {
            let title = title_element.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }

    if let Ok(h1_selector) = Selector::parse("h1") {
        if let Some(h1_element) = document.select(&h1_selector).next() {
            let h1_text = h1_element.text().collect::<String>().trim().to_string();
            if !h1_text.is_empty() {
                return Some(h1_text);
            }
        }
    }

    None
}

/// Publish-date hint from page metadata, if any.
pub(super) fn extract_published_date(document: &Html) -> Option<String> {
    for selector in PUBLISHED_DATE_SELECTORS {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(el) = document.select(&sel).next() {
                if let Some(content) = el.value().attr("content") {
                    let value = content.trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    // <time datetime="..."> as a last resort
    if let Ok(sel) = Selector::parse("time[datetime]") {
        if let Some(el) = document.select(&sel).next() {
            if let Some(datetime) = el.value().attr("datetime") {
                let value = datetime.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_title_tag() {
        let document = Html::parse_document(
            "<html><head><title>Getting Started</title></head><body><h1>Other</h1></body></html>",
        );
        assert_eq!(extract_title(&document).as_deref(), Some("Getting Started"));
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let document =
            Html::parse_document("<html><body><h1>Heading Title</h1></body></html>");
        assert_eq!(extract_title(&document).as_deref(), Some("Heading Title"));
    }

    #[test]
    fn test_title_absent() {
        let document = Html::parse_document("<html><body><p>No headings.</p></body></html>");
        assert!(extract_title(&document).is_none());
    }

    #[test]
    fn test_published_date_from_article_meta() {
        let document = Html::parse_document(
            r#"<html><head><meta property="article:published_time" content="2024-01-02T03:04:05Z"></head></html>"#,
        );
        assert_eq!(
            extract_published_date(&document).as_deref(),
            Some("2024-01-02T03:04:05Z")
        );
    }

    #[test]
    fn test_published_date_from_time_element() {
        let document = Html::parse_document(
            r#"<html><body><time datetime="2023-12-25">Christmas</time></body></html>"#,
        );
        assert_eq!(extract_published_date(&document).as_deref(), Some("2023-12-25"));
    }

    #[test]
    fn test_published_date_absent() {
        let document = Html::parse_document("<html><body><p>Undated.</p></body></html>");
        assert!(extract_published_date(&document).is_none());
    }
}
