use anyhow::{anyhow, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::scraping::PageScraper;

/// Fetch a sitemap and return up to `cap` of its URLs, in document order.
///
/// Any fetch or parse failure degrades to an empty list; discovery then
/// falls through to the source's other URL inputs.
pub async fn discover_from_sitemap(
    scraper: &PageScraper,
    sitemap_url: &str,
    cap: usize,
) -> Vec<String> {
    let xml = match scraper.fetch(sitemap_url).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Sitemap fetch failed for {}: {}", sitemap_url, e);
            return Vec::new();
        }
    };

    match parse_loc_entries(&xml, cap) {
        Ok(urls) => {
            debug!("Sitemap {} yielded {} URLs", sitemap_url, urls.len());
            urls
        }
        Err(e) => {
            warn!("Sitemap parse failed for {}: {}", sitemap_url, e);
            Vec::new()
        }
    }
}

/// Collect `<loc>` text nodes from sitemap XML, capped.
pub fn parse_loc_entries(xml: &str, cap: usize) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut in_loc = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(e)) if in_loc => {
                let text = e.unescape().map_err(|e| anyhow!("XML unescape error: {e}"))?;
                let text = text.trim();
                if !text.is_empty() {
                    urls.push(text.to_string());
                    if urls.len() >= cap {
                        break;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow!("XML parse error: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_loc_entries_in_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
          <url><loc>https://example.com/page1</loc></url>
          <url><loc>https://example.com/page2</loc></url>
          <url><loc>https://example.com/page3</loc></url>
        </urlset>"#;

        let urls = parse_loc_entries(xml, 30).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/page1",
                "https://example.com/page2",
                "https://example.com/page3",
            ]
        );
    }

    #[test]
    fn test_entries_capped() {
        let body: String = (0..40)
            .map(|i| format!("<url><loc>https://example.com/page{i}</loc></url>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{body}</urlset>"#
        );

        let urls = parse_loc_entries(&xml, 30).unwrap();
        assert_eq!(urls.len(), 30);
        assert_eq!(urls[0], "https://example.com/page0");
        assert_eq!(urls[29], "https://example.com/page29");
    }

    #[test]
    fn test_handles_xml_entities() {
        let xml = r#"<?xml version="1.0"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
          <url><loc>https://example.com/page?foo=1&amp;bar=2</loc></url>
        </urlset>"#;

        let urls = parse_loc_entries(xml, 30).unwrap();
        assert_eq!(urls, vec!["https://example.com/page?foo=1&bar=2"]);
    }

    #[test]
    fn test_whitespace_in_loc_trimmed() {
        let xml = r#"<urlset><url><loc>  https://example.com/page1  </loc></url></urlset>"#;
        let urls = parse_loc_entries(xml, 30).unwrap();
        assert_eq!(urls, vec!["https://example.com/page1"]);
    }

    #[test]
    fn test_empty_sitemap_yields_no_urls() {
        let xml = r#"<?xml version="1.0"?><urlset></urlset>"#;
        let urls = parse_loc_entries(xml, 30).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = "<urlset><url><loc>https://example.com</url></urlset>";
        assert!(parse_loc_entries(xml, 30).is_err());
    }
}
