//! Page link scanner
//!
//! Fetches an HTML page and collects the absolute URLs of every PDF it links
//! to. The `.pdf` suffix is checked on the raw href before resolution, so
//! both relative ("report.pdf") and absolute hrefs qualify.

use crate::crawler::fetch_page;
use crate::HarvestError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Fetches a page and returns the PDF links found on it
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `page_url` - The page to scan
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Deduplicated absolute PDF URLs, in document order
/// * `Err(HarvestError)` - The page could not be fetched or its URL is
///   malformed; callers decide how to degrade
pub async fn scan_page(client: &Client, page_url: &str) -> Result<Vec<String>, HarvestError> {
    let base_url = Url::parse(page_url)?;
    let body = fetch_page(client, page_url).await?;
    Ok(extract_pdf_links(&body, &base_url))
}

/// Extracts PDF links from HTML content
///
/// For every anchor whose href ends in `.pdf`, the href is resolved against
/// `base_url` to an absolute URL. Hrefs that fail to resolve are skipped.
/// Malformed HTML is not an error: the parser recovers what it can.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page's own URL, used to resolve relative hrefs
///
/// # Returns
///
/// Deduplicated absolute PDF URLs in document order
pub fn extract_pdf_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if !href.ends_with(".pdf") {
                    continue;
                }

                match base_url.join(href) {
                    Ok(absolute) => {
                        let absolute = absolute.to_string();
                        if seen.insert(absolute.clone()) {
                            links.push(absolute);
                        }
                    }
                    Err(e) => {
                        tracing::debug!("Skipping unresolvable href {}: {}", href, e);
                    }
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.org/docs/index.html").unwrap()
    }

    #[test]
    fn test_relative_href_resolved_against_page() {
        let html = r#"<html><body><a href="report.pdf">Report</a></body></html>"#;
        let links = extract_pdf_links(html, &base_url());
        assert_eq!(links, vec!["https://example.org/docs/report.pdf"]);
    }

    #[test]
    fn test_root_relative_href() {
        let html = r#"<html><body><a href="/files/a.pdf">A</a></body></html>"#;
        let links = extract_pdf_links(html, &base_url());
        assert_eq!(links, vec!["https://example.org/files/a.pdf"]);
    }

    #[test]
    fn test_absolute_href_kept_as_is() {
        let html = r#"<html><body><a href="https://other.net/b.pdf">B</a></body></html>"#;
        let links = extract_pdf_links(html, &base_url());
        assert_eq!(links, vec!["https://other.net/b.pdf"]);
    }

    #[test]
    fn test_non_pdf_anchors_ignored() {
        let html = r#"
            <html><body>
                <a href="/page.html">Page</a>
                <a href="/image.png">Image</a>
                <a href="/doc.pdf">Doc</a>
            </body></html>
        "#;
        let links = extract_pdf_links(html, &base_url());
        assert_eq!(links, vec!["https://example.org/doc.pdf"]);
    }

    #[test]
    fn test_duplicate_links_collapsed() {
        let html = r#"
            <html><body>
                <a href="same.pdf">One</a>
                <a href="same.pdf">Two</a>
            </body></html>
        "#;
        let links = extract_pdf_links(html, &base_url());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_no_anchors_yields_empty() {
        let links = extract_pdf_links("<html><body>plain text</body></html>", &base_url());
        assert!(links.is_empty());
    }

    #[test]
    fn test_suffix_checked_before_resolution() {
        // A query string after ".pdf" disqualifies the href
        let html = r#"<html><body><a href="file.pdf?download=1">F</a></body></html>"#;
        let links = extract_pdf_links(html, &base_url());
        assert!(links.is_empty());
    }

    #[test]
    fn test_malformed_html_recovers() {
        let html = r#"<html><body><a href="x.pdf">unclosed"#;
        let links = extract_pdf_links(html, &base_url());
        assert_eq!(links, vec!["https://example.org/docs/x.pdf"]);
    }
}
