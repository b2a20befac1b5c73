//! Candidate URL extraction from fetched pages
//!
//! Links come from anchor/resource attributes plus a raw-URL sweep over the
//! body, which catches endpoints referenced from inline scripts.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// Attribute selectors that carry navigable or resource URLs
const URL_ATTRIBUTES: &[(&str, &str)] = &[
    ("a[href]", "href"),
    ("link[href]", "href"),
    ("script[src]", "src"),
    ("img[src]", "src"),
    ("iframe[src]", "src"),
    ("source[src]", "src"),
    ("embed[src]", "src"),
    ("form[action]", "action"),
];

fn raw_url_regex() -> &'static Regex {
    static RAW_URL: OnceLock<Regex> = OnceLock::new();
    RAW_URL.get_or_init(|| {
        Regex::new(r#"https?://[^\s"'<>]+"#).expect("raw URL pattern is valid")
    })
}

/// Extracts every candidate URL referenced by a page.
///
/// Relative references are resolved against `page_url`; fragments are
/// stripped; `javascript:`, `mailto:`, `tel:`, `data:` and non-http(s)
/// results are dropped. The caller applies origin and extension filters.
pub fn extract_candidate_urls(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for (selector_str, attr) in URL_ATTRIBUTES {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(attr) {
                if let Some(url) = resolve_reference(value, page_url) {
                    if seen.insert(url.as_str().to_string()) {
                        urls.push(url);
                    }
                }
            }
        }
    }

    // Raw absolute URLs in scripts and text that no attribute carries
    for m in raw_url_regex().find_iter(html) {
        if let Some(url) = resolve_reference(m.as_str(), page_url) {
            if seen.insert(url.as_str().to_string()) {
                urls.push(url);
            }
        }
    }

    urls
}

/// Resolves a raw reference to an absolute http(s) URL, or rejects it
fn resolve_reference(raw: &str, page_url: &Url) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }
    if raw.starts_with("javascript:")
        || raw.starts_with("mailto:")
        || raw.starts_with("tel:")
        || raw.starts_with("data:")
    {
        return None;
    }

    let mut url = page_url.join(raw).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://example.com/dir/page.html").unwrap()
    }

    #[test]
    fn test_extracts_anchor_href() {
        let html = r#"<html><body><a href="/admin">Admin</a></body></html>"#;
        let urls = extract_candidate_urls(html, &page());
        assert!(urls.iter().any(|u| u.as_str() == "http://example.com/admin"));
    }

    #[test]
    fn test_resolves_relative_reference() {
        let html = r#"<html><body><a href="sub/page2">Next</a></body></html>"#;
        let urls = extract_candidate_urls(html, &page());
        assert!(urls
            .iter()
            .any(|u| u.as_str() == "http://example.com/dir/sub/page2"));
    }

    #[test]
    fn test_extracts_script_src_and_form_action() {
        let html = r#"<html><body>
            <script src="/js/app.js"></script>
            <form action="/login"></form>
        </body></html>"#;
        let urls = extract_candidate_urls(html, &page());
        assert!(urls.iter().any(|u| u.path() == "/js/app.js"));
        assert!(urls.iter().any(|u| u.path() == "/login"));
    }

    #[test]
    fn test_extracts_raw_url_from_script_body() {
        let html = r#"<script>fetch("http://example.com/api/items")</script>"#;
        let urls = extract_candidate_urls(html, &page());
        assert!(urls.iter().any(|u| u.path() == "/api/items"));
    }

    #[test]
    fn test_skips_special_schemes() {
        let html = r#"<html><body>
            <a href="javascript:void(0)">x</a>
            <a href="mailto:a@b.c">x</a>
            <a href="tel:+123">x</a>
            <a href="data:text/plain,x">x</a>
        </body></html>"#;
        assert!(extract_candidate_urls(html, &page()).is_empty());
    }

    #[test]
    fn test_skips_fragment_only() {
        let html = r##"<html><body><a href="#top">Top</a></body></html>"##;
        assert!(extract_candidate_urls(html, &page()).is_empty());
    }

    #[test]
    fn test_strips_fragment_from_link() {
        let html = r##"<html><body><a href="/page#section">P</a></body></html>"##;
        let urls = extract_candidate_urls(html, &page());
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].as_str(), "http://example.com/page");
    }

    #[test]
    fn test_deduplicates_within_page() {
        let html = r#"<html><body>
            <a href="/admin">one</a>
            <a href="/admin">two</a>
        </body></html>"#;
        assert_eq!(extract_candidate_urls(html, &page()).len(), 1);
    }
}
