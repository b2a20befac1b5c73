//! Token extraction from discovered URLs
//!
//! Path segments and query keys are harvested both verbatim and split at
//! camel-case and alpha/digit boundaries, producing a deduplicated, sorted,
//! lowercase probe vocabulary.

use std::collections::BTreeSet;
use url::Url;

/// Extracts the probe vocabulary from a list of URLs.
///
/// For every URL: each path segment, each query key, and the file stem of
/// the last segment are added verbatim (lowercased) along with their
/// sanitized sub-tokens. Unparsable URLs are skipped.
pub fn tokens_from_urls(urls: &[String]) -> Vec<String> {
    let mut set = BTreeSet::new();

    for raw in urls {
        let url = match Url::parse(raw) {
            Ok(u) => u,
            Err(_) => continue,
        };

        for segment in url.path().split('/').filter(|s| !s.is_empty()) {
            add_token(&mut set, segment);
            for token in sanitize_tokens(segment) {
                add_token(&mut set, &token);
            }
        }

        for (key, _) in url.query_pairs() {
            add_token(&mut set, &key);
            for token in sanitize_tokens(&key) {
                add_token(&mut set, &token);
            }
        }

        if let Some(base) = url.path().rsplit('/').find(|s| !s.is_empty()) {
            if let Some(stem) = base.rsplit_once('.').map(|(stem, _)| stem) {
                if !stem.is_empty() {
                    add_token(&mut set, stem);
                    for token in sanitize_tokens(stem) {
                        add_token(&mut set, &token);
                    }
                }
            }
        }
    }

    set.into_iter().collect()
}

fn add_token(set: &mut BTreeSet<String>, word: &str) {
    let word = word.trim().to_lowercase();
    if !word.is_empty() {
        set.insert(word);
    }
}

/// Replaces non-alphanumerics with separators and splits compound tokens
fn sanitize_tokens(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .flat_map(split_compound)
        .map(|t| t.to_lowercase())
        .collect()
}

/// Splits a token at camel-case and alpha/digit boundaries.
///
/// Boundaries: `lower→Upper`, `UPPER→UpperLower` (acronym followed by a
/// word), and any alpha/digit transition.
fn split_compound(token: &str) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        let prev = chars[i - 1];
        let cur = chars[i];
        let mut boundary = prev.is_ascii_lowercase() && cur.is_ascii_uppercase();
        if prev.is_ascii_uppercase()
            && cur.is_ascii_uppercase()
            && i + 1 < chars.len()
            && chars[i + 1].is_ascii_lowercase()
        {
            boundary = true;
        }
        if prev.is_ascii_digit() != cur.is_ascii_digit() {
            boundary = true;
        }
        if boundary {
            parts.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    parts.push(chars[start..].iter().collect());
    parts
}
