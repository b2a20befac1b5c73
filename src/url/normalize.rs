use url::Url;

/// Normalizes a URL for output and for dedup-ledger comparison.
///
/// Trailing slashes are trimmed so directory-style and leaf-style probes of
/// the same path compare equal; a bare origin keeps its root slash.
pub fn normalize_output(url: &Url) -> String {
    let s = url.as_str();
    if s.ends_with('/') && !s.ends_with("://") {
        s.trim_end_matches('/').to_string()
    } else {
        s.to_string()
    }
}

/// Computes the branch key for a probe URL: the first path segment below the
/// scan root, or the empty string for root-level content.
///
/// `base_path` is the scan origin's path, which always ends with `/`.
pub fn branch_of(url: &Url, base_path: &str) -> String {
    let path = url.path();
    let rel = path.strip_prefix(base_path).unwrap_or(path);
    let rel = rel.trim_start_matches('/');
    match rel.split_once('/') {
        Some((first, _)) => first.to_string(),
        None => rel.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_trailing_slash() {
        let url = Url::parse("http://example.com/admin/").unwrap();
        assert_eq!(normalize_output(&url), "http://example.com/admin");
    }

    #[test]
    fn test_normalize_keeps_bare_path() {
        let url = Url::parse("http://example.com/admin").unwrap();
        assert_eq!(normalize_output(&url), "http://example.com/admin");
    }

    #[test]
    fn test_normalize_root() {
        let url = Url::parse("http://example.com/").unwrap();
        assert_eq!(normalize_output(&url), "http://example.com");
    }

    #[test]
    fn test_branch_of_first_segment() {
        let url = Url::parse("http://example.com/api/v1/users").unwrap();
        assert_eq!(branch_of(&url, "/"), "api");
    }

    #[test]
    fn test_branch_of_single_segment() {
        let url = Url::parse("http://example.com/admin").unwrap();
        assert_eq!(branch_of(&url, "/"), "admin");
    }

    #[test]
    fn test_branch_of_root_is_empty() {
        let url = Url::parse("http://example.com/").unwrap();
        assert_eq!(branch_of(&url, "/"), "");
    }

    #[test]
    fn test_branch_of_respects_base_path() {
        let url = Url::parse("http://example.com/app/api/users").unwrap();
        assert_eq!(branch_of(&url, "/app/"), "api");
    }
}
