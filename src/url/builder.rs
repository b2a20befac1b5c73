use crate::UrlError;
use url::Url;

/// Builds the probe URL for a single scan task.
///
/// Joins the base path, the accumulated prefix, and the candidate word with
/// normalized path-join semantics: duplicate separators collapse, empty
/// segments disappear. `trailing_slash` selects the directory-style variant;
/// otherwise any trailing slash is trimmed.
///
/// # Examples
///
/// ```
/// use pathsift::build_probe_url;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/").unwrap();
/// let url = build_probe_url(&base, "api/v1", "users", false).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/api/v1/users");
/// ```
pub fn build_probe_url(
    base: &Url,
    prefix: &str,
    word: &str,
    trailing_slash: bool,
) -> Result<Url, UrlError> {
    let mut url = base.clone();

    let mut segments: Vec<&str> = Vec::new();
    for part in [base.path(), prefix, word] {
        segments.extend(part.split('/').filter(|s| !s.is_empty()));
    }

    let mut path = format!("/{}", segments.join("/"));
    if trailing_slash {
        if !path.ends_with('/') {
            path.push('/');
        }
    } else if path.len() > 1 {
        while path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
    }

    url.set_path(&path);
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }
    Ok(url)
}

/// Joins an accumulated prefix and the word that just produced a hit into
/// the prefix for the next probe level
pub fn join_prefix(prefix: &str, word: &str) -> String {
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(word.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    #[test]
    fn test_root_level_word() {
        let url = build_probe_url(&base(), "", "admin", false).unwrap();
        assert_eq!(url.as_str(), "http://example.com/admin");
    }

    #[test]
    fn test_trailing_slash_variant() {
        let url = build_probe_url(&base(), "", "admin", true).unwrap();
        assert_eq!(url.as_str(), "http://example.com/admin/");
    }

    #[test]
    fn test_nested_prefix() {
        let url = build_probe_url(&base(), "api/v1", "users", false).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/v1/users");
    }

    #[test]
    fn test_collapses_duplicate_separators() {
        let url = build_probe_url(&base(), "//api//", "/users/", false).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/users");
    }

    #[test]
    fn test_base_with_path() {
        let base = Url::parse("http://example.com/app/").unwrap();
        let url = build_probe_url(&base, "v2", "status", false).unwrap();
        assert_eq!(url.as_str(), "http://example.com/app/v2/status");
    }

    #[test]
    fn test_empty_word_keeps_prefix() {
        let url = build_probe_url(&base(), "api", "", false).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api");
    }

    #[test]
    fn test_join_prefix_empty_left() {
        assert_eq!(join_prefix("", "admin"), "admin");
    }

    #[test]
    fn test_join_prefix_nested() {
        assert_eq!(join_prefix("api/v1", "users"), "api/v1/users");
    }

    #[test]
    fn test_join_prefix_strips_extra_separators() {
        assert_eq!(join_prefix("api/", "/users"), "api/users");
    }
}
