//! Wordlist loading, saving, and automatic generation
//!
//! The probe vocabulary comes either from a file supplied by the operator
//! or from tokenizing URLs discovered by crawling the target origin.

mod tokenizer;

pub use tokenizer::tokens_from_urls;

use crate::{PathsiftError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Loads a wordlist file: one word per line, blank lines and `#` comments
/// skipped, leading slashes stripped.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        PathsiftError::Wordlist(format!("cannot read wordlist {}: {}", path.display(), e))
    })?;

    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() || word.starts_with('#') {
            continue;
        }
        words.push(word.trim_start_matches('/').to_string());
    }
    Ok(words)
}

/// Writes a generated wordlist to disk, one word per line
pub fn save_words(words: &[String], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for word in words {
        writeln!(writer, "{}", word)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "admin\n\n# comment\napi\n  \n/login").unwrap();

        let words = load_words(file.path()).unwrap();
        assert_eq!(words, vec!["admin", "api", "login"]);
    }

    #[test]
    fn test_load_strips_leading_slash() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/deep/path").unwrap();

        let words = load_words(file.path()).unwrap();
        assert_eq!(words, vec!["deep/path"]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = load_words(Path::new("/nonexistent/wordlist.txt"));
        assert!(matches!(result, Err(PathsiftError::Wordlist(_))));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let words = vec!["admin".to_string(), "api".to_string()];

        save_words(&words, &path).unwrap();
        assert_eq!(load_words(&path).unwrap(), words);
    }
}
