//! Result and summary emission
//!
//! Surviving URLs go to stdout (and optionally a file), one per line;
//! everything diagnostic goes through tracing on stderr so the result
//! stream stays pipeable.

use crate::scanner::ScanReport;
use crate::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the surviving URLs, one per line, to stdout and optionally to a
/// file
pub fn write_results(urls: &[String], output_path: Option<&Path>) -> Result<()> {
    let stdout = io::stdout();
    let mut console = BufWriter::new(stdout.lock());
    for url in urls {
        writeln!(console, "{}", url)?;
    }
    console.flush()?;

    if let Some(path) = output_path {
        let mut file = BufWriter::new(File::create(path)?);
        for url in urls {
            writeln!(file, "{}", url)?;
        }
        file.flush()?;
    }

    Ok(())
}

/// Logs the end-of-run summary counters
pub fn report_summary(report: &ScanReport) {
    tracing::info!(
        "Scan complete: {} hits, {} surviving URLs ({}/{} tasks)",
        report.hits,
        report.urls.len(),
        report.completed,
        report.total
    );

    if report.dropped > 0 {
        tracing::warn!(
            "{} tasks were dropped to keep the queue bounded; results may be incomplete. \
             Reduce the wordlist size or the error tolerance for deeper scans.",
            report.dropped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_results_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let urls = vec![
            "http://t/admin".to_string(),
            "http://t/api".to_string(),
        ];

        write_results(&urls, Some(&path)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "http://t/admin\nhttp://t/api\n");
    }

    #[test]
    fn test_write_results_console_only() {
        let urls = vec!["http://t/admin".to_string()];
        assert!(write_results(&urls, None).is_ok());
    }
}
