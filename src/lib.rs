//! Pathsift: adaptive recursive web path discovery
//!
//! This crate implements a wordlist-driven scanner that probes candidate
//! paths under a target origin, recurses per-branch under an error-tolerance
//! budget, and suppresses duplicate and reflective content so that noisy
//! servers do not explode the scan.

pub mod config;
pub mod crawler;
pub mod output;
pub mod scanner;
pub mod url;
pub mod wordlist;

use thiserror::Error;

/// Main error type for pathsift operations
#[derive(Debug, Error)]
pub enum PathsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Wordlist error: {0}")]
    Wordlist(String),

    #[error("Crawl error: {0}")]
    Crawl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for pathsift operations
pub type Result<T> = std::result::Result<T, PathsiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{ScanConfig, WordlistSource};
pub use scanner::{scan, ScanReport};
pub use url::{branch_of, build_probe_url, join_prefix, normalize_output};
