//! Configuration module for pathsift
//!
//! Scan configuration is assembled from CLI flags rather than a config
//! file; this module holds the validated value types the scanner consumes.

mod types;
mod validation;

pub use types::{
    default_excluded_statuses, parse_excluded, ScanConfig, WordlistSource, DEFAULT_CONCURRENCY,
    DEFAULT_ERROR_TOLERANCE, QUEUE_SLOTS_PER_WORKER,
};
pub use validation::validate;
