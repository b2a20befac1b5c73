//! URL construction and normalization
//!
//! Probe URLs are built deterministically from (base, prefix, word); output
//! normalization and branch keys feed the dedup ledger.

mod builder;
mod normalize;

pub use builder::{build_probe_url, join_prefix};
pub use normalize::{branch_of, normalize_output};
