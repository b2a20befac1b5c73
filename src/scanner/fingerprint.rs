//! Content fingerprinting
//!
//! A fingerprint is the SHA-256 digest of the first [`FINGERPRINT_CAP`]
//! bytes of a response body. Equal fingerprints are treated as identical
//! content by the dedup ledger and the loop guard; collisions are accepted
//! as a tradeoff, the digest space makes them negligible in practice.

use sha2::{Digest, Sha256};
use std::fmt;

/// Bytes of body hashed per response
pub const FINGERPRINT_CAP: usize = 256 * 1024;

/// Bounded-length content digest of a response body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of an in-memory body, capped at
    /// [`FINGERPRINT_CAP`] bytes
    pub fn of_bytes(body: &[u8]) -> Self {
        let capped = &body[..body.len().min(FINGERPRINT_CAP)];
        let mut hasher = Sha256::new();
        hasher.update(capped);
        Fingerprint(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads at most [`FINGERPRINT_CAP`] bytes of a response body and digests
/// them, then drops the connection.
///
/// A mid-body transport error truncates the digest input rather than
/// failing; the partial fingerprint still identifies the content well enough
/// for dedup purposes.
pub async fn fingerprint_response(mut response: reqwest::Response) -> Fingerprint {
    let mut hasher = Sha256::new();
    let mut read = 0usize;

    while let Ok(Some(chunk)) = response.chunk().await {
        let remaining = FINGERPRINT_CAP - read;
        if chunk.len() >= remaining {
            hasher.update(&chunk[..remaining]);
            break;
        }
        hasher.update(&chunk);
        read += chunk.len();
    }

    Fingerprint(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_bodies_identical_fingerprints() {
        assert_eq!(
            Fingerprint::of_bytes(b"hello world"),
            Fingerprint::of_bytes(b"hello world")
        );
    }

    #[test]
    fn test_different_bodies_differ() {
        assert_ne!(
            Fingerprint::of_bytes(b"hello world"),
            Fingerprint::of_bytes(b"hello mars")
        );
    }

    #[test]
    fn test_bytes_past_cap_are_ignored() {
        let mut a = vec![b'x'; FINGERPRINT_CAP];
        let b = a.clone();
        a.extend_from_slice(b"trailing difference");
        assert_eq!(Fingerprint::of_bytes(&a), Fingerprint::of_bytes(&b));
    }

    #[test]
    fn test_display_is_hex() {
        let fp = Fingerprint::of_bytes(b"");
        let rendered = fp.to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
