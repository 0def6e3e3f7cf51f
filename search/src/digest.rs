//! Domain-separated content hashing for search artifacts.
//!
//! **Exactly one place defines hashing** for this crate: traces and policies
//! both route through [`canonical_hash`] so that digests stay comparable
//! across processes and runs.

use sha2::{Digest, Sha256};

/// Domain prefix for [`crate::trace::SolutionTrace`] digests.
pub const DOMAIN_SOLUTION_TRACE: &[u8] = b"LODESTAR::SOLUTION_TRACE::V1\0";

/// Domain prefix for [`crate::policy::SearchPolicy`] digests.
pub const DOMAIN_SEARCH_POLICY: &[u8] = b"LODESTAR::SEARCH_POLICY::V1\0";

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the separator is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 over `domain || data`, formatted as `"sha256:<hex>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{hex_digest}"),
    }
}

/// Compact JSON bytes with lexicographically sorted object keys.
///
/// `serde_json::Map` is ordered by key unless the `preserve_order` feature is
/// enabled, which this workspace never does.
#[must_use]
pub fn canonical_json_bytes(value: &serde_json::Value) -> Vec<u8> {
    // Serializing a `Value` into a `Vec` cannot fail.
    serde_json::to_vec(value).unwrap_or_default()
}
