//! Search policy types.

use crate::digest::{canonical_hash, canonical_json_bytes, ContentHash, DOMAIN_SEARCH_POLICY};

/// Frontier behavior knobs shared by every [`crate::heapset`] implementation.
///
/// The default finalizes states on pop and breaks priority ties by insertion
/// order, which is the configuration A* optimality is argued for under a
/// consistent heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    /// What happens to a key once it has been popped.
    pub closed_set: ClosedSetPolicy,
    /// Order among entries of equal priority.
    pub tie_break: TieBreak,
}

impl SearchPolicy {
    /// Stable JSON form of the policy.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "closed_set": self.closed_set.as_str(),
            "tie_break": self.tie_break.as_str(),
        })
    }

    /// Content hash of [`SearchPolicy::to_json`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(DOMAIN_SEARCH_POLICY, &canonical_json_bytes(&self.to_json()))
    }
}

/// Lifetime of a key after it leaves the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosedSetPolicy {
    /// The key is retained as closed; any later push of it is ignored.
    ///
    /// Optimal only under a consistent heuristic.
    #[default]
    FinalizeOnPop,
    /// The key is retained as closed together with the priority it was
    /// popped at; a later push with a strictly better priority reopens it.
    ///
    /// Optimal under any admissible heuristic at the price of re-expanding
    /// states. A worse or equal arrival is still rejected, so cycles cannot
    /// keep a state in circulation.
    ReopenOnImprove,
}

impl ClosedSetPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FinalizeOnPop => "finalize_on_pop",
            Self::ReopenOnImprove => "reopen_on_improve",
        }
    }
}

/// Deterministic tie-break among equal priorities.
///
/// Every insertion and every improvement draws a fresh stamp from a
/// monotonic counter; the tie-break decides which stamp wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Oldest stamp first.
    #[default]
    Fifo,
    /// Newest stamp first.
    Lifo,
}

impl TieBreak {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
        }
    }

    /// `true` if an entry stamped `a` is extracted before one stamped `b`.
    #[must_use]
    pub(crate) fn prefers(self, a: u64, b: u64) -> bool {
        match self {
            Self::Fifo => a < b,
            Self::Lifo => a > b,
        }
    }
}
