//! Typed frontier errors.
//!
//! Only structural misuse of a frontier is an error. A search that runs out
//! of states is a normal outcome and is reported through
//! [`crate::engine::SearchStatus::Exhausted`], never through this type.

use thiserror::Error;

/// Failure raised by a [`crate::heapset::PriorityMembershipSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrontierError {
    /// `pop` was called while no open entry was tracked.
    #[error("pop from an empty frontier")]
    Empty,
}
