//! Priority queues with key membership, decrease-key and a closed set.
//!
//! A frontier must answer three questions at once: which entry is cheapest,
//! is a given state already queued (and at what priority), and has it already
//! been finalized. `BinaryHeap` answers the first, `BTreeMap` the other two;
//! the types here keep one of each in lockstep.
//!
//! - [`IndexedHeapSet`]: addressable binary heap, O(log n) decrease-key.
//!   Used by the engine by default.
//! - [`DrainHeapSet`]: `BinaryHeap` + index reconciled by draining the heap
//!   down to the stale entry on every improvement, O(n) decrease-key.
//!
//! Both order entries by `(priority, stamp)` under a [`TieBreak`] and apply
//! a [`ClosedSetPolicy`] to pushes of popped keys, so for the same push
//! sequence they extract the same items in the same order.
//!
//! [`TieBreak`]: crate::policy::TieBreak
//! [`ClosedSetPolicy`]: crate::policy::ClosedSetPolicy

mod drain;
mod indexed;

pub use drain::DrainHeapSet;
pub use indexed::IndexedHeapSet;

use crate::error::FrontierError;

/// An element that can live in a [`PriorityMembershipSet`].
///
/// `key` is the deduplication identity; `priority` orders extraction, lower
/// first. Two items with equal keys are the same logical entry.
pub trait HeapItem {
    type Key: Ord + Clone;
    type Priority: Ord + Clone;

    fn key(&self) -> &Self::Key;

    fn priority(&self) -> Self::Priority;
}

/// What [`PriorityMembershipSet::push_or_improve`] did with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The key was not tracked; a new open entry was created.
    Inserted,
    /// The key was open at a worse priority; the entry was replaced.
    Improved,
    /// The key was open at a better or equal priority; nothing changed.
    RejectedNotBetter,
    /// The key was closed and the policy kept it closed; nothing changed.
    RejectedClosed,
    /// The key was closed at a worse priority and the policy allows
    /// reopening; a new open entry was created.
    Reopened,
}

impl PushOutcome {
    /// `true` if the item is now the open entry for its key.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Inserted | Self::Improved | Self::Reopened)
    }
}

/// Frontier contract: extract-min plus keyed membership with decrease-key.
///
/// Membership queries report open entries only. A popped key is never
/// reported by [`contains`](Self::contains) again unless a later push
/// reopens it, which the finalize-on-pop policy forbids.
pub trait PriorityMembershipSet {
    type Item: HeapItem;

    /// `true` iff no open entry is tracked. Closed keys do not count.
    fn is_empty(&self) -> bool;

    /// Number of open entries.
    fn len(&self) -> usize;

    /// Insert `item`, or replace the open entry with its key if `item` has a
    /// strictly better priority. Worse and equal pushes are no-ops; a push
    /// of a closed key is a no-op unless the [`ClosedSetPolicy`] reopens it.
    ///
    /// [`ClosedSetPolicy`]: crate::policy::ClosedSetPolicy
    fn push_or_improve(&mut self, item: Self::Item) -> PushOutcome;

    /// Remove and return the open entry ranked first.
    ///
    /// # Errors
    ///
    /// Returns [`FrontierError::Empty`] if no open entry is tracked.
    fn pop(&mut self) -> Result<Self::Item, FrontierError>;

    /// The open entry [`pop`](Self::pop) would return, without removing it.
    fn top(&self) -> Option<&Self::Item>;

    /// The open entry stored under `key`.
    fn get(&self, key: &<Self::Item as HeapItem>::Key) -> Option<&Self::Item>;

    /// `true` iff `key` has an open entry.
    fn contains(&self, key: &<Self::Item as HeapItem>::Key) -> bool {
        self.get(key).is_some()
    }

    /// `true` iff `key` was popped and has not been reopened since.
    fn is_closed(&self, key: &<Self::Item as HeapItem>::Key) -> bool;

    /// Number of closed keys.
    fn closed_len(&self) -> usize;

    /// Largest number of simultaneously open entries ever observed.
    fn high_water(&self) -> usize;
}
