//! `BinaryHeap` frontier with drain-and-rewrite decrease-key.
//!
//! `std::collections::BinaryHeap` cannot update an arbitrary element, so an
//! improvement pops entries into a scratch buffer until the stale one comes
//! out, drops it, and pushes the buffer back together with the replacement.
//! That is O(n) per improvement but leaves every other operation at the
//! standard heap cost.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use super::{HeapItem, PriorityMembershipSet, PushOutcome};
use crate::error::FrontierError;
use crate::policy::{ClosedSetPolicy, SearchPolicy, TieBreak};

/// Extraction rank; the smallest rank pops first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Rank<P> {
    priority: P,
    /// The stamp as seen through the tie-break: the stamp itself under FIFO,
    /// its complement under LIFO.
    order: u64,
}

#[derive(Debug)]
struct Entry<T: HeapItem> {
    /// `BinaryHeap` is a max-heap; `Reverse` makes it pop the smallest rank.
    rank: Reverse<Rank<T::Priority>>,
    stamp: u64,
    item: T,
}

impl<T: HeapItem> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.stamp == other.stamp
    }
}

impl<T: HeapItem> Eq for Entry<T> {}

impl<T: HeapItem> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: HeapItem> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

#[derive(Debug, Clone)]
enum KeyState<P> {
    Open { stamp: u64, priority: P },
    /// Popped at `priority`.
    Closed { priority: P },
}

/// Frontier built from `BinaryHeap` plus a `BTreeMap` membership index.
///
/// [`get`](PriorityMembershipSet::get) scans the heap and is O(n);
/// [`contains`](PriorityMembershipSet::contains) only consults the index.
#[derive(Debug)]
pub struct DrainHeapSet<T: HeapItem> {
    heap: BinaryHeap<Entry<T>>,
    index: BTreeMap<T::Key, KeyState<T::Priority>>,
    closed: usize,
    next_stamp: u64,
    high_water: usize,
    closed_set: ClosedSetPolicy,
    tie_break: TieBreak,
}

impl<T: HeapItem> DrainHeapSet<T> {
    /// Create an empty set under the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(&SearchPolicy::default())
    }

    /// Create an empty set under `policy`.
    #[must_use]
    pub fn with_policy(policy: &SearchPolicy) -> Self {
        Self {
            heap: BinaryHeap::new(),
            index: BTreeMap::new(),
            closed: 0,
            next_stamp: 0,
            high_water: 0,
            closed_set: policy.closed_set,
            tie_break: policy.tie_break,
        }
    }

    /// Verify that the heap and the index describe the same open entries.
    ///
    /// # Panics
    ///
    /// Panics on the first disagreement found. A failure here is a defect in
    /// this type, never a caller error.
    pub fn check_invariants(&self) {
        let mut open = 0;
        for (key, state) in &self.index {
            let KeyState::Open { stamp, priority } = state else {
                continue;
            };
            open += 1;
            let mut matching = self.heap.iter().filter(|entry| entry.stamp == *stamp);
            let Some(entry) = matching.next() else {
                panic!("index names stamp {stamp} but the heap has no such entry");
            };
            assert!(
                matching.next().is_none(),
                "stamp {stamp} appears more than once in the heap"
            );
            assert!(
                entry.item.key() == key && entry.rank.0.priority == *priority,
                "heap entry stamped {stamp} disagrees with its index record"
            );
        }
        assert_eq!(open, self.heap.len(), "open keys disagree with heap size");
        assert_eq!(
            self.index.len() - open,
            self.closed,
            "closed keys disagree with closed count"
        );
    }

    fn entry(&mut self, item: T, priority: T::Priority) -> Entry<T> {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        let order = match self.tie_break {
            TieBreak::Fifo => stamp,
            TieBreak::Lifo => u64::MAX - stamp,
        };
        Entry {
            rank: Reverse(Rank { priority, order }),
            stamp,
            item,
        }
    }

    /// Replace the entry stamped `stale` with `replacement`.
    ///
    /// # Panics
    ///
    /// Panics if no heap entry carries `stale`: the index and heap disagree.
    fn drain_and_rewrite(&mut self, stale: u64, replacement: Entry<T>) {
        let mut drained = Vec::new();
        let mut found = false;
        while let Some(entry) = self.heap.pop() {
            if entry.stamp == stale {
                found = true;
                break;
            }
            drained.push(entry);
        }
        assert!(found, "index names stamp {stale} but the heap has no such entry");
        drained.push(replacement);
        self.heap.extend(drained);
    }
}

impl<T: HeapItem> Default for DrainHeapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HeapItem> PriorityMembershipSet for DrainHeapSet<T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push_or_improve(&mut self, item: T) -> PushOutcome {
        let priority = item.priority();
        let mut reopened = false;
        let stale = match self.index.get(item.key()) {
            None => None,
            Some(KeyState::Closed { priority: popped_at }) => {
                let reopen = matches!(self.closed_set, ClosedSetPolicy::ReopenOnImprove)
                    && priority < *popped_at;
                if !reopen {
                    return PushOutcome::RejectedClosed;
                }
                reopened = true;
                None
            }
            Some(KeyState::Open {
                stamp,
                priority: current,
            }) => {
                if priority >= *current {
                    return PushOutcome::RejectedNotBetter;
                }
                Some(*stamp)
            }
        };

        let key = item.key().clone();
        let entry = self.entry(item, priority.clone());
        self.index.insert(
            key,
            KeyState::Open {
                stamp: entry.stamp,
                priority,
            },
        );
        let outcome = if let Some(stale) = stale {
            self.drain_and_rewrite(stale, entry);
            PushOutcome::Improved
        } else {
            self.heap.push(entry);
            self.high_water = self.high_water.max(self.heap.len());
            if reopened {
                self.closed -= 1;
                PushOutcome::Reopened
            } else {
                PushOutcome::Inserted
            }
        };
        debug_assert_eq!(self.index.len() - self.closed, self.heap.len());
        outcome
    }

    fn pop(&mut self) -> Result<T, FrontierError> {
        let entry = self.heap.pop().ok_or(FrontierError::Empty)?;
        let Reverse(rank) = entry.rank;
        self.index.insert(
            entry.item.key().clone(),
            KeyState::Closed {
                priority: rank.priority,
            },
        );
        self.closed += 1;
        debug_assert_eq!(self.index.len() - self.closed, self.heap.len());
        Ok(entry.item)
    }

    fn top(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    fn get(&self, key: &T::Key) -> Option<&T> {
        let Some(KeyState::Open { stamp, .. }) = self.index.get(key) else {
            return None;
        };
        self.heap
            .iter()
            .find(|entry| entry.stamp == *stamp)
            .map(|entry| &entry.item)
    }

    fn contains(&self, key: &T::Key) -> bool {
        matches!(self.index.get(key), Some(KeyState::Open { .. }))
    }

    fn is_closed(&self, key: &T::Key) -> bool {
        matches!(self.index.get(key), Some(KeyState::Closed { .. }))
    }

    fn closed_len(&self) -> usize {
        self.closed
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
