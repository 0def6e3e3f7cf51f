//! Addressable binary heap with a keyed index.
//!
//! Items sit in a slot arena that never moves them. The heap vector holds
//! slot handles, and every slot remembers its current heap position, so an
//! entry found through the index can be sifted in place.

use std::collections::BTreeMap;

use super::{HeapItem, PriorityMembershipSet, PushOutcome};
use crate::error::FrontierError;
use crate::policy::{ClosedSetPolicy, SearchPolicy, TieBreak};

#[derive(Debug)]
struct Slot<T: HeapItem> {
    item: T,
    priority: T::Priority,
    stamp: u64,
    pos: usize,
}

/// `Closed` keeps the priority the key was popped at.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyState<P> {
    Open(usize),
    Closed(P),
}

/// Frontier with O(log n) insert, pop and decrease-key.
///
/// Maintains:
/// - A slot arena (`slots` + `free`) owning the open items
/// - A heap of slot handles ordered by `(priority, stamp)`
/// - A `BTreeMap` from key to open handle or closed marker
#[derive(Debug)]
pub struct IndexedHeapSet<T: HeapItem> {
    slots: Vec<Option<Slot<T>>>,
    free: Vec<usize>,
    heap: Vec<usize>,
    index: BTreeMap<T::Key, KeyState<T::Priority>>,
    closed: usize,
    next_stamp: u64,
    high_water: usize,
    closed_set: ClosedSetPolicy,
    tie_break: TieBreak,
}

impl<T: HeapItem> IndexedHeapSet<T> {
    /// Create an empty set under the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(&SearchPolicy::default())
    }

    /// Create an empty set under `policy`.
    #[must_use]
    pub fn with_policy(policy: &SearchPolicy) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            heap: Vec::new(),
            index: BTreeMap::new(),
            closed: 0,
            next_stamp: 0,
            high_water: 0,
            closed_set: policy.closed_set,
            tie_break: policy.tie_break,
        }
    }

    /// Verify heap order, slot positions and index agreement.
    ///
    /// # Panics
    ///
    /// Panics on the first disagreement found. A failure here is a defect in
    /// this type, never a caller error.
    pub fn check_invariants(&self) {
        for (pos, &handle) in self.heap.iter().enumerate() {
            let slot = self.slot(handle);
            assert_eq!(slot.pos, pos, "slot {handle} records position {}", slot.pos);
            if pos > 0 {
                let parent = self.heap[(pos - 1) / 2];
                assert!(
                    !self.before(handle, parent),
                    "heap order violated at position {pos}"
                );
            }
            assert!(
                matches!(self.index.get(slot.item.key()), Some(KeyState::Open(h)) if *h == handle),
                "index does not point at slot {handle}"
            );
        }
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.heap.len(), "live slots disagree with heap size");
        let open = self
            .index
            .values()
            .filter(|s| matches!(s, KeyState::Open(_)))
            .count();
        assert_eq!(open, self.heap.len(), "open keys disagree with heap size");
        assert_eq!(
            self.index.len() - open,
            self.closed,
            "closed keys disagree with closed count"
        );
    }

    fn slot(&self, handle: usize) -> &Slot<T> {
        match self.slots.get(handle) {
            Some(Some(slot)) => slot,
            _ => panic!("heap handle {handle} refers to a vacant slot"),
        }
    }

    fn slot_mut(&mut self, handle: usize) -> &mut Slot<T> {
        match self.slots.get_mut(handle) {
            Some(Some(slot)) => slot,
            _ => panic!("heap handle {handle} refers to a vacant slot"),
        }
    }

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    /// `true` if the entry in slot `a` is extracted before the one in `b`.
    fn before(&self, a: usize, b: usize) -> bool {
        let (a, b) = (self.slot(a), self.slot(b));
        match a.priority.cmp(&b.priority) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.tie_break.prefers(a.stamp, b.stamp),
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        let (hi, hj) = (self.heap[i], self.heap[j]);
        self.slot_mut(hi).pos = i;
        self.slot_mut(hj).pos = j;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.before(self.heap[pos], self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.before(self.heap[right], self.heap[left]) {
                right
            } else {
                left
            };
            if !self.before(self.heap[child], self.heap[pos]) {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    fn insert(&mut self, item: T) {
        let key = item.key().clone();
        let slot = Slot {
            priority: item.priority(),
            stamp: self.stamp(),
            pos: self.heap.len(),
            item,
        };
        let handle = if let Some(handle) = self.free.pop() {
            self.slots[handle] = Some(slot);
            handle
        } else {
            self.slots.push(Some(slot));
            self.slots.len() - 1
        };
        self.heap.push(handle);
        self.sift_up(self.heap.len() - 1);
        self.index.insert(key, KeyState::Open(handle));
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn improve(&mut self, handle: usize, item: T, priority: T::Priority) {
        let stamp = self.stamp();
        let slot = self.slot_mut(handle);
        slot.item = item;
        slot.priority = priority;
        slot.stamp = stamp;
        let pos = slot.pos;
        // Strictly lower priority dominates the stamp, so the entry can only rise.
        self.sift_up(pos);
    }
}

impl<T: HeapItem> Default for IndexedHeapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HeapItem> PriorityMembershipSet for IndexedHeapSet<T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push_or_improve(&mut self, item: T) -> PushOutcome {
        let outcome = match self.index.get(item.key()).cloned() {
            None => {
                self.insert(item);
                PushOutcome::Inserted
            }
            Some(KeyState::Closed(popped_at)) => {
                let reopen = matches!(self.closed_set, ClosedSetPolicy::ReopenOnImprove)
                    && item.priority() < popped_at;
                if reopen {
                    self.closed -= 1;
                    self.insert(item);
                    PushOutcome::Reopened
                } else {
                    PushOutcome::RejectedClosed
                }
            }
            Some(KeyState::Open(handle)) => {
                let priority = item.priority();
                if priority < self.slot(handle).priority {
                    self.improve(handle, item, priority);
                    PushOutcome::Improved
                } else {
                    PushOutcome::RejectedNotBetter
                }
            }
        };
        debug_assert_eq!(self.index.len() - self.closed, self.heap.len());
        outcome
    }

    fn pop(&mut self) -> Result<T, FrontierError> {
        let Some(&handle) = self.heap.first() else {
            return Err(FrontierError::Empty);
        };
        if let Some(last) = self.heap.pop() {
            if !self.heap.is_empty() {
                self.heap[0] = last;
                self.slot_mut(last).pos = 0;
                self.sift_down(0);
            }
        }
        let Some(slot) = self.slots[handle].take() else {
            panic!("heap handle {handle} refers to a vacant slot");
        };
        self.free.push(handle);

        self.index
            .insert(slot.item.key().clone(), KeyState::Closed(slot.priority));
        self.closed += 1;
        debug_assert_eq!(self.index.len() - self.closed, self.heap.len());
        Ok(slot.item)
    }

    fn top(&self) -> Option<&T> {
        self.heap.first().map(|&handle| &self.slot(handle).item)
    }

    fn get(&self, key: &T::Key) -> Option<&T> {
        match self.index.get(key) {
            Some(&KeyState::Open(handle)) => Some(&self.slot(handle).item),
            _ => None,
        }
    }

    fn is_closed(&self, key: &T::Key) -> bool {
        matches!(self.index.get(key), Some(KeyState::Closed(_)))
    }

    fn closed_len(&self) -> usize {
        self.closed
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
