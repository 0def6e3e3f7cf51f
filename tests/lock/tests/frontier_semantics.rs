//! Frontier lock tests: extract-min order, push-or-improve semantics,
//! closed-set policies, and agreement between the two frontier
//! implementations under arbitrary push/pop sequences.

use proptest::prelude::*;

use lodestar_search::{
    ClosedSetPolicy, DrainHeapSet, FrontierError, HeapItem, IndexedHeapSet,
    PriorityMembershipSet, PushOutcome, SearchPolicy, TieBreak,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    key: u8,
    priority: u32,
    tag: u32,
}

impl HeapItem for Job {
    type Key = u8;
    type Priority = u32;

    fn key(&self) -> &u8 {
        &self.key
    }

    fn priority(&self) -> u32 {
        self.priority
    }
}

fn job(key: u8, priority: u32, tag: u32) -> Job {
    Job { key, priority, tag }
}

fn reopen() -> SearchPolicy {
    SearchPolicy {
        closed_set: ClosedSetPolicy::ReopenOnImprove,
        ..SearchPolicy::default()
    }
}

fn drain_all<F: PriorityMembershipSet<Item = Job>>(set: &mut F) -> Vec<Job> {
    let mut out = Vec::new();
    while let Ok(item) = set.pop() {
        out.push(item);
    }
    out
}

// ---------------------------------------------------------------------------
// Push 10, then 5, then 8 for one key
// ---------------------------------------------------------------------------

fn improve_then_reject<F: PriorityMembershipSet<Item = Job>>(mut set: F) {
    assert_eq!(set.push_or_improve(job(b'k', 10, 1)), PushOutcome::Inserted);
    assert_eq!(set.push_or_improve(job(b'k', 5, 2)), PushOutcome::Improved);
    assert_eq!(
        set.push_or_improve(job(b'k', 8, 3)),
        PushOutcome::RejectedNotBetter
    );
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(&b'k').map(|j| j.priority), Some(5));

    let popped = set.pop().unwrap();
    assert_eq!((popped.priority, popped.tag), (5, 2));
    assert_eq!(set.pop(), Err(FrontierError::Empty));
    assert!(!set.contains(&b'k'));
}

#[test]
fn improved_key_pops_once_at_its_best_priority() {
    improve_then_reject(IndexedHeapSet::new());
    improve_then_reject(DrainHeapSet::new());
}

#[test]
fn equal_priority_is_not_an_improvement() {
    let mut set = IndexedHeapSet::new();
    set.push_or_improve(job(1, 4, 1));
    assert_eq!(
        set.push_or_improve(job(1, 4, 2)),
        PushOutcome::RejectedNotBetter
    );
    assert_eq!(set.top().map(|j| j.tag), Some(1));
}

#[test]
fn finalized_key_is_never_revisited() {
    let mut set = IndexedHeapSet::new();
    set.push_or_improve(job(1, 3, 0));
    set.pop().unwrap();
    assert!(set.is_closed(&1));
    assert!(!set.contains(&1));
    assert_eq!(set.push_or_improve(job(1, 0, 1)), PushOutcome::RejectedClosed);
    assert!(set.is_empty());
    assert_eq!(set.closed_len(), 1);
}

#[test]
fn closed_key_reopens_only_on_strict_improvement() {
    let mut set = DrainHeapSet::with_policy(&reopen());
    set.push_or_improve(job(1, 3, 0));
    set.pop().unwrap();
    assert!(set.is_closed(&1));
    assert_eq!(set.push_or_improve(job(1, 9, 1)), PushOutcome::RejectedClosed);
    assert_eq!(set.push_or_improve(job(1, 3, 2)), PushOutcome::RejectedClosed);
    assert_eq!(set.push_or_improve(job(1, 2, 3)), PushOutcome::Reopened);
    assert!(!set.is_closed(&1));
    assert_eq!(set.closed_len(), 0);
    assert_eq!(set.pop().map(|j| j.tag), Ok(3));
}

#[test]
fn empty_pop_reports_error_not_sentinel() {
    let mut indexed: IndexedHeapSet<Job> = IndexedHeapSet::new();
    let mut drained: DrainHeapSet<Job> = DrainHeapSet::new();
    assert_eq!(indexed.pop(), Err(FrontierError::Empty));
    assert_eq!(drained.pop(), Err(FrontierError::Empty));
    assert!(indexed.top().is_none());
}

#[test]
fn lifo_ties_pop_newest_first() {
    let lifo = SearchPolicy {
        tie_break: TieBreak::Lifo,
        ..SearchPolicy::default()
    };
    let mut set = IndexedHeapSet::with_policy(&lifo);
    for key in 0..4 {
        set.push_or_improve(job(key, 1, 0));
    }
    let keys: Vec<u8> = drain_all(&mut set).iter().map(|j| j.key).collect();
    assert_eq!(keys, vec![3, 2, 1, 0]);
}

#[test]
fn high_water_tracks_peak_open_size() {
    let mut set = IndexedHeapSet::new();
    for key in 0..5 {
        set.push_or_improve(job(key, u32::from(key), 0));
    }
    set.pop().unwrap();
    set.pop().unwrap();
    set.push_or_improve(job(9, 0, 0));
    assert_eq!(set.len(), 4);
    assert_eq!(set.high_water(), 5);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Push(u8, u32),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..12, 0u32..50).prop_map(|(k, p)| Op::Push(k, p)),
        1 => Just(Op::Pop),
    ]
}

fn policy() -> impl Strategy<Value = SearchPolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(reopen, lifo)| SearchPolicy {
        closed_set: if reopen {
            ClosedSetPolicy::ReopenOnImprove
        } else {
            ClosedSetPolicy::FinalizeOnPop
        },
        tie_break: if lifo { TieBreak::Lifo } else { TieBreak::Fifo },
    })
}

proptest! {
    #[test]
    fn pops_come_out_in_non_decreasing_priority(
        pushes in prop::collection::vec((0u8..40, 0u32..100), 0..80),
    ) {
        let mut set = IndexedHeapSet::new();
        for (i, &(key, priority)) in pushes.iter().enumerate() {
            set.push_or_improve(job(key, priority, u32::try_from(i).unwrap()));
        }
        set.check_invariants();
        let popped = drain_all(&mut set);
        for pair in popped.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
        }
    }

    #[test]
    fn each_key_pops_once_at_its_minimum(
        pushes in prop::collection::vec((0u8..20, 0u32..100), 1..60),
    ) {
        let mut set = IndexedHeapSet::new();
        for &(key, priority) in &pushes {
            set.push_or_improve(job(key, priority, 0));
        }
        let popped = drain_all(&mut set);

        let mut keys: Vec<u8> = pushes.iter().map(|&(k, _)| k).collect();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(popped.len(), keys.len());

        for item in &popped {
            let best = pushes
                .iter()
                .filter(|&&(k, _)| k == item.key)
                .map(|&(_, p)| p)
                .min();
            prop_assert_eq!(Some(item.priority), best);
        }
    }

    #[test]
    fn indexed_and_drain_agree(ops in prop::collection::vec(op(), 0..120), policy in policy()) {
        let mut indexed = IndexedHeapSet::with_policy(&policy);
        let mut drained = DrainHeapSet::with_policy(&policy);
        for (i, op) in ops.iter().enumerate() {
            let tag = u32::try_from(i).unwrap();
            match *op {
                Op::Push(key, priority) => {
                    let a = indexed.push_or_improve(job(key, priority, tag));
                    let b = drained.push_or_improve(job(key, priority, tag));
                    prop_assert_eq!(a, b);
                }
                Op::Pop => prop_assert_eq!(indexed.pop(), drained.pop()),
            }
            prop_assert_eq!(indexed.len(), drained.len());
            prop_assert_eq!(indexed.closed_len(), drained.closed_len());
            prop_assert_eq!(indexed.top(), drained.top());
        }
        indexed.check_invariants();
        drained.check_invariants();
        prop_assert_eq!(indexed.high_water(), drained.high_water());
        prop_assert_eq!(drain_all(&mut indexed), drain_all(&mut drained));
    }
}
