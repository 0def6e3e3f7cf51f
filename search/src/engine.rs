//! A* search engine.
//!
//! The loop pops the cheapest frontier node, stops if it is the goal, and
//! otherwise moves it into the node arena and pushes one candidate per
//! neighbor with `push_or_improve`. Termination is driven only by reaching
//! the goal or emptying the frontier.

use std::fmt;
use std::io;

use tracing::{debug, trace};

use crate::domain::{Cost, FnDomain, SearchDomain};
use crate::heapset::{IndexedHeapSet, PriorityMembershipSet, PushOutcome};
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::policy::SearchPolicy;
use crate::trace::SolutionTrace;

type NodeOf<D> = SearchNode<<D as SearchDomain>::State, <D as SearchDomain>::Cost>;

/// Per-engine lifecycle. Both non-`Unsolved` states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Unsolved,
    /// The goal was popped; a solution path exists.
    Solved,
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

impl SearchStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Unsolved)
    }
}

/// Counters describing one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier (including the goal).
    pub popped: u64,
    /// Popped nodes whose neighbors were generated.
    pub expanded: u64,
    /// Neighbor states produced by the domain.
    pub generated: u64,
    pub inserted: u64,
    pub improved: u64,
    pub rejected_not_better: u64,
    /// Candidates whose state was closed and stayed closed.
    pub rejected_closed: u64,
    /// Candidates that reopened a closed state at a better priority.
    pub reopened: u64,
    pub frontier_high_water: u64,
}

impl SearchStats {
    fn record(&mut self, outcome: PushOutcome) {
        match outcome {
            PushOutcome::Inserted => self.inserted += 1,
            PushOutcome::Improved => self.improved += 1,
            PushOutcome::RejectedNotBetter => self.rejected_not_better += 1,
            PushOutcome::RejectedClosed => self.rejected_closed += 1,
            PushOutcome::Reopened => self.reopened += 1,
        }
    }
}

/// Best-first A* search from `start` to `goal` over a [`SearchDomain`].
///
/// An engine is single-use: [`solve`](Self::solve) runs to a terminal
/// [`SearchStatus`] and later calls return the cached answer without doing
/// any work.
pub struct AStar<D: SearchDomain, F = IndexedHeapSet<NodeOf<D>>> {
    start: D::State,
    goal: D::State,
    domain: D,
    frontier: F,
    arena: NodeArena<D::State, D::Cost>,
    terminal: Option<NodeId>,
    status: SearchStatus,
    stats: SearchStats,
}

impl<D: SearchDomain> AStar<D> {
    /// Engine over the default [`IndexedHeapSet`] frontier.
    pub fn new(start: D::State, goal: D::State, domain: D, policy: &SearchPolicy) -> Self {
        Self::with_frontier(start, goal, domain, IndexedHeapSet::with_policy(policy))
    }
}

impl<S, C, G, Dist, H> AStar<FnDomain<S, C, G, Dist, H>>
where
    S: Ord + Clone,
    C: Cost,
    G: Fn(&S) -> Vec<S>,
    Dist: Fn(&S, &S) -> C,
    H: Fn(&S, &S) -> C,
{
    /// Engine over closures, default policy.
    pub fn from_fns(start: S, goal: S, generator: G, distance: Dist, estimator: H) -> Self {
        Self::new(
            start,
            goal,
            FnDomain::new(generator, distance, estimator),
            &SearchPolicy::default(),
        )
    }
}

impl<D, F> AStar<D, F>
where
    D: SearchDomain,
    F: PriorityMembershipSet<Item = NodeOf<D>>,
{
    /// Engine over a caller-supplied frontier. The frontier must be empty.
    ///
    /// # Panics
    ///
    /// Panics if `frontier` already tracks entries.
    pub fn with_frontier(start: D::State, goal: D::State, domain: D, frontier: F) -> Self {
        assert!(
            frontier.is_empty() && frontier.closed_len() == 0,
            "engine frontier must start empty"
        );
        Self {
            start,
            goal,
            domain,
            frontier,
            arena: NodeArena::new(),
            terminal: None,
            status: SearchStatus::Unsolved,
            stats: SearchStats::default(),
        }
    }

    /// Run the search. Returns `true` iff a path to the goal was found.
    ///
    /// Idempotent once terminal: the cached result is returned and no
    /// domain function is called again.
    ///
    /// # Panics
    ///
    /// Panics if the frontier reports itself non-empty but fails to pop, or
    /// if a domain function panics.
    pub fn solve(&mut self) -> bool {
        match self.status {
            SearchStatus::Solved => return true,
            SearchStatus::Exhausted => return false,
            SearchStatus::Unsolved => {}
        }

        let root_h = self.domain.heuristic(&self.start, &self.goal);
        let outcome = self
            .frontier
            .push_or_improve(SearchNode::root(self.start.clone(), root_h));
        self.stats.record(outcome);
        debug!(root_h = ?root_h, "search started");

        while !self.frontier.is_empty() {
            let node = match self.frontier.pop() {
                Ok(node) => node,
                Err(err) => panic!("frontier reported non-empty but pop failed: {err}"),
            };
            self.stats.popped += 1;

            if *node.state() == self.goal {
                let cost = node.g();
                self.terminal = Some(self.arena.push(node));
                self.status = SearchStatus::Solved;
                self.sync_high_water();
                debug!(cost = ?cost, popped = self.stats.popped, "goal reached");
                return true;
            }

            let parent_id = self.arena.push(node);
            let parent = self.arena.get(parent_id);
            self.stats.expanded += 1;
            trace!(
                node = parent_id.index(),
                g = ?parent.g(),
                f = ?parent.f(),
                open = self.frontier.len(),
                "expanding"
            );

            for state in self.domain.neighbors(parent.state()) {
                self.stats.generated += 1;
                let step = self.domain.distance(parent.state(), &state);
                let h = self.domain.heuristic(&state, &self.goal);
                let child = SearchNode::successor(parent_id, parent, state, step, h);
                let outcome = self.frontier.push_or_improve(child);
                self.stats.record(outcome);
            }
        }

        self.status = SearchStatus::Exhausted;
        self.sync_high_water();
        debug!(
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            "frontier exhausted"
        );
        false
    }

    fn sync_high_water(&mut self) {
        self.stats.frontier_high_water = self.frontier.high_water() as u64;
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn start(&self) -> &D::State {
        &self.start
    }

    #[must_use]
    pub fn goal(&self) -> &D::State {
        &self.goal
    }

    /// Read access to the frontier, e.g. to inspect leftover open entries.
    #[must_use]
    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    /// Every node popped so far, in pop order.
    #[must_use]
    pub fn arena(&self) -> &NodeArena<D::State, D::Cost> {
        &self.arena
    }

    /// Cost of the solution path.
    #[must_use]
    pub fn cost(&self) -> Option<D::Cost> {
        self.terminal.map(|id| self.arena.get(id).g())
    }

    /// States on the solution path, start first.
    #[must_use]
    pub fn path(&self) -> Option<Vec<&D::State>> {
        let terminal = self.terminal?;
        Some(
            self.arena
                .ancestry(terminal)
                .into_iter()
                .map(|id| self.arena.get(id).state())
                .collect(),
        )
    }

    /// The reconstructed solution, or `None` if no goal was reached.
    #[must_use]
    pub fn solution(&self) -> Option<SolutionTrace<D::State, D::Cost>> {
        self.terminal
            .map(|id| SolutionTrace::from_arena(&self.arena, id))
    }

    /// Write the solution trace to `sink`, or `No solution found.` if the
    /// goal was not reached (including before [`solve`](Self::solve) ran).
    ///
    /// # Errors
    ///
    /// Propagates any write error from `sink`.
    pub fn print_solution<W: io::Write>(&self, sink: &mut W) -> io::Result<()>
    where
        D::State: fmt::Display,
        D::Cost: fmt::Display,
    {
        match self.solution() {
            Some(trace) => write!(sink, "{trace}"),
            None => writeln!(sink, "No solution found."),
        }
    }
}

impl<D, F> fmt::Debug for AStar<D, F>
where
    D: SearchDomain,
    D::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStar")
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("status", &self.status)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
