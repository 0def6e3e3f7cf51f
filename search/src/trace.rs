//! Solution traces: the root-to-goal path reconstructed from the node arena.

use std::fmt;

use crate::digest::{canonical_hash, canonical_json_bytes, ContentHash, DOMAIN_SOLUTION_TRACE};
use crate::node::{NodeArena, NodeId};

/// One state on the solution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep<S, C> {
    pub state: S,
    /// Cumulative cost from the start state.
    pub g: C,
    /// Heuristic estimate recorded when the node was created.
    pub h: C,
}

/// The solution path, start state first and goal state last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionTrace<S, C> {
    steps: Vec<TraceStep<S, C>>,
}

impl<S: Clone, C: Copy> SolutionTrace<S, C> {
    /// Walk parent links from `terminal` back to the root.
    #[must_use]
    pub fn from_arena(arena: &NodeArena<S, C>, terminal: NodeId) -> Self {
        let steps = arena
            .ancestry(terminal)
            .into_iter()
            .map(|id| {
                let node = arena.get(id);
                TraceStep {
                    state: node.state().clone(),
                    g: node.g(),
                    h: node.h(),
                }
            })
            .collect();
        Self { steps }
    }
}

impl<S, C: Copy> SolutionTrace<S, C> {
    #[must_use]
    pub fn steps(&self) -> &[TraceStep<S, C>] {
        &self.steps
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.steps.iter().map(|step| &step.state)
    }

    /// Number of states on the path (moves + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false` for a trace built from an arena; kept for the
    /// `len`/`is_empty` pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `g` of the goal step.
    #[must_use]
    pub fn total_cost(&self) -> Option<C> {
        self.steps.last().map(|step| step.g)
    }
}

impl<S: fmt::Display, C: Copy> SolutionTrace<S, C>
where
    serde_json::Value: From<C>,
{
    /// JSON form: states rendered through `Display`, costs as numbers.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let steps: Vec<serde_json::Value> = self
            .steps
            .iter()
            .map(|step| {
                serde_json::json!({
                    "state": step.state.to_string(),
                    "g": serde_json::Value::from(step.g),
                    "h": serde_json::Value::from(step.h),
                })
            })
            .collect();
        serde_json::json!({
            "steps": steps,
            "total_cost": self.total_cost().map(serde_json::Value::from),
        })
    }

    /// Content hash of [`SolutionTrace::to_json`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(DOMAIN_SOLUTION_TRACE, &canonical_json_bytes(&self.to_json()))
    }
}

/// Text rendering, one block per step:
///
/// ```text
/// Solution:
/// Step: 1
/// Cost: 0
/// Estimate: 4
/// State:
/// <state>
///
/// ```
impl<S: fmt::Display, C: Copy + fmt::Display> fmt::Display for SolutionTrace<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "Step: {}", i + 1)?;
            writeln!(f, "Cost: {}", step.g)?;
            writeln!(f, "Estimate: {}", step.h)?;
            writeln!(f, "State:")?;
            writeln!(f, "{}", step.state)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
