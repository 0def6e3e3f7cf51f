//! Search nodes and the arena that owns expanded ones.
//!
//! A node's parent link is a [`NodeId`] into a [`NodeArena`]. Only popped
//! nodes are ever moved into the arena, and only popped nodes become
//! parents, so every parent id points strictly backwards and the ancestry
//! chain is acyclic by construction. Candidates that lose a decrease-key
//! race are simply dropped by the frontier; nothing refers to them.

use crate::domain::Cost;
use crate::heapset::HeapItem;

/// Stable index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An immutable search node.
///
/// `f = g + h` is computed once at construction. Frontier ordering uses `f`;
/// the frontier key is the state itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode<S, C> {
    state: S,
    g: C,
    h: C,
    f: C,
    parent: Option<NodeId>,
}

impl<S, C: Cost> SearchNode<S, C> {
    /// The start node: `g = 0`, no parent.
    #[must_use]
    pub fn root(state: S, h: C) -> Self {
        Self {
            state,
            g: C::zero(),
            h,
            f: h,
            parent: None,
        }
    }

    /// A node reached from `parent` (stored at `parent_id`) by one step
    /// costing `step`. `g` is the parent's `g` plus `step`.
    #[must_use]
    pub fn successor(parent_id: NodeId, parent: &Self, state: S, step: C, h: C) -> Self {
        let g = parent.g + step;
        Self {
            state,
            g,
            h,
            f: g + h,
            parent: Some(parent_id),
        }
    }
}

impl<S, C: Copy> SearchNode<S, C> {
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Accumulated cost from the start state.
    #[must_use]
    pub fn g(&self) -> C {
        self.g
    }

    /// Heuristic estimate to the goal, computed at construction.
    #[must_use]
    pub fn h(&self) -> C {
        self.h
    }

    /// Total priority `g + h`.
    #[must_use]
    pub fn f(&self) -> C {
        self.f
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl<S: Ord + Clone, C: Cost> HeapItem for SearchNode<S, C> {
    type Key = S;
    type Priority = C;

    fn key(&self) -> &S {
        &self.state
    }

    fn priority(&self) -> C {
        self.f
    }
}

/// Append-only store of expanded nodes, addressed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct NodeArena<S, C> {
    nodes: Vec<SearchNode<S, C>>,
}

impl<S, C: Copy> NodeArena<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store `node` and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the node's parent is not already in the arena, or if the
    /// arena would exceed `u32::MAX` nodes.
    pub fn push(&mut self, node: SearchNode<S, C>) -> NodeId {
        let Ok(raw) = u32::try_from(self.nodes.len()) else {
            panic!("node arena exceeded {} nodes", u32::MAX);
        };
        if let Some(parent) = node.parent {
            assert!(
                parent.index() < self.nodes.len(),
                "parent {parent:?} does not precede node {raw}"
            );
        }
        self.nodes.push(node);
        NodeId(raw)
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, C> {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids from the root to `id` inclusive, root first.
    #[must_use]
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            chain.push(node_id);
            current = self.get(node_id).parent;
        }
        chain.reverse();
        chain
    }
}

impl<S, C: Copy> Default for NodeArena<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
