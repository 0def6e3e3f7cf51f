//! Lodestar Search: generic A* over lazily generated state spaces.
//!
//! The crate knows nothing about any concrete state type. A domain plugs in
//! through [`SearchDomain`] (or three closures via [`FnDomain`]); the engine
//! owns its frontier and node arena exclusively and runs to completion on
//! the calling thread.
//!
//! # Key types
//!
//! - [`PriorityMembershipSet`] — frontier contract: extract-min, keyed
//!   membership, decrease-key, closed set
//! - [`IndexedHeapSet`] / [`DrainHeapSet`] — its two implementations
//! - [`SearchNode`] / [`NodeArena`] — immutable nodes with index parent links
//! - [`AStar`] — the search loop and path reconstruction
//! - [`SolutionTrace`] — the root-first path with text, JSON and digest forms
//! - [`SearchPolicy`] — closed-set and tie-break configuration

#![forbid(unsafe_code)]

pub mod digest;
pub mod domain;
pub mod engine;
pub mod error;
pub mod heapset;
pub mod node;
pub mod policy;
pub mod trace;

pub use digest::ContentHash;
pub use domain::{Cost, FnDomain, SearchDomain};
pub use engine::{AStar, SearchStats, SearchStatus};
pub use error::FrontierError;
pub use heapset::{DrainHeapSet, HeapItem, IndexedHeapSet, PriorityMembershipSet, PushOutcome};
pub use node::{NodeArena, NodeId, SearchNode};
pub use policy::{ClosedSetPolicy, SearchPolicy, TieBreak};
pub use trace::{SolutionTrace, TraceStep};
