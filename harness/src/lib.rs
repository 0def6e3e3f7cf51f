//! Lodestar Harness: the n-puzzle on top of the generic search core.
//!
//! Everything puzzle-shaped lives here: board parsing and validation, blank
//! moves, the solvability parity check, the heuristics, and the runner that
//! writes one solution file per heuristic. The search crate never sees a
//! tile.

#![forbid(unsafe_code)]

pub mod error;
pub mod runner;
pub mod worlds;

pub use error::PuzzleError;
