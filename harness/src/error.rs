//! Typed failures for loading and solving puzzles.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading a puzzle file and writing
/// its solution. Search exhaustion is not an error; see
/// [`crate::runner::PuzzleRun::solved`].
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("puzzle input is empty")]
    Empty,

    #[error("invalid tile value {token:?}")]
    InvalidTile { token: String },

    #[error("{count} tiles do not form a square board of width 2 or more")]
    NotSquare { count: usize },

    #[error("there must be exactly one blank tile, found {count}")]
    BlankCount { count: usize },

    #[error("tile {tile} is out of range for a board of {count} tiles")]
    TileOutOfRange { tile: u32, count: usize },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u32 },

    #[error("start board has width {start} but goal board has width {goal}")]
    WidthMismatch { start: usize, goal: usize },

    #[error("goal is not reachable from start: tile parities differ")]
    Unsolvable,
}

impl PuzzleError {
    /// `true` for failures that mean "no path exists" rather than bad input.
    #[must_use]
    pub fn is_unsolvable(&self) -> bool {
        matches!(self, Self::Unsolvable)
    }
}
