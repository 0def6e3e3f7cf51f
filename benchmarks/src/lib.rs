//! Shared fixtures for lodestar benchmark suites.

use lodestar_harness::error::PuzzleError;
use lodestar_harness::worlds::n_puzzle::Board;
use lodestar_search::HeapItem;

/// Minimal frontier item: a key and a priority, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: u32,
    pub priority: u32,
}

impl HeapItem for Ticket {
    type Key = u32;
    type Priority = u32;

    fn key(&self) -> &u32 {
        &self.key
    }

    fn priority(&self) -> u32 {
        self.priority
    }
}

/// `n` tickets with distinct keys and scattered priorities.
///
/// Priorities come from a fixed linear congruential sequence so every run
/// pushes the same order.
#[must_use]
pub fn tickets(n: u32) -> Vec<Ticket> {
    let mut seed: u32 = 0x2545_f491;
    (0..n)
        .map(|key| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            Ticket {
                key,
                priority: seed >> 16,
            }
        })
        .collect()
}

/// Strictly cheaper re-arrivals for every ticket, in reverse key order.
#[must_use]
pub fn improvements(tickets: &[Ticket]) -> Vec<Ticket> {
    tickets
        .iter()
        .rev()
        .map(|t| Ticket {
            key: t.key,
            priority: t.priority / 2,
        })
        .collect()
}

/// 4-connected neighbors of `(x, y)` on a `width × width` grid, in a fixed
/// order.
#[must_use]
pub fn grid_neighbors(width: u32, &(x, y): &(u32, u32)) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(4);
    if y > 0 {
        out.push((x, y - 1));
    }
    if y + 1 < width {
        out.push((x, y + 1));
    }
    if x > 0 {
        out.push((x - 1, y));
    }
    if x + 1 < width {
        out.push((x + 1, y));
    }
    out
}

/// Manhattan distance between two grid cells.
#[must_use]
pub fn grid_estimate(a: &(u32, u32), b: &(u32, u32)) -> u64 {
    u64::from(a.0.abs_diff(b.0) + a.1.abs_diff(b.1))
}

/// 8-puzzle starts of increasing difficulty against [`goal_3x3`], as
/// `(label, board)`.
///
/// # Errors
///
/// Returns the parse error of the first malformed board.
pub fn puzzle_starts() -> Result<Vec<(&'static str, Board)>, PuzzleError> {
    [
        ("easy", "4 1 3 7 2 6 0 5 8"),
        ("medium", "8 1 3 4 0 2 7 6 5"),
        ("hard", "0 8 7 6 5 4 3 2 1"),
    ]
    .into_iter()
    .map(|(label, line)| Board::parse_line(line).map(|board| (label, board)))
    .collect()
}

/// The ordered 3×3 goal board.
///
/// # Errors
///
/// Never in practice; propagates the parse result.
pub fn goal_3x3() -> Result<Board, PuzzleError> {
    Board::parse_line("1 2 3 4 5 6 7 8 0")
}
