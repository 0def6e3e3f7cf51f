//! Harness runner: solves one start/goal pair under each requested
//! heuristic and writes every solution to its own file.
//!
//! # Pipeline
//!
//! ```text
//! check widths → check parity → [AStar::solve() → print_solution() → file] × heuristics
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use lodestar_search::{AStar, ContentHash, SearchPolicy, SearchStats};

use crate::error::PuzzleError;
use crate::worlds::n_puzzle::{Board, Heuristic, PuzzleDomain};

/// One finished search over the n-puzzle.
#[derive(Debug)]
pub struct PuzzleRun {
    heuristic: Heuristic,
    engine: AStar<PuzzleDomain>,
}

impl PuzzleRun {
    #[must_use]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[must_use]
    pub fn solved(&self) -> bool {
        self.engine.cost().is_some()
    }

    /// Number of moves on the solution path.
    #[must_use]
    pub fn moves(&self) -> Option<u32> {
        self.engine.cost()
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        self.engine.stats()
    }

    #[must_use]
    pub fn engine(&self) -> &AStar<PuzzleDomain> {
        &self.engine
    }

    /// Digest of the solution trace; `None` when unsolved.
    #[must_use]
    pub fn digest(&self) -> Option<ContentHash> {
        self.engine.solution().map(|trace| trace.digest())
    }

    /// Write the solution text to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::Write`] if the file cannot be created or
    /// written.
    pub fn write_to(&self, path: &Path) -> Result<(), PuzzleError> {
        let write_err = |source| PuzzleError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut sink = BufWriter::new(file);
        self.engine.print_solution(&mut sink).map_err(write_err)?;
        sink.flush().map_err(write_err)
    }
}

/// Outcome of one heuristic in [`run_all`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub heuristic: Heuristic,
    pub solved: bool,
    pub moves: Option<u32>,
    pub stats: SearchStats,
    /// File the solution text was written to.
    pub output: PathBuf,
    pub digest: Option<ContentHash>,
}

/// Solve `start → goal` with one heuristic.
///
/// Boards of different widths and goals of the wrong parity are rejected
/// before any search work happens.
///
/// # Errors
///
/// Returns [`PuzzleError::WidthMismatch`] or [`PuzzleError::Unsolvable`].
pub fn solve_board(
    start: &Board,
    goal: &Board,
    heuristic: Heuristic,
    policy: &SearchPolicy,
) -> Result<PuzzleRun, PuzzleError> {
    check_pair(start, goal)?;

    let mut engine = AStar::new(
        start.clone(),
        goal.clone(),
        PuzzleDomain::new(heuristic),
        policy,
    );
    let solved = engine.solve();
    let stats = engine.stats();
    info!(
        heuristic = heuristic.as_str(),
        solved,
        moves = ?engine.cost(),
        expanded = stats.expanded,
        frontier_high_water = stats.frontier_high_water,
        "puzzle search finished"
    );
    if solved && !heuristic.is_admissible() {
        warn!(
            heuristic = heuristic.as_str(),
            "heuristic overestimates; move count may not be minimal"
        );
    }

    Ok(PuzzleRun { heuristic, engine })
}

/// Run every heuristic in order and write each solution into `out_dir`
/// under [`Heuristic::file_name`].
///
/// # Errors
///
/// Fails fast on an invalid pair or the first write error; files already
/// written are left in place.
pub fn run_all(
    start: &Board,
    goal: &Board,
    heuristics: &[Heuristic],
    policy: &SearchPolicy,
    out_dir: &Path,
) -> Result<Vec<RunSummary>, PuzzleError> {
    check_pair(start, goal)?;
    info!(
        width = start.width(),
        heuristics = heuristics.len(),
        policy = %policy.digest(),
        "starting puzzle runs"
    );

    let mut summaries = Vec::with_capacity(heuristics.len());
    for &heuristic in heuristics {
        let run = solve_board(start, goal, heuristic, policy)?;
        let output = out_dir.join(heuristic.file_name());
        run.write_to(&output)?;
        summaries.push(RunSummary {
            heuristic,
            solved: run.solved(),
            moves: run.moves(),
            stats: *run.stats(),
            output,
            digest: run.digest(),
        });
    }
    Ok(summaries)
}

fn check_pair(start: &Board, goal: &Board) -> Result<(), PuzzleError> {
    if start.width() != goal.width() {
        return Err(PuzzleError::WidthMismatch {
            start: start.width(),
            goal: goal.width(),
        });
    }
    if !start.might_reach(goal) {
        return Err(PuzzleError::Unsolvable);
    }
    Ok(())
}
