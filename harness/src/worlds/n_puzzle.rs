//! The sliding-tile n-puzzle.
//!
//! A board of width `k` holds the tiles `0..k*k`, with `0` marking the
//! blank. One move slides a tile orthogonally adjacent to the blank into it;
//! every move costs 1.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lodestar_search::SearchDomain;

use crate::error::PuzzleError;

/// A square tile layout.
///
/// Ordering compares tiles lexicographically; `width` and `blank` are
/// derived from `tiles` and never break a tie.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board {
    tiles: Vec<u32>,
    width: usize,
    blank: usize,
}

impl Board {
    /// Parse whitespace-separated tile values.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the line is empty, holds a non-integer,
    /// is not a square of width 2 or more, or is not a permutation of
    /// `0..count` with exactly one blank.
    pub fn parse_line(line: &str) -> Result<Self, PuzzleError> {
        let tiles = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| PuzzleError::InvalidTile {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tiles(tiles)
    }

    /// Build a board from row-major tiles.
    ///
    /// # Errors
    ///
    /// Same validation as [`Board::parse_line`].
    pub fn from_tiles(tiles: Vec<u32>) -> Result<Self, PuzzleError> {
        let count = tiles.len();
        if count == 0 {
            return Err(PuzzleError::Empty);
        }
        let width = (2..=count).find(|w| w * w >= count).unwrap_or(count);
        if width < 2 || width * width != count {
            return Err(PuzzleError::NotSquare { count });
        }

        let blanks = tiles.iter().filter(|&&t| t == 0).count();
        if blanks != 1 {
            return Err(PuzzleError::BlankCount { count: blanks });
        }

        let mut seen = vec![false; count];
        for &tile in &tiles {
            let slot = usize::try_from(tile)
                .ok()
                .and_then(|i| seen.get_mut(i))
                .ok_or(PuzzleError::TileOutOfRange { tile, count })?;
            if *slot {
                return Err(PuzzleError::DuplicateTile { tile });
            }
            *slot = true;
        }

        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self {
            tiles,
            width,
            blank,
        })
    }

    /// Read the first line of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::Read`] if the file cannot be read, otherwise
    /// whatever [`Board::parse_line`] reports.
    pub fn load(path: &Path) -> Result<Self, PuzzleError> {
        let text = std::fs::read_to_string(path).map_err(|source| PuzzleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Boards one blank move away, in the order up, down, left, right.
    #[must_use]
    pub fn neighbors(&self) -> Vec<Board> {
        let (row, col) = (self.blank / self.width, self.blank % self.width);
        let mut boards = Vec::with_capacity(4);
        if row > 0 {
            boards.push(self.slide(self.blank - self.width));
        }
        if row + 1 < self.width {
            boards.push(self.slide(self.blank + self.width));
        }
        if col > 0 {
            boards.push(self.slide(self.blank - 1));
        }
        if col + 1 < self.width {
            boards.push(self.slide(self.blank + 1));
        }
        boards
    }

    fn slide(&self, from: usize) -> Board {
        let mut next = self.clone();
        next.tiles.swap(self.blank, from);
        next.blank = from;
        next
    }

    /// Whether `goal` can be reached from this board by blank moves.
    ///
    /// Compares the permutation parity invariant of both boards: inversion
    /// parity on odd widths, inversion parity combined with the blank's row
    /// on even widths.
    #[must_use]
    pub fn might_reach(&self, goal: &Board) -> bool {
        self.width == goal.width && self.polarity() == goal.polarity()
    }

    fn polarity(&self) -> bool {
        let even_inversions = self.inversions() % 2 == 0;
        if self.width % 2 == 1 {
            even_inversions
        } else {
            let even_row = (self.blank / self.width) % 2 == 0;
            even_row == even_inversions
        }
    }

    fn inversions(&self) -> usize {
        let tiles: Vec<u32> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| b < a).count())
            .sum()
    }

    /// Row-major position of each tile value.
    fn positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.tiles.len()];
        for (pos, &tile) in self.tiles.iter().enumerate() {
            positions[tile as usize] = pos;
        }
        positions
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    /// Only the first line is read; anything after it is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s.lines().next().unwrap_or_default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.tiles.chunks(self.width).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, tile) in chunk.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{tile}")?;
            }
        }
        Ok(())
    }
}

/// Remaining-cost estimates between two boards of the same width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Heuristic {
    /// Non-blank tiles not on their goal square. Admissible.
    Displaced,
    /// Sum of row and column distances of non-blank tiles. Admissible and
    /// consistent.
    Manhattan,
    /// `Displaced + Manhattan`. Overestimates, so paths may be suboptimal.
    DisplacedManhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::Displaced,
        Heuristic::Manhattan,
        Heuristic::DisplacedManhattan,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Displaced => "displaced",
            Self::Manhattan => "manhattan",
            Self::DisplacedManhattan => "displaced-manhattan",
        }
    }

    /// Name of the solution file this heuristic's run is written to.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Displaced => "displaced.txt",
            Self::Manhattan => "manhattan.txt",
            Self::DisplacedManhattan => "displaced-manhattan.txt",
        }
    }

    #[must_use]
    pub fn is_admissible(self) -> bool {
        !matches!(self, Self::DisplacedManhattan)
    }

    /// # Panics
    ///
    /// Panics if the boards differ in width.
    #[must_use]
    pub fn estimate(self, state: &Board, goal: &Board) -> u32 {
        assert_eq!(state.width, goal.width, "heuristic needs equal widths");
        match self {
            Self::Displaced => displaced(state, goal),
            Self::Manhattan => manhattan(state, goal),
            Self::DisplacedManhattan => displaced(state, goal) + manhattan(state, goal),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn displaced(state: &Board, goal: &Board) -> u32 {
    let count = state
        .tiles
        .iter()
        .zip(&goal.tiles)
        .filter(|&(&tile, &target)| tile != 0 && tile != target)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn manhattan(state: &Board, goal: &Board) -> u32 {
    let targets = goal.positions();
    let width = state.width;
    let total: usize = state
        .tiles
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(pos, &tile)| {
            let target = targets[tile as usize];
            (pos / width).abs_diff(target / width) + (pos % width).abs_diff(target % width)
        })
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// The n-puzzle as a [`SearchDomain`]: blank moves, unit cost, and the
/// chosen [`Heuristic`].
#[derive(Debug, Clone, Copy)]
pub struct PuzzleDomain {
    heuristic: Heuristic,
}

impl PuzzleDomain {
    #[must_use]
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }

    #[must_use]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

impl SearchDomain for PuzzleDomain {
    type State = Board;
    type Cost = u32;

    fn neighbors(&self, state: &Board) -> Vec<Board> {
        state.neighbors()
    }

    fn distance(&self, _from: &Board, _to: &Board) -> u32 {
        1
    }

    fn heuristic(&self, state: &Board, goal: &Board) -> u32 {
        self.heuristic.estimate(state, goal)
    }
}
