//! Solve an n-puzzle under each heuristic and write one solution file per
//! heuristic.
//!
//! Usage: `n-puzzle <start> <goal> [--out-dir DIR] [--heuristic H]...`
//!
//! Exit codes: 0 when every run found a path, 1 on bad input or I/O
//! failure, 2 when the goal is unreachable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use lodestar_harness::runner::run_all;
use lodestar_harness::worlds::n_puzzle::{Board, Heuristic};
use lodestar_search::{ClosedSetPolicy, SearchPolicy, TieBreak};

#[derive(Parser)]
#[command(name = "n-puzzle")]
#[command(version)]
#[command(about = "Solve a sliding-tile puzzle with A* under several heuristics")]
struct Cli {
    /// File whose first line lists the start tiles, row-major, 0 = blank
    start: PathBuf,

    /// File whose first line lists the goal tiles
    goal: PathBuf,

    /// Directory the solution files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Heuristic to run; repeat for several. Defaults to all of them
    #[arg(long = "heuristic", value_enum)]
    heuristics: Vec<Heuristic>,

    /// Reopen finalized states when a cheaper path turns up later
    #[arg(long)]
    reopen: bool,

    /// Break priority ties in favour of the newest entry
    #[arg(long)]
    lifo: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn policy(&self) -> SearchPolicy {
        SearchPolicy {
            closed_set: if self.reopen {
                ClosedSetPolicy::ReopenOnImprove
            } else {
                ClosedSetPolicy::FinalizeOnPop
            },
            tie_break: if self.lifo {
                TieBreak::Lifo
            } else {
                TieBreak::Fifo
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let heuristics = if cli.heuristics.is_empty() {
        Heuristic::ALL.to_vec()
    } else {
        cli.heuristics.clone()
    };

    let result = Board::load(&cli.start).and_then(|start| {
        let goal = Board::load(&cli.goal)?;
        run_all(&start, &goal, &heuristics, &cli.policy(), &cli.out_dir)
    });

    match result {
        Ok(summaries) => {
            let mut all_solved = true;
            for summary in &summaries {
                all_solved &= summary.solved;
                let moves = summary
                    .moves
                    .map_or_else(|| "none".to_string(), |m| m.to_string());
                let digest = summary
                    .digest
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string);
                println!(
                    "heuristic={} solved={} moves={} expanded={} output={} digest={}",
                    summary.heuristic,
                    summary.solved,
                    moves,
                    summary.stats.expanded,
                    summary.output.display(),
                    digest,
                );
            }
            if all_solved {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(err) if err.is_unsolvable() => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
