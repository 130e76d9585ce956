//! Render game positions to the console.
//!
//! Usage:
//!   # Position after a move sequence
//!   cargo run --bin render -- --moves "(0,0)D (3,0)U"
//!
//!   # Every position along the way
//!   cargo run --bin render -- --moves "(0,0)D (3,0)U (1,0)R" --each
//!
//!   # From a state encoding (as served by /api/state/export)
//!   cargo run --bin render -- --position 2852126805

use anyhow::{anyhow, Context};
use clap::Parser;

use slide_core::{parse_moves, GameState, Move};

#[derive(Parser, Debug)]
#[command(about = "Replay moves and print the resulting board")]
struct Args {
    /// Whitespace-separated moves, each written (row,col)D with D in U/D/L/R
    #[arg(long, default_value = "")]
    moves: String,

    /// Start from this state encoding instead of the initial position
    #[arg(long)]
    position: Option<u64>,

    /// Print the board after every move, not just the last
    #[arg(long)]
    each: bool,

    /// Also print the final state encoding
    #[arg(long)]
    encoding: bool,
}

/// Apply `moves` in order from `start`, calling `on_step` after each one.
///
/// Stops at the first illegal move, naming it by 1-based index.
fn replay(
    start: GameState,
    moves: &[Move],
    mut on_step: impl FnMut(usize, Move, &GameState),
) -> anyhow::Result<GameState> {
    let mut state = start;
    for (i, &mov) in moves.iter().enumerate() {
        state = state
            .try_move(mov)
            .map_err(|e| anyhow!("move {} ({}): {}", i + 1, mov, e))?;
        on_step(i + 1, mov, &state);
    }
    Ok(state)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let start = match args.position {
        Some(bits) => GameState::from_u64(bits)
            .with_context(|| format!("invalid --position {bits}"))?,
        None => GameState::initial(),
    };
    let moves = parse_moves(&args.moves)?;

    if args.each {
        println!("{start}\n");
    }
    let last = replay(start, &moves, |n, mov, state| {
        if args.each {
            println!("#{n} {mov}\n{state}\n");
        }
    })?;

    if !args.each {
        println!("{last}");
    }
    if args.encoding {
        println!("Encoding: {}", last.to_u64());
    }
    Ok(())
}
