//! Perft tool: counts leaf nodes of the move generation tree.
//!
//! Prints the node count for every depth up to the requested one, and
//! optionally the per-move breakdown at the full depth for comparing
//! against another engine's `divide` output.

use clap::Parser;
use ember_core::FenParser;
use ember_engine::perft::{perft, perft_divide};
use ember_engine::Position;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Move generation node counter")]
struct Args {
    /// Position to count from.
    #[arg(long, default_value = FenParser::STARTPOS)]
    fen: String,

    /// Maximum search depth in plies.
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Print per-move node counts at the maximum depth.
    #[arg(long)]
    divide: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut position = match Position::from_fen(&args.fen) {
        Ok(position) => position,
        Err(e) => {
            eprintln!("invalid FEN '{}': {e}", args.fen);
            std::process::exit(1);
        }
    };

    println!("{position}");

    for depth in 1..=args.depth {
        let nodes = perft(&mut position, depth);
        println!("perft({depth}) = {nodes}");
    }

    if args.divide {
        println!();
        let mut total = 0;
        for (mov, nodes) in perft_divide(&mut position, args.depth) {
            println!("{mov}: {nodes}");
            total += nodes;
        }
        println!("total: {total}");
    }
}
