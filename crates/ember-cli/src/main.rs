//! UCI engine binary.
//!
//! Speaks the UCI protocol on stdin/stdout and answers `go` with a
//! fixed-depth alpha-beta search over the Shannon evaluation.

use std::time::Instant;

use ember_engine::Position;
use ember_search::{SearchResult, Searcher, ShannonEvaluator};
use ember_uci::{stdio_engine, GoOptions, GuiCommand, InfoBuilder};
use log::{debug, warn};

const ENGINE_NAME: &str = "Ember";
const ENGINE_AUTHOR: &str = "Ember developers";

/// Plies searched when the GUI does not ask for a specific depth.
const DEFAULT_DEPTH: u32 = 4;

fn main() {
    env_logger::init();

    let mut engine = stdio_engine();
    let mut position = Position::startpos();
    let mut searcher = Searcher::new(ShannonEvaluator);

    loop {
        let cmd = match engine.read_command() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("error reading command: {e}");
                continue;
            }
        };
        debug!("received {cmd:?}");

        match cmd {
            GuiCommand::Uci => {
                engine.send_id(ENGINE_NAME, ENGINE_AUTHOR).unwrap();
                engine.send_uciok().unwrap();
            }

            GuiCommand::IsReady => {
                engine.send_readyok().unwrap();
            }

            GuiCommand::UciNewGame => {
                position = Position::startpos();
                searcher.reset();
            }

            GuiCommand::Position { fen, moves } => {
                position = match fen {
                    Some(ref f) => match Position::from_fen(f) {
                        Ok(p) => p,
                        Err(e) => {
                            warn!("rejecting position '{f}': {e}");
                            continue;
                        }
                    },
                    None => Position::startpos(),
                };
                apply_moves(&mut position, &moves);
            }

            GuiCommand::Go(opts) => {
                let started = Instant::now();
                let depth = search_depth(&opts);
                let result = searcher.search(&mut position, depth);
                report(&mut engine, depth, &result, started);

                match result.best_move {
                    Some(mov) => engine.send_bestmove(&mov.to_uci()).unwrap(),
                    // No legal moves: mate or stalemate.
                    None => engine.send_bestmove("0000").unwrap(),
                }
            }

            GuiCommand::DumpFen => {
                engine.send_line(&position.to_fen()).unwrap();
            }

            GuiCommand::Stop => {
                // Search is synchronous; there is never anything running here.
            }

            GuiCommand::Quit => break,

            GuiCommand::Unknown(line) => {
                if !line.is_empty() {
                    debug!("ignoring unknown command: {line}");
                }
            }
        }
    }
}

fn apply_moves(position: &mut Position, moves: &[String]) {
    for text in moves {
        match position.move_from_uci(text) {
            Some(mov) if position.is_legal_given_pseudolegal(mov) => {
                position.make_move(mov);
            }
            _ => {
                warn!("ignoring unplayable move '{text}' in {}", position.to_fen());
                return;
            }
        }
    }
}

fn search_depth(opts: &GoOptions) -> u32 {
    match opts.depth {
        Some(depth) => depth.max(1),
        None => DEFAULT_DEPTH,
    }
}

fn report<R: std::io::BufRead, W: std::io::Write>(
    engine: &mut ember_uci::UciEngine<R, W>,
    depth: u32,
    result: &SearchResult,
    started: Instant,
) {
    let elapsed = started.elapsed();
    let millis = elapsed.as_millis() as u64;
    let nps = if millis > 0 {
        result.nodes * 1000 / millis
    } else {
        result.nodes
    };

    let mut info = InfoBuilder::new()
        .depth(depth)
        .score_cp(result.score)
        .nodes(result.nodes)
        .nps(nps)
        .time(millis);
    if let Some(mov) = result.best_move {
        info = info.pv(vec![mov.to_uci()]);
    }
    engine.send_info(info.build()).unwrap();
}
