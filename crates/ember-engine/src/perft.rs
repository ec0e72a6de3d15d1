//! Perft (performance test) for move generator validation.
//!
//! Perft counts leaf nodes of the legal move tree at a given depth. The
//! counts for the standard test positions are well known, so any divergence
//! pinpoints a generation or make/unmake bug.
//!
//! The traversal applies every pseudolegal move in place and rejects it
//! afterwards if the mover's king is attacked, exercising the same
//! make/unmake path the search uses.

use crate::Position;

/// Counts leaf nodes of the legal move tree at the given depth.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mover = position.side_to_move();
    let moves = position.pseudolegal_moves();
    let mut nodes = 0u64;

    for mov in &moves {
        position.make_move(*mov);
        if !position.is_check(mover) {
            nodes += perft(position, depth - 1);
        }
        position.unmake_move();
    }

    nodes
}

/// Perft with the total split per root move, sorted by UCI text.
///
/// Comparing a divide against a known-good engine narrows a bad count down
/// to one root move.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let mover = position.side_to_move();
    let moves = position.pseudolegal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for mov in &moves {
        position.make_move(*mov);
        if !position.is_check(mover) {
            let nodes = if depth > 1 {
                perft(position, depth - 1)
            } else {
                1
            };
            results.push((mov.to_uci(), nodes));
        }
        position.unmake_move();
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
