//! Property tests for the make/unmake round trip.
//!
//! Random legal playouts are applied and then fully unwound; the board,
//! clocks, rights, en passant state, and hash must all return to their
//! initial values, and the incrementally maintained hash must agree with the
//! from-scratch computation at every step.

use ember_engine::{zobrist, Position};
use proptest::prelude::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn playout_roundtrip(start_fen: &str, choices: &[usize]) -> Result<(), TestCaseError> {
    let mut position = Position::from_fen(start_fen).unwrap();
    let initial_fen = position.to_fen();
    let initial_hash = position.zobrist_hash();

    let mut applied = 0;
    for &choice in choices {
        let moves = position.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mov = moves[choice % moves.len()];
        position.make_move(mov);
        applied += 1;

        prop_assert_eq!(
            position.zobrist_hash(),
            zobrist::hash(&position),
            "incremental hash diverged after {}",
            mov
        );
    }

    prop_assert_eq!(position.ply(), applied);
    for _ in 0..applied {
        position.unmake_move();
        prop_assert_eq!(position.zobrist_hash(), zobrist::hash(&position));
    }

    prop_assert_eq!(position.to_fen(), initial_fen);
    prop_assert_eq!(position.zobrist_hash(), initial_hash);
    prop_assert_eq!(position.ply(), 0);
    Ok(())
}

proptest! {
    #[test]
    fn startpos_playout_roundtrip(choices in prop::collection::vec(0usize..4096, 0..48)) {
        playout_roundtrip(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &choices,
        )?;
    }

    #[test]
    fn kiwipete_playout_roundtrip(choices in prop::collection::vec(0usize..4096, 0..32)) {
        playout_roundtrip(KIWIPETE, &choices)?;
    }

    #[test]
    fn interleaved_unmake_restores_each_ply(choices in prop::collection::vec(0usize..4096, 1..24)) {
        let mut position = Position::startpos();
        for &choice in &choices {
            let moves = position.legal_moves();
            if moves.is_empty() {
                break;
            }
            let fen_before = position.to_fen();
            let hash_before = position.zobrist_hash();
            let mov = moves[choice % moves.len()];

            // Make then immediately unmake must be an exact identity.
            position.make_move(mov);
            position.unmake_move();
            prop_assert_eq!(position.to_fen(), fen_before);
            prop_assert_eq!(position.zobrist_hash(), hash_before);

            // Then actually advance.
            position.make_move(mov);
        }
    }
}
