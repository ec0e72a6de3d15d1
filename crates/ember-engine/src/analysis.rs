//! Static pawn-structure and mobility analysis.
//!
//! These queries feed evaluation terms; they never mutate the position.

use crate::{Bitboard, Position};
use ember_core::{Color, Piece};

/// Pawns of `color` that share a file with another friendly pawn.
pub fn doubled_pawns(position: &Position, color: Color) -> Bitboard {
    let pawns = position.pieces_of(Piece::Pawn, color);
    let mut found = Bitboard::EMPTY;
    for file in Bitboard::FILES {
        let on_file = file & pawns;
        if on_file.count() > 1 {
            found |= on_file;
        }
    }
    found
}

/// Pawns of `color` with no friendly pawn on an adjacent file.
pub fn isolated_pawns(position: &Position, color: Color) -> Bitboard {
    let pawns = position.pieces_of(Piece::Pawn, color);
    let mut found = Bitboard::EMPTY;
    for file in 0..8 {
        let on_file = Bitboard::FILES[file] & pawns;
        if on_file.is_not_empty() && (adjacent_files(file) & pawns).is_empty() {
            found |= on_file;
        }
    }
    found
}

/// Pawns of `color` that are level with their rearmost adjacent-file
/// neighbor, with no friendly pawn further back to defend their advance.
pub fn backward_pawns(position: &Position, color: Color) -> Bitboard {
    let pawns = position.pieces_of(Piece::Pawn, color);
    let mut found = Bitboard::EMPTY;

    for file in 0..8 {
        let on_file = pawns & Bitboard::FILES[file];
        if on_file.is_empty() {
            continue;
        }
        let on_adjacent = pawns & adjacent_files(file);

        // Scan ranks from this color's own side outward.
        for rank in rank_scan(color) {
            let rank_mask = Bitboard::RANKS[rank];
            let here = rank_mask & on_file;
            let beside = rank_mask & on_adjacent;
            if here.is_not_empty() && beside.is_not_empty() {
                found |= here;
                break;
            }
            // A neighbor strictly behind can defend; nothing backward here.
            if beside.is_not_empty() && here.is_empty() {
                break;
            }
        }
    }

    found
}

/// Number of legal moves available to the side to move.
pub fn mobility(position: &Position) -> usize {
    position.legal_moves().len()
}

fn adjacent_files(file: usize) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    if file > 0 {
        mask |= Bitboard::FILES[file - 1];
    }
    if file < 7 {
        mask |= Bitboard::FILES[file + 1];
    }
    mask
}

fn rank_scan(color: Color) -> impl Iterator<Item = usize> {
    let forward: Box<dyn Iterator<Item = usize>> = match color {
        Color::White => Box::new(0..8),
        Color::Black => Box::new((0..8).rev()),
    };
    forward
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_structure_is_clean() {
        let position = Position::startpos();
        for color in [Color::White, Color::Black] {
            assert!(doubled_pawns(&position, color).is_empty());
            assert!(isolated_pawns(&position, color).is_empty());
        }
    }

    #[test]
    fn doubled_pawns_found_per_file() {
        // White pawns doubled on the c-file.
        let position = Position::from_fen("4k3/8/8/8/2P5/2P5/4P3/4K3 w - - 0 1").unwrap();
        let doubled = doubled_pawns(&position, Color::White);
        assert_eq!(doubled.count(), 2);
        assert!(doubled.contains(sq("c3")));
        assert!(doubled.contains(sq("c4")));
        assert!(!doubled.contains(sq("e2")));
    }

    #[test]
    fn isolated_pawns_have_no_neighbors() {
        // The a-pawn has a b-file neighbor; the h-pawn stands alone.
        let position = Position::from_fen("4k3/8/8/8/8/8/PP5P/4K3 w - - 0 1").unwrap();
        let isolated = isolated_pawns(&position, Color::White);
        assert_eq!(isolated.count(), 1);
        assert!(isolated.contains(sq("h2")));
    }

    #[test]
    fn backward_pawn_level_with_rearmost_neighbor() {
        // c4 and b4 are level with no pawn behind either; c4 and b4 both
        // read as backward on their own file scans.
        let position = Position::from_fen("4k3/8/8/8/1PP5/8/8/4K3 w - - 0 1").unwrap();
        let backward = backward_pawns(&position, Color::White);
        assert!(backward.contains(sq("b4")));
        assert!(backward.contains(sq("c4")));

        // A neighbor further back clears the flag.
        let covered = Position::from_fen("4k3/8/8/8/2P5/1P6/8/4K3 w - - 0 1").unwrap();
        assert!(backward_pawns(&covered, Color::White).is_empty());
    }

    #[test]
    fn backward_scan_is_color_relative() {
        // Black pawns level on b5/c5: backward from Black's rear (rank 8).
        let position = Position::from_fen("4k3/8/8/1pp5/8/8/8/4K3 b - - 0 1").unwrap();
        let backward = backward_pawns(&position, Color::Black);
        assert!(backward.contains(sq("b5")));
        assert!(backward.contains(sq("c5")));

        let covered = Position::from_fen("4k3/8/1p6/2p5/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(backward_pawns(&covered, Color::Black).is_empty());
    }

    #[test]
    fn startpos_mobility_is_twenty() {
        let position = Position::startpos();
        assert_eq!(mobility(&position), 20);
    }
}
