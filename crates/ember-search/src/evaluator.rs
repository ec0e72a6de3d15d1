//! Static board evaluation.

use ember_core::{Color, Piece};
use ember_engine::{analysis, Position};

/// Scores a position in centipawns from White's perspective: positive values
/// favor White, negative values favor Black.
pub trait Evaluator {
    fn evaluate(&self, position: &Position) -> i32;
}

/// Shannon's classic evaluation: material plus a flat penalty for doubled,
/// isolated, and backward pawns.
///
/// The mobility term of the original formula is left out; counting legal
/// moves for the side not to move would require mutating the position.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShannonEvaluator;

const KING_VALUE: i32 = 20_000;
const QUEEN_VALUE: i32 = 900;
const ROOK_VALUE: i32 = 500;
const BISHOP_VALUE: i32 = 300;
const KNIGHT_VALUE: i32 = 300;
const PAWN_VALUE: i32 = 100;

/// Per-pawn penalty for each structural defect.
const STRUCTURE_PENALTY: i32 = 50;

impl Evaluator for ShannonEvaluator {
    fn evaluate(&self, position: &Position) -> i32 {
        side_score(position, Color::White) - side_score(position, Color::Black)
    }
}

fn side_score(position: &Position, color: Color) -> i32 {
    let mut score = 0;
    for piece in Piece::ALL {
        let count = position.pieces_of(piece, color).count() as i32;
        score += count * piece_value(piece);
    }

    let defects = analysis::doubled_pawns(position, color).count()
        + analysis::isolated_pawns(position, color).count()
        + analysis::backward_pawns(position, color).count();
    score - STRUCTURE_PENALTY * defects as i32
}

fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => KING_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Pawn => PAWN_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        let position = Position::startpos();
        assert_eq!(ShannonEvaluator.evaluate(&position), 0);
    }

    #[test]
    fn extra_material_counts_for_white() {
        // White has an extra knight.
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1").unwrap();
        assert_eq!(ShannonEvaluator.evaluate(&position), KNIGHT_VALUE);
    }

    #[test]
    fn queen_for_rook_imbalance() {
        let position =
            Position::from_fen("3rk3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(
            ShannonEvaluator.evaluate(&position),
            QUEEN_VALUE - ROOK_VALUE
        );
    }

    #[test]
    fn pawn_structure_defects_are_penalized() {
        // White's c-pawns are doubled and isolated: four defect flags.
        let position =
            Position::from_fen("4k3/8/8/8/2P5/2P5/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            ShannonEvaluator.evaluate(&position),
            2 * PAWN_VALUE - 4 * STRUCTURE_PENALTY
        );
    }

    #[test]
    fn evaluation_is_side_symmetric() {
        let white = Position::from_fen("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/p7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            ShannonEvaluator.evaluate(&white),
            -ShannonEvaluator.evaluate(&black)
        );
    }
}
