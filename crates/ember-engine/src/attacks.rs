//! Attack geometry for all piece types.
//!
//! Knight, king, and pawn attacks are plain per-square lookups. Sliding
//! attacks use classical blocked-ray scans over eight precomputed ray tables:
//! the nearest blocker on a positive ray is found with trailing zeros, on a
//! negative ray with leading zeros, and everything beyond it is masked off
//! with the blocker's own ray.

use crate::Bitboard;
use ember_core::{Color, Square};

/// Precomputed knight attack table.
const KNIGHT_ATTACKS: [Bitboard; 64] = compute_leaper_attacks(&KNIGHT_STEPS);

/// Precomputed king attack table.
const KING_ATTACKS: [Bitboard; 64] = compute_leaper_attacks(&KING_STEPS);

/// Precomputed pawn attack tables [color][square].
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    compute_leaper_attacks(&[(1, 1), (-1, 1)]),
    compute_leaper_attacks(&[(1, -1), (-1, -1)]),
];

/// Ray tables [direction][square]: every square reachable from the square
/// in the direction, on an empty board.
const RAYS: [[Bitboard; 64]; 8] = compute_rays();

/// Squares strictly between two squares on a shared rank, file, or diagonal;
/// empty when the squares are not aligned.
const BETWEEN: [[Bitboard; 64]; 64] = compute_between();

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

// Direction indices into RAYS. The first four are "positive" (increasing
// square index), the rest "negative".
const NORTH: usize = 0;
const NORTH_EAST: usize = 1;
const EAST: usize = 2;
const NORTH_WEST: usize = 3;
const SOUTH: usize = 4;
const SOUTH_EAST: usize = 5;
const WEST: usize = 6;
const SOUTH_WEST: usize = 7;

const fn direction_step(direction: usize) -> (i8, i8) {
    match direction {
        NORTH => (0, 1),
        NORTH_EAST => (1, 1),
        EAST => (1, 0),
        NORTH_WEST => (-1, 1),
        SOUTH => (0, -1),
        SOUTH_EAST => (1, -1),
        WEST => (-1, 0),
        SOUTH_WEST => (-1, -1),
        _ => (0, 0),
    }
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns pawn attacks from the given square for the given color.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Returns bishop attacks from the given square with the given occupancy.
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, NORTH_EAST)
        | ray_attacks(sq, occupied, NORTH_WEST)
        | ray_attacks(sq, occupied, SOUTH_EAST)
        | ray_attacks(sq, occupied, SOUTH_WEST)
}

/// Returns rook attacks from the given square with the given occupancy.
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, NORTH)
        | ray_attacks(sq, occupied, EAST)
        | ray_attacks(sq, occupied, SOUTH)
        | ray_attacks(sq, occupied, WEST)
}

/// Returns queen attacks from the given square with the given occupancy.
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Returns the squares strictly between two aligned squares.
///
/// Empty when the squares do not share a rank, file, or diagonal, or are
/// adjacent.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index() as usize][b.index() as usize]
}

fn ray_attacks(sq: Square, occupied: Bitboard, direction: usize) -> Bitboard {
    let ray = RAYS[direction][sq.index() as usize];
    let blockers = ray & occupied;
    if blockers.is_empty() {
        return ray;
    }
    let nearest = if direction < 4 {
        blockers.0.trailing_zeros()
    } else {
        63 - blockers.0.leading_zeros()
    } as usize;
    // The blocker square stays attackable; everything beyond it is shadowed.
    ray ^ RAYS[direction][nearest]
}

const fn step_target(sq: usize, file_delta: i8, rank_delta: i8) -> Option<usize> {
    let file = (sq % 8) as i8 + file_delta;
    let rank = (sq / 8) as i8 + rank_delta;
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        None
    } else {
        Some((rank * 8 + file) as usize)
    }
}

const fn compute_leaper_attacks<const N: usize>(steps: &[(i8, i8); N]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let mut bb = 0u64;
        let mut i = 0;
        while i < N {
            if let Some(target) = step_target(sq, steps[i].0, steps[i].1) {
                bb |= 1u64 << target;
            }
            i += 1;
        }
        attacks[sq] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

const fn compute_rays() -> [[Bitboard; 64]; 8] {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut direction = 0;
    while direction < 8 {
        let (file_delta, rank_delta) = direction_step(direction);
        let mut sq = 0;
        while sq < 64 {
            let mut bb = 0u64;
            let mut cursor = sq;
            while let Some(next) = step_target(cursor, file_delta, rank_delta) {
                bb |= 1u64 << next;
                cursor = next;
            }
            rays[direction][sq] = Bitboard(bb);
            sq += 1;
        }
        direction += 1;
    }
    rays
}

const fn compute_between() -> [[Bitboard; 64]; 64] {
    let mut between = [[Bitboard::EMPTY; 64]; 64];
    let mut sq = 0;
    while sq < 64 {
        let mut direction = 0;
        while direction < 8 {
            let (file_delta, rank_delta) = direction_step(direction);
            let mut segment = 0u64;
            let mut cursor = sq;
            while let Some(next) = step_target(cursor, file_delta, rank_delta) {
                between[sq][next] = Bitboard(segment);
                segment |= 1u64 << next;
                cursor = next;
            }
            direction += 1;
        }
        sq += 1;
    }
    between
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn knight_attack_counts() {
        assert_eq!(knight_attacks(sq("d4")).count(), 8);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(knight_attacks(sq("a4")).count(), 4);
    }

    #[test]
    fn knight_specific_squares() {
        let attacks = knight_attacks(sq("e4"));
        for target in ["d6", "f6", "g5", "g3", "f2", "d2", "c3", "c5"] {
            assert!(attacks.contains(sq(target)), "e4 knight misses {}", target);
        }
    }

    #[test]
    fn king_attack_counts() {
        assert_eq!(king_attacks(sq("d4")).count(), 8);
        assert_eq!(king_attacks(Square::A1).count(), 3);
        assert_eq!(king_attacks(sq("a4")).count(), 5);
    }

    #[test]
    fn pawn_attack_directions() {
        let white = pawn_attacks(sq("d4"), Color::White);
        assert_eq!(white.count(), 2);
        assert!(white.contains(sq("c5")));
        assert!(white.contains(sq("e5")));

        let black = pawn_attacks(sq("d4"), Color::Black);
        assert_eq!(black.count(), 2);
        assert!(black.contains(sq("c3")));
        assert!(black.contains(sq("e3")));

        // Edge-file pawns attack only one square.
        assert_eq!(pawn_attacks(sq("a4"), Color::White).count(), 1);
        assert_eq!(pawn_attacks(sq("h4"), Color::Black).count(), 1);
    }

    #[test]
    fn rook_attacks_empty_board() {
        let attacks = rook_attacks(sq("d4"), Bitboard::EMPTY);
        assert_eq!(attacks.count(), 14);
        assert!(attacks.contains(sq("d8")));
        assert!(attacks.contains(sq("d1")));
        assert!(attacks.contains(sq("a4")));
        assert!(attacks.contains(sq("h4")));
        assert!(!attacks.contains(sq("e5")));
    }

    #[test]
    fn rook_attacks_blocked() {
        // Blocker on d6: d7 and d8 are shadowed, d6 itself is attackable.
        let occupied = Bitboard::from_square(sq("d6"));
        let attacks = rook_attacks(sq("d4"), occupied);
        assert!(attacks.contains(sq("d5")));
        assert!(attacks.contains(sq("d6")));
        assert!(!attacks.contains(sq("d7")));
        assert!(!attacks.contains(sq("d8")));
    }

    #[test]
    fn rook_attacks_blocked_negative_ray() {
        let occupied = Bitboard::from_square(sq("d2"));
        let attacks = rook_attacks(sq("d4"), occupied);
        assert!(attacks.contains(sq("d3")));
        assert!(attacks.contains(sq("d2")));
        assert!(!attacks.contains(sq("d1")));
    }

    #[test]
    fn bishop_attacks_blocked() {
        let occupied = Bitboard::from_square(sq("f6"));
        let attacks = bishop_attacks(sq("d4"), occupied);
        assert!(attacks.contains(sq("e5")));
        assert!(attacks.contains(sq("f6")));
        assert!(!attacks.contains(sq("g7")));
        assert!(attacks.contains(sq("a1")));
        assert!(attacks.contains(sq("a7")));
        assert!(attacks.contains(sq("g1")));
    }

    #[test]
    fn queen_attacks_union() {
        let occupied = Bitboard::EMPTY;
        let queen = queen_attacks(sq("d4"), occupied);
        assert_eq!(
            queen,
            rook_attacks(sq("d4"), occupied) | bishop_attacks(sq("d4"), occupied)
        );
        assert_eq!(queen.count(), 27);
    }

    #[test]
    fn between_aligned() {
        let segment = between(sq("a1"), sq("d4"));
        assert_eq!(segment.count(), 2);
        assert!(segment.contains(sq("b2")));
        assert!(segment.contains(sq("c3")));

        let file_segment = between(sq("e1"), sq("e8"));
        assert_eq!(file_segment.count(), 6);
        assert!(file_segment.contains(sq("e4")));
    }

    #[test]
    fn between_symmetric() {
        assert_eq!(between(sq("a1"), sq("h8")), between(sq("h8"), sq("a1")));
    }

    #[test]
    fn between_unaligned_or_adjacent() {
        assert!(between(sq("a1"), sq("b3")).is_empty());
        assert!(between(sq("a1"), sq("a2")).is_empty());
        assert!(between(Square::new(File::C, Rank::R2), sq("d4")).is_empty());
    }
}
