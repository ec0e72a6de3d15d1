//! Zobrist hashing for position identification.
//!
//! Each position maps to a 64-bit fingerprint built by XORing fixed random
//! keys for:
//! - Each piece on each square (2 colors x 6 pieces x 64 squares)
//! - Black to move
//! - Each of the four castling rights
//! - The en passant target file (8 values)
//!
//! XOR is its own inverse, so the same toggle functions apply and remove a
//! feature, which is what makes incremental maintenance during make/unmake
//! cheap.

use crate::Position;
use ember_core::{Color, Piece, Square};

/// Zobrist key tables, generated from a fixed seed for reproducibility.
struct ZobristKeys {
    /// Keys for pieces: [color][piece][square]
    pieces: [[[u64; 64]; 6]; 2],
    /// Key applied when Black is to move.
    black_to_move: u64,
    /// Keys for castling rights: WK, WQ, BK, BQ.
    castling: [u64; 4],
    /// Keys for the en passant target file.
    en_passant: [u64; 8],
}

impl ZobristKeys {
    const fn new(seed: u64) -> Self {
        // xorshift64; good enough key quality for hashing, and usable in
        // const evaluation.
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = seed;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[color][piece][square] = state;
                    square += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }
}

static KEYS: ZobristKeys = ZobristKeys::new(0xf68e_34a4_e8cc_f09a);

/// Computes the fingerprint of a position from scratch.
///
/// `Position` maintains its hash incrementally; this exists for initial
/// setup and as the reference the incremental value is checked against.
pub fn hash(position: &Position) -> u64 {
    let mut h = 0u64;
    for color in [Color::White, Color::Black] {
        for piece in Piece::ALL {
            for sq in position.pieces_of(piece, color) {
                toggle_piece(&mut h, piece, color, sq);
            }
        }
    }
    if position.side_to_move() == Color::Black {
        h ^= KEYS.black_to_move;
    }
    let castling = position.castling();
    for color in [Color::White, Color::Black] {
        if castling.can_castle_kingside(color) {
            toggle_kingside_castle(&mut h, color);
        }
        if castling.can_castle_queenside(color) {
            toggle_queenside_castle(&mut h, color);
        }
    }
    toggle_en_passant(&mut h, None, position.en_passant());
    h
}

/// Toggles a piece on a square in and out of the fingerprint.
#[inline]
pub fn toggle_piece(hash: &mut u64, piece: Piece, color: Color, sq: Square) {
    *hash ^= KEYS.pieces[color.index()][piece.index()][sq.index() as usize];
}

/// Toggles the side to move.
#[inline]
pub fn toggle_side(hash: &mut u64) {
    *hash ^= KEYS.black_to_move;
}

/// Toggles a kingside castling right.
#[inline]
pub fn toggle_kingside_castle(hash: &mut u64, color: Color) {
    *hash ^= KEYS.castling[2 * color.index()];
}

/// Toggles a queenside castling right.
#[inline]
pub fn toggle_queenside_castle(hash: &mut u64, color: Color) {
    *hash ^= KEYS.castling[2 * color.index() + 1];
}

/// Replaces one en passant target with another in the fingerprint.
///
/// Only the file is keyed; `None` contributes nothing.
#[inline]
pub fn toggle_en_passant(hash: &mut u64, old: Option<Square>, new: Option<Square>) {
    if let Some(sq) = old {
        *hash ^= KEYS.en_passant[sq.file().index() as usize];
    }
    if let Some(sq) = new {
        *hash ^= KEYS.en_passant[sq.file().index() as usize];
    }
}
