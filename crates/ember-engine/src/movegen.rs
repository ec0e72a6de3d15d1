//! Pseudolegal move generation.
//!
//! Generated moves respect piece movement, occupancy, and castling
//! preconditions, but may still leave the mover's king attacked; pair with
//! [`Position::is_legal_given_pseudolegal`] or [`Position::legal_moves`] for
//! full legality.

use crate::{attacks, Bitboard, Position};
use ember_core::{Color, Move, Piece, Rank, Square};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so a fixed-size array
/// avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::null(); Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Generates all pseudolegal moves for the side to move.
pub fn generate_pseudolegal(position: &Position) -> MoveList {
    let mut moves = MoveList::new();

    pawn_moves(position, &mut moves);
    knight_moves(position, &mut moves);
    slider_moves(position, Piece::Bishop, &mut moves);
    slider_moves(position, Piece::Rook, &mut moves);
    slider_moves(position, Piece::Queen, &mut moves);
    king_moves(position, &mut moves);
    castle_moves(position, &mut moves);

    moves
}

/// The square one rank forward from `color`'s point of view.
fn advance(sq: Square, color: Color) -> Option<Square> {
    let index = match color {
        Color::White => sq.index() as i16 + 8,
        Color::Black => sq.index() as i16 - 8,
    };
    if (0..64).contains(&index) {
        Square::from_index(index as u8)
    } else {
        None
    }
}

fn pawn_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let them = us.opposite();
    let occupied = position.occupied();
    let theirs = position.pieces(them);

    let (start_rank, promotion_rank) = match us {
        Color::White => (Rank::R2, Rank::R8),
        Color::Black => (Rank::R7, Rank::R1),
    };

    for from in position.pieces_of(Piece::Pawn, us) {
        // Pushes.
        if let Some(to) = advance(from, us) {
            if !occupied.contains(to) {
                if to.rank() == promotion_rank {
                    for piece in PROMOTION_PIECES {
                        moves.push(Move::promotion(from, to, piece));
                    }
                } else {
                    moves.push(Move::quiet(from, to));
                    if from.rank() == start_rank {
                        if let Some(two) = advance(to, us) {
                            if !occupied.contains(two) {
                                moves.push(Move::double_push(from, two));
                            }
                        }
                    }
                }
            }
        }

        // Captures.
        let reach = attacks::pawn_attacks(from, us);
        for to in reach & theirs {
            if to.rank() == promotion_rank {
                for piece in PROMOTION_PIECES {
                    moves.push(Move::promotion_capture(from, to, piece));
                }
            } else {
                moves.push(Move::capture(from, to));
            }
        }

        if let Some(ep) = position.en_passant() {
            if reach.contains(ep) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}

fn knight_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let ours = position.pieces(us);
    let theirs = position.pieces(us.opposite());

    for from in position.pieces_of(Piece::Knight, us) {
        push_steps(moves, from, attacks::knight_attacks(from) & !ours, theirs);
    }
}

fn slider_moves(position: &Position, piece: Piece, moves: &mut MoveList) {
    let us = position.side_to_move();
    let occupied = position.occupied();
    let ours = position.pieces(us);
    let theirs = position.pieces(us.opposite());

    for from in position.pieces_of(piece, us) {
        let reach = match piece {
            Piece::Bishop => attacks::bishop_attacks(from, occupied),
            Piece::Rook => attacks::rook_attacks(from, occupied),
            _ => attacks::queen_attacks(from, occupied),
        };
        push_steps(moves, from, reach & !ours, theirs);
    }
}

fn king_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let ours = position.pieces(us);
    let theirs = position.pieces(us.opposite());

    for from in position.pieces_of(Piece::King, us) {
        push_steps(moves, from, attacks::king_attacks(from) & !ours, theirs);
    }
}

fn push_steps(moves: &mut MoveList, from: Square, targets: Bitboard, theirs: Bitboard) {
    for to in targets {
        if theirs.contains(to) {
            moves.push(Move::capture(from, to));
        } else {
            moves.push(Move::quiet(from, to));
        }
    }
}

/// Castling preconditions checked here: the right is still held, the king
/// sits on its home square, the rook is physically on its corner (rights are
/// not cleared when a rook is captured, so this is load-bearing), the squares
/// between king and rook are empty, the king is not in check, and neither
/// square the king crosses is attacked.
fn castle_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let them = us.opposite();
    let occupied = position.occupied();

    let (king_home, kingside_rook, queenside_rook) = match us {
        Color::White => (Square::E1, Square::H1, Square::A1),
        Color::Black => (Square::E8, Square::H8, Square::A8),
    };

    if !position.pieces_of(Piece::King, us).contains(king_home) {
        return;
    }
    if position
        .squares_attacking(them, king_home)
        .is_not_empty()
    {
        return;
    }

    let rooks = position.pieces_of(Piece::Rook, us);

    if position.castling().can_castle_kingside(us) && rooks.contains(kingside_rook) {
        let (f, g) = match us {
            Color::White => (Square::F1, Square::G1),
            Color::Black => (Square::F8, Square::G8),
        };
        if !occupied.contains(f)
            && !occupied.contains(g)
            && position.squares_attacking(them, f).is_empty()
            && position.squares_attacking(them, g).is_empty()
        {
            moves.push(Move::kingside_castle(king_home, g));
        }
    }

    if position.castling().can_castle_queenside(us) && rooks.contains(queenside_rook) {
        let (b, c, d) = match us {
            Color::White => (Square::B1, Square::C1, Square::D1),
            Color::Black => (Square::B8, Square::C8, Square::D8),
        };
        // b-file must be empty for the rook, but the king only crosses d and c.
        if !occupied.contains(b)
            && !occupied.contains(c)
            && !occupied.contains(d)
            && position.squares_attacking(them, d).is_empty()
            && position.squares_attacking(them, c).is_empty()
        {
            moves.push(Move::queenside_castle(king_home, c));
        }
    }
}
