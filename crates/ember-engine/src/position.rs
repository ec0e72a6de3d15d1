//! Chess position representation and the make/unmake state machine.

use std::fmt;

use ember_core::{Color, FenError, FenParser, Move, Piece, Square};

use crate::movegen::{self, MoveList};
use crate::{attacks, zobrist, Bitboard};

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The irreversible portion of position state.
///
/// Everything a move can destroy without being able to rebuild it: the
/// captured piece, the prior en passant target, both clocks, the castling
/// rights, and the position fingerprint. One snapshot per applied move lives
/// on the undo log; `unmake_move` restores these fields verbatim instead of
/// trying to invert them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct State {
    /// The move this state was produced by, if any.
    applied: Option<Move>,
    /// Piece kind captured by the applied move.
    captured: Option<Piece>,
    /// En passant target square, if the previous move was a double push.
    en_passant: Option<Square>,
    /// Halfmove clock for the 50-move rule.
    halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    fullmove_number: u32,
    /// Castling rights.
    castling: CastlingRights,
    /// Zobrist fingerprint of the position.
    hash: u64,
}

impl State {
    fn initial() -> Self {
        State {
            applied: None,
            captured: None,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            castling: CastlingRights::NONE,
            hash: 0,
        }
    }
}

/// Complete chess position state.
///
/// Moves are applied in place; `make_move` pushes an irreversible-state
/// snapshot onto an internal undo log and `unmake_move` pops it, so a long
/// search mutates one board instead of copying it per node.
///
/// `Position` deliberately does not implement `Clone`. The undo log and the
/// incrementally maintained hash belong to exactly one board, so duplication
/// has to be the explicit [`Position::deep_clone`].
#[derive(Debug, PartialEq, Eq)]
pub struct Position {
    /// Piece bitboards, indexed [color][piece]. Pairwise disjoint.
    boards: [[Bitboard; 6]; 2],
    /// Union of each color's piece boards.
    by_color: [Bitboard; 2],
    /// The side to move.
    side_to_move: Color,
    /// Irreversible state after the last applied move.
    state: State,
    /// Undo log, one snapshot per applied move.
    history: Vec<State>,
}

impl Position {
    /// Creates an empty position (no pieces, White to move).
    pub fn empty() -> Self {
        Position {
            boards: [[Bitboard::EMPTY; 6]; 2],
            by_color: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            state: State::initial(),
            history: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        let ranks: Vec<&str> = parsed.piece_placement.split('/').collect();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx; // FEN starts from rank 8
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    let sq = unsafe { Square::from_index_unchecked((rank * 8 + file) as u8) };
                    position.add_piece(sq, piece, color);
                    file += 1;
                }
            }
        }

        position.side_to_move = match parsed.active_color {
            'w' => Color::White,
            'b' => Color::Black,
            _ => unreachable!("FEN parser validated this"),
        };

        let mut castling = 0u8;
        for c in parsed.castling.chars() {
            match c {
                'K' => castling |= CastlingRights::WHITE_KINGSIDE,
                'Q' => castling |= CastlingRights::WHITE_QUEENSIDE,
                'k' => castling |= CastlingRights::BLACK_KINGSIDE,
                'q' => castling |= CastlingRights::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        position.state.castling = CastlingRights::new(castling);

        position.state.en_passant = if parsed.en_passant == "-" {
            None
        } else {
            Square::from_algebraic(&parsed.en_passant)
        };

        position.state.halfmove_clock = parsed.halfmove_clock;
        position.state.fullmove_number = parsed.fullmove_number;

        // The add_piece calls above accumulated only piece keys; finish with
        // the full fingerprint now that every field is in place.
        position.state.hash = zobrist::hash(&position);

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let sq = unsafe { Square::from_index_unchecked(rank * 8 + file) };
                if let Some((piece, color)) = self.piece_at(sq) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.state.castling.raw() == 0 {
            fen.push('-');
        } else {
            if self.state.castling.can_castle_kingside(Color::White) {
                fen.push('K');
            }
            if self.state.castling.can_castle_queenside(Color::White) {
                fen.push('Q');
            }
            if self.state.castling.can_castle_kingside(Color::Black) {
                fen.push('k');
            }
            if self.state.castling.can_castle_queenside(Color::Black) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.state.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.state.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.state.fullmove_number.to_string());

        fen
    }

    /// Explicit deep copy, including the undo log.
    pub fn deep_clone(&self) -> Position {
        Position {
            boards: self.boards,
            by_color: self.by_color,
            side_to_move: self.side_to_move,
            state: self.state.clone(),
            history: self.history.clone(),
        }
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.state.castling
    }

    /// Returns the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.state.en_passant
    }

    /// Returns the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.state.halfmove_clock
    }

    /// Returns the fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.state.fullmove_number
    }

    /// Returns the incrementally maintained Zobrist fingerprint.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.state.hash
    }

    /// Returns the last applied move still on the undo log.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.state.applied
    }

    /// Returns the number of applied moves that can be unmade.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.boards[color.index()][piece.index()]
    }

    /// Returns a bitboard of all pieces of the given color.
    #[inline]
    pub fn pieces(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    /// Returns the piece and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = if self.by_color[Color::White.index()].contains(sq) {
            Color::White
        } else if self.by_color[Color::Black.index()].contains(sq) {
            Color::Black
        } else {
            return None;
        };

        for piece in Piece::ALL {
            if self.boards[color.index()][piece.index()].contains(sq) {
                return Some((piece, color));
            }
        }

        None
    }

    /// Returns the square of the given color's king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color).first_square()
    }

    /// Places a piece on an empty square, updating the hash.
    ///
    /// Panics if the square is occupied.
    pub fn add_piece(&mut self, sq: Square, piece: Piece, color: Color) {
        assert!(
            !self.occupied().contains(sq),
            "add_piece: {} is already occupied",
            sq
        );
        self.boards[color.index()][piece.index()].set(sq);
        self.by_color[color.index()].set(sq);
        zobrist::toggle_piece(&mut self.state.hash, piece, color, sq);
    }

    /// Removes the piece on a square, updating the hash.
    ///
    /// Panics if the square is empty.
    pub fn remove_piece(&mut self, sq: Square) -> (Piece, Color) {
        let (piece, color) = match self.piece_at(sq) {
            Some(found) => found,
            None => panic!("remove_piece: {} is empty", sq),
        };
        self.boards[color.index()][piece.index()].clear(sq);
        self.by_color[color.index()].clear(sq);
        zobrist::toggle_piece(&mut self.state.hash, piece, color, sq);
        (piece, color)
    }

    /// Applies a move in place.
    ///
    /// The move must come from this position's pseudolegal move set (or be
    /// the null move); feeding anything else corrupts the board. Legality in
    /// the check sense is not verified here.
    pub fn make_move(&mut self, mov: Move) {
        let us = self.side_to_move;
        let them = us.opposite();

        // Snapshot before anything changes; the captured slot is filled in
        // once the capture target is known.
        self.history.push(self.state.clone());
        self.state.applied = Some(mov);
        self.state.captured = None;

        if mov.is_null() {
            zobrist::toggle_en_passant(&mut self.state.hash, self.state.en_passant, None);
            self.state.en_passant = None;
            self.state.halfmove_clock += 1;
            if us == Color::Black {
                self.state.fullmove_number += 1;
            }
            self.side_to_move = them;
            zobrist::toggle_side(&mut self.state.hash);
            return;
        }

        let (piece, color) = match self.piece_at(mov.source()) {
            Some(found) => found,
            None => panic!("make_move: no piece on {}", mov.source()),
        };
        assert!(
            color.index() == us.index(),
            "make_move: {} piece moved on {}'s turn",
            color,
            us
        );

        if mov.is_capture() {
            let target = if mov.is_en_passant() {
                let ep = match self.state.en_passant {
                    Some(sq) => sq,
                    None => panic!("make_move: en passant capture with no target set"),
                };
                square_behind(ep, us)
            } else {
                mov.destination()
            };
            let (captured, _) = self.remove_piece(target);
            self.state.captured = Some(captured);
        }

        if mov.is_castle() {
            let (rook_from, rook_to) = rook_castle_squares(us, mov.is_kingside_castle());
            let (rook, rook_color) = self.remove_piece(rook_from);
            assert!(
                rook == Piece::Rook && rook_color == us,
                "make_move: castling without a rook on {}",
                rook_from
            );
            self.add_piece(rook_to, Piece::Rook, us);
        }

        // Move the piece itself, swapping in the promoted kind if needed.
        self.remove_piece(mov.source());
        let placed = mov.promotion_piece().unwrap_or(piece);
        self.add_piece(mov.destination(), placed, us);

        // En passant target: set behind a double push, cleared otherwise.
        let new_ep = if mov.is_double_push() {
            Some(square_behind(mov.destination(), us))
        } else {
            None
        };
        zobrist::toggle_en_passant(&mut self.state.hash, self.state.en_passant, new_ep);
        self.state.en_passant = new_ep;

        // Rights are lost by moving the king or a rook off its corner. A rook
        // captured on its corner does not clear them; castle generation
        // re-checks rook presence instead.
        if piece == Piece::King {
            if self.state.castling.can_castle_kingside(us) {
                zobrist::toggle_kingside_castle(&mut self.state.hash, us);
                self.state.castling.remove_kingside(us);
            }
            if self.state.castling.can_castle_queenside(us) {
                zobrist::toggle_queenside_castle(&mut self.state.hash, us);
                self.state.castling.remove_queenside(us);
            }
        } else if piece == Piece::Rook {
            let (kingside_corner, queenside_corner) = rook_home_corners(us);
            if mov.source() == kingside_corner && self.state.castling.can_castle_kingside(us) {
                zobrist::toggle_kingside_castle(&mut self.state.hash, us);
                self.state.castling.remove_kingside(us);
            }
            if mov.source() == queenside_corner && self.state.castling.can_castle_queenside(us) {
                zobrist::toggle_queenside_castle(&mut self.state.hash, us);
                self.state.castling.remove_queenside(us);
            }
        }

        if mov.is_capture() || piece == Piece::Pawn {
            self.state.halfmove_clock = 0;
        } else {
            self.state.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.state.fullmove_number += 1;
        }
        self.side_to_move = them;
        zobrist::toggle_side(&mut self.state.hash);
    }

    /// Reverts the most recently applied move.
    ///
    /// Panics if no move has been applied.
    pub fn unmake_move(&mut self) {
        let prior = match self.history.pop() {
            Some(state) => state,
            None => panic!("unmake_move: no move to unmake"),
        };
        let mov = match self.state.applied {
            Some(mov) => mov,
            None => panic!("unmake_move: current state has no applied move"),
        };

        // The mover is whichever side is now not to move.
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        self.side_to_move = us;

        if !mov.is_null() {
            // Take the moved piece off its destination; a promotion reverts
            // to the pawn that made it.
            let (placed, _) = self.remove_piece(mov.destination());
            let piece = if mov.is_promotion() {
                Piece::Pawn
            } else {
                placed
            };
            self.add_piece(mov.source(), piece, us);

            if mov.is_capture() {
                let captured = match self.state.captured {
                    Some(piece) => piece,
                    None => panic!("unmake_move: capture recorded without a piece"),
                };
                // An en passant victim sits behind the destination square.
                let target = if mov.is_en_passant() {
                    square_behind(mov.destination(), us)
                } else {
                    mov.destination()
                };
                self.add_piece(target, captured, them);
            }

            if mov.is_castle() {
                let (rook_from, rook_to) = rook_castle_squares(us, mov.is_kingside_castle());
                let (rook, _) = self.remove_piece(rook_to);
                assert!(
                    rook == Piece::Rook,
                    "unmake_move: castled rook missing from {}",
                    rook_to
                );
                self.add_piece(rook_from, Piece::Rook, us);
            }
        }

        // The snapshot restores clocks, rights, en passant, and the exact
        // prior hash. The toggles replayed above only ran to keep add/remove
        // coherent mid-flight; the stored hash overrides them.
        self.state = prior;
    }

    /// Returns a bitboard of the given color's pieces that attack a square.
    pub fn squares_attacking(&self, color: Color, target: Square) -> Bitboard {
        self.attackers_with_occupancy(color, target, self.occupied())
    }

    /// Attack query with an explicit occupancy, so callers can probe with
    /// squares hypothetically vacated.
    fn attackers_with_occupancy(
        &self,
        color: Color,
        target: Square,
        occupied: Bitboard,
    ) -> Bitboard {
        // A pawn of `color` attacks `target` exactly when a pawn of the
        // opposite color on `target` would attack the pawn's square.
        let mut found = attacks::pawn_attacks(target, color.opposite())
            & self.pieces_of(Piece::Pawn, color);
        found |= attacks::knight_attacks(target) & self.pieces_of(Piece::Knight, color);
        found |= attacks::king_attacks(target) & self.pieces_of(Piece::King, color);

        let diagonal = attacks::bishop_attacks(target, occupied);
        found |= diagonal
            & (self.pieces_of(Piece::Bishop, color) | self.pieces_of(Piece::Queen, color));
        let orthogonal = attacks::rook_attacks(target, occupied);
        found |= orthogonal
            & (self.pieces_of(Piece::Rook, color) | self.pieces_of(Piece::Queen, color));

        found
    }

    /// Returns true if any of the given color's kings is attacked.
    pub fn is_check(&self, color: Color) -> bool {
        self.pieces_of(Piece::King, color)
            .into_iter()
            .any(|king| self.squares_attacking(color.opposite(), king).is_not_empty())
    }

    /// Returns true if the piece on `sq` is absolutely pinned by `by`.
    ///
    /// A piece is absolutely pinned when removing it from the board lets some
    /// enemy slider's reach newly cover its own king. Kings themselves and
    /// empty squares are never pinned.
    pub fn is_absolutely_pinned(&self, by: Color, sq: Square) -> bool {
        match self.piece_at(sq) {
            None | Some((Piece::King, _)) => return false,
            Some(_) => {}
        }
        let king = match self.king_square(by.opposite()) {
            Some(king) => king,
            None => return false,
        };

        let occupied = self.occupied();
        let vacated = occupied.without(sq);
        for attacker in self.squares_attacking(by, sq) {
            let kind = match self.piece_at(attacker) {
                Some((kind, _)) => kind,
                None => continue,
            };
            let (before, after) = match kind {
                Piece::Bishop => (
                    attacks::bishop_attacks(attacker, occupied),
                    attacks::bishop_attacks(attacker, vacated),
                ),
                Piece::Rook => (
                    attacks::rook_attacks(attacker, occupied),
                    attacks::rook_attacks(attacker, vacated),
                ),
                Piece::Queen => (
                    attacks::queen_attacks(attacker, occupied),
                    attacks::queen_attacks(attacker, vacated),
                ),
                _ => continue,
            };
            if !before.contains(king) && after.contains(king) {
                return true;
            }
        }
        false
    }

    /// Full legality check: pseudolegal membership plus the check rules.
    pub fn is_legal(&self, mov: Move) -> bool {
        self.pseudolegal_moves().as_slice().contains(&mov) && self.is_legal_given_pseudolegal(mov)
    }

    /// Legality check for a move already known to be pseudolegal.
    ///
    /// Evaluated by case analysis on the current check state instead of
    /// applying the move:
    /// - no check: anything goes except king moves into attacked squares and
    ///   moves that break an absolute pin;
    /// - single check: capture the checker, interpose on a slider's checking
    ///   line, or step the king to safety;
    /// - double check: king moves only.
    ///
    /// King destinations are probed with the king's own square vacated, so
    /// retreating along a checker's ray is caught. Known hole: an en passant
    /// capture empties two squares at once, and a discovered rank attack
    /// through both is not detected.
    pub fn is_legal_given_pseudolegal(&self, mov: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opposite();
        let piece = match self.piece_at(mov.source()) {
            Some((piece, color)) if color == us => piece,
            _ => return false,
        };
        let king = match self.king_square(us) {
            Some(king) => king,
            // No king to expose; everything pseudolegal is fine.
            None => return true,
        };

        if piece == Piece::King {
            if mov.is_castle() && self.squares_attacking(them, king).is_not_empty() {
                return false;
            }
            let vacated = self.occupied().without(mov.source());
            return self
                .attackers_with_occupancy(them, mov.destination(), vacated)
                .is_empty();
        }

        let checkers = self.squares_attacking(them, king);
        match checkers.count() {
            0 => !self.breaks_absolute_pin(mov, king),
            1 => {
                let checker = match checkers.first_square() {
                    Some(sq) => sq,
                    None => return false,
                };
                let capture_target = if mov.is_en_passant() {
                    self.state.en_passant.map(|ep| square_behind(ep, us))
                } else {
                    Some(mov.destination())
                };
                if mov.is_capture() && capture_target == Some(checker) {
                    return !self.breaks_absolute_pin(mov, king);
                }
                let checker_piece = match self.piece_at(checker) {
                    Some((piece, _)) => piece,
                    None => return false,
                };
                if checker_piece.is_slider()
                    && attacks::between(checker, king).contains(mov.destination())
                {
                    return !self.breaks_absolute_pin(mov, king);
                }
                false
            }
            _ => false,
        }
    }

    /// Returns true if moving off `mov.source()` exposes the king to a
    /// slider, and the destination neither captures that slider nor stays on
    /// the segment between it and the king.
    fn breaks_absolute_pin(&self, mov: Move, king: Square) -> bool {
        let them = self.side_to_move.opposite();
        let vacated = self.occupied().without(mov.source());

        for attacker in self.squares_attacking(them, mov.source()) {
            let kind = match self.piece_at(attacker) {
                Some((kind, _)) => kind,
                None => continue,
            };
            let reach = match kind {
                Piece::Bishop => attacks::bishop_attacks(attacker, vacated),
                Piece::Rook => attacks::rook_attacks(attacker, vacated),
                Piece::Queen => attacks::queen_attacks(attacker, vacated),
                _ => continue,
            };
            if !reach.contains(king) {
                continue;
            }
            // Pinned on this line. Capturing the pinner or staying on the
            // segment keeps the king covered.
            if mov.destination() == attacker {
                continue;
            }
            if attacks::between(attacker, king).contains(mov.destination()) {
                continue;
            }
            return true;
        }
        false
    }

    /// Generates all pseudolegal moves for the side to move.
    pub fn pseudolegal_moves(&self) -> MoveList {
        movegen::generate_pseudolegal(self)
    }

    /// Generates all fully legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = self.pseudolegal_moves();
        moves.retain(|&mov| self.is_legal_given_pseudolegal(mov));
        moves
    }

    /// Resolves UCI coordinate text against this position's pseudolegal
    /// moves, recovering the capture/castle/en-passant kind.
    pub fn move_from_uci(&self, text: &str) -> Option<Move> {
        let parsed = Move::from_uci(text)?;
        self.pseudolegal_moves()
            .as_slice()
            .iter()
            .find(|mov| {
                mov.source() == parsed.source()
                    && mov.destination() == parsed.destination()
                    && mov.promotion_piece() == parsed.promotion_piece()
            })
            .copied()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    /// ASCII board diagram, rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = unsafe { Square::from_index_unchecked(rank * 8 + file) };
                match self.piece_at(sq) {
                    Some((piece, color)) => write!(f, "{} ", piece.to_fen_char(color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// The square one rank behind `sq` from `color`'s point of view.
///
/// For a double push destination this is the passed-over square; for an en
/// passant target it is the captured pawn's square.
fn square_behind(sq: Square, color: Color) -> Square {
    let index = match color {
        Color::White => sq.index() as i16 - 8,
        Color::Black => sq.index() as i16 + 8,
    };
    Square::from_index(index as u8).expect("behind-square stays on the board")
}

/// Rook source and destination for a castling move by `color`.
fn rook_castle_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::H1, Square::F1),
        (Color::White, false) => (Square::A1, Square::D1),
        (Color::Black, true) => (Square::H8, Square::F8),
        (Color::Black, false) => (Square::A8, Square::D8),
    }
}

/// Home corners of `color`'s rooks: (kingside, queenside).
fn rook_home_corners(color: Color) -> (Square, Square) {
    match color {
        Color::White => (Square::H1, Square::A1),
        Color::Black => (Square::H8, Square::A8),
    }
}
