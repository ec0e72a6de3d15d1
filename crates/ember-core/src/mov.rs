//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// The closed set of interpretations a move can carry.
///
/// Capture status is part of the kind, so the board never has to inspect
/// the destination square to know whether a piece comes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain non-capturing move.
    Quiet,
    /// Capture of the piece on the destination square.
    Capture,
    /// Pawn double push from its starting rank.
    DoublePush,
    /// En passant capture; the captured pawn is not on the destination.
    EnPassant,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// Non-capturing pawn promotion to the given piece.
    Promotion(Piece),
    /// Capturing pawn promotion to the given piece.
    PromotionCapture(Piece),
}

/// A chess move: source square, destination square, and kind.
///
/// Equality and hashing cover the full logical content of the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Creates a quiet (non-capturing) move.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::Quiet)
    }

    /// Creates a capture.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::Capture)
    }

    /// Creates a pawn double push.
    #[inline]
    pub const fn double_push(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::DoublePush)
    }

    /// Creates an en passant capture.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::EnPassant)
    }

    /// Creates a kingside castling move (king's from/to squares).
    #[inline]
    pub const fn kingside_castle(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::CastleKingside)
    }

    /// Creates a queenside castling move (king's from/to squares).
    #[inline]
    pub const fn queenside_castle(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::CastleQueenside)
    }

    /// Creates a non-capturing promotion.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: Piece) -> Self {
        Move::new(from, to, MoveKind::Promotion(piece))
    }

    /// Creates a capturing promotion.
    #[inline]
    pub const fn promotion_capture(from: Square, to: Square, piece: Piece) -> Self {
        Move::new(from, to, MoveKind::PromotionCapture(piece))
    }

    /// The null move: a quiet move with both endpoints on a1.
    ///
    /// Passes the turn without touching any piece.
    #[inline]
    pub const fn null() -> Self {
        Move::quiet(Square::A1, Square::A1)
    }

    /// Returns the source square.
    #[inline]
    pub const fn source(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn destination(self) -> Square {
        self.to
    }

    /// Returns the kind of this move.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns true if this is the null move.
    #[inline]
    pub fn is_null(self) -> bool {
        self == Move::null()
    }

    /// Returns true if a piece is captured by this move.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture(_)
        )
    }

    /// Returns true if this is an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns true if this is a pawn double push.
    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePush)
    }

    /// Returns true if this is a castling move (either side).
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingside | MoveKind::CastleQueenside
        )
    }

    /// Returns true if this is a kingside castling move.
    #[inline]
    pub const fn is_kingside_castle(self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside)
    }

    /// Returns true if this is a promotion (capturing or not).
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(
            self.kind,
            MoveKind::Promotion(_) | MoveKind::PromotionCapture(_)
        )
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion(piece) | MoveKind::PromotionCapture(piece) => Some(piece),
            _ => None,
        }
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.promotion_piece() {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses UCI coordinate notation into a bare move.
    ///
    /// The text carries no capture or castling information, so the result is
    /// a `Quiet` or `Promotion` move; resolve it against a position's move
    /// set to recover the real kind.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s.as_bytes().get(4) {
            None => Some(Move::quiet(from, to)),
            Some(b'n') => Some(Move::promotion(from, to, Piece::Knight)),
            Some(b'b') => Some(Move::promotion(from, to, Piece::Bishop)),
            Some(b'r') => Some(Move::promotion(from, to, Piece::Rook)),
            Some(b'q') => Some(Move::promotion(from, to, Piece::Queen)),
            Some(_) => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_accessors() {
        let m = Move::capture(Square::E1, Square::E8);
        assert_eq!(m.source(), Square::E1);
        assert_eq!(m.destination(), Square::E8);
        assert_eq!(m.kind(), MoveKind::Capture);
        assert!(m.is_capture());
        assert!(!m.is_promotion());
    }

    #[test]
    fn null_move() {
        let null = Move::null();
        assert!(null.is_null());
        assert_eq!(null.source(), Square::A1);
        assert_eq!(null.destination(), Square::A1);
        assert!(!Move::quiet(Square::A1, Square::B1).is_null());
        // A quiet a1-a1 from any other constructor is still the null move.
        assert!(Move::quiet(Square::A1, Square::A1).is_null());
    }

    #[test]
    fn promotion_piece() {
        let promo = Move::promotion(Square::from_algebraic("e7").unwrap(), Square::E8, Piece::Queen);
        assert_eq!(promo.promotion_piece(), Some(Piece::Queen));
        assert!(promo.is_promotion());
        assert!(!promo.is_capture());

        let promo_capture = Move::promotion_capture(
            Square::from_algebraic("e7").unwrap(),
            Square::D8,
            Piece::Knight,
        );
        assert_eq!(promo_capture.promotion_piece(), Some(Piece::Knight));
        assert!(promo_capture.is_capture());
    }

    #[test]
    fn castle_kinds() {
        let kingside = Move::kingside_castle(Square::E1, Square::G1);
        let queenside = Move::queenside_castle(Square::E1, Square::C1);
        assert!(kingside.is_castle());
        assert!(kingside.is_kingside_castle());
        assert!(queenside.is_castle());
        assert!(!queenside.is_kingside_castle());
    }

    #[test]
    fn uci_notation() {
        let e2 = Square::from_algebraic("e2").unwrap();
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(Move::quiet(e2, e4).to_uci(), "e2e4");

        let e7 = Square::from_algebraic("e7").unwrap();
        assert_eq!(Move::promotion(e7, Square::E8, Piece::Queen).to_uci(), "e7e8q");
    }

    #[test]
    fn parse_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.source(), Square::from_algebraic("e2").unwrap());
        assert_eq!(m.destination(), Square::from_algebraic("e4").unwrap());
        assert_eq!(m.kind(), MoveKind::Quiet);

        let promo = Move::from_uci("a7a8n").unwrap();
        assert_eq!(promo.promotion_piece(), Some(Piece::Knight));

        assert_eq!(Move::from_uci("e2"), None);
        assert_eq!(Move::from_uci("e2e4x"), None);
        assert_eq!(Move::from_uci("z9e4"), None);
    }

    #[test]
    fn equality_covers_kind() {
        let quiet = Move::quiet(Square::E1, Square::G1);
        let castle = Move::kingside_castle(Square::E1, Square::G1);
        assert_ne!(quiet, castle);
    }
}
