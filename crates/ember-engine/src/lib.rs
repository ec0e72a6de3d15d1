//! Bitboard chess engine core.
//!
//! This crate provides the board state machine and everything needed to
//! traverse the game tree:
//! - [`Bitboard`] and precomputed attack geometry
//! - [`Position`] with in-place make/unmake and an incremental Zobrist hash
//! - Pseudolegal move generation and non-mutating legality analysis
//! - [`perft`](crate::perft::perft) for validating the whole pipeline
//! - Static pawn-structure [`analysis`]

pub mod analysis;
pub mod attacks;
mod bitboard;
mod movegen;
pub mod perft;
mod position;
pub mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use movegen::{generate_pseudolegal, MoveList};
pub use position::{CastlingRights, Position};
