//! Core chess types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - compact board square index (u8, a1=0)
//! - `Bitboard` - 64-bit square set
//! - `Move` and `MoveList` - packed 16-bit moves
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::{castle_squares, CastlingRights};
pub use moves::{Move, MoveKind, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece, PROMOTION_PIECES};
pub use square::Square;

pub(crate) use moves::ScoredMoveList;
