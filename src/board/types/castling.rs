//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_K: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Castling rights as a 4-bit mask (WQ, WK, BQ, BK from the low bit up).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Remove both rights of one color
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(Self::bit_for(color, true) | Self::bit_for(color, false));
    }

    /// Remove the right tied to a rook home square, if `sq` is one.
    #[inline]
    pub fn remove_rook_square(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.0 &= !CASTLE_WHITE_Q,
            Square::H1 => self.0 &= !CASTLE_WHITE_K,
            Square::A8 => self.0 &= !CASTLE_BLACK_Q,
            Square::H8 => self.0 &= !CASTLE_BLACK_K,
            _ => {}
        }
    }

    /// Raw nibble (0-15), used to index the Zobrist castling keys
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

impl fmt::Display for CastlingRights {
    /// FEN castling field (`KQkq` order, `-` when empty).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// King and rook squares of a castling move: (king_from, king_to, rook_from, rook_to).
#[inline]
#[must_use]
pub const fn castle_squares(color: Color, kingside: bool) -> (Square, Square, Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::E1, Square::G1, Square::H1, Square::F1),
        (Color::White, false) => (Square::E1, Square::C1, Square::A1, Square::D1),
        (Color::Black, true) => (Square::E8, Square::G8, Square::H8, Square::F8),
        (Color::Black, false) => (Square::E8, Square::C8, Square::A8, Square::D8),
    }
}
