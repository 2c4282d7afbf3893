//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowercase FEN letters, indexed by `Piece::index`.
const PIECE_CHARS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];

/// Ordering values in centipawns; the king sorts as the least attractive attacker.
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// FEN letter of either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let lower = c.to_ascii_lowercase();
        PIECE_CHARS
            .iter()
            .position(|&p| p == lower)
            .map(|i| Piece::ALL[i])
    }

    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        PIECE_CHARS[self.index()]
    }

    /// FEN letter, uppercase for White.
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.to_char().to_ascii_uppercase(),
            Color::Black => self.to_char(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        PIECE_VALUES[self.index()]
    }
}

/// Promotion choices, strongest first.
pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        1 - 2 * (self as i32)
    }

    #[inline]
    #[must_use]
    pub const fn pawn_start_rank(self) -> usize {
        [1, 6][self.index()]
    }

    #[inline]
    #[must_use]
    pub const fn pawn_promotion_rank(self) -> usize {
        [7, 0][self.index()]
    }

    /// Rank of a legal en-passant target square when this color is to move.
    #[inline]
    #[must_use]
    pub const fn en_passant_target_rank(self) -> usize {
        [5, 2][self.index()]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}
