//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the chess board, stored as its index (a1=0, b1=1, ..., h8=63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    /// Create a square from rank and file (both 0-7), if in range.
    #[must_use]
    pub const fn from_coords(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Create a square from an index already known to be below 64.
    ///
    /// Only the low six bits are used.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square((idx & 63) as u8)
    }

    /// Get the square's index (0-63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 >> 3) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 & 7) as usize
    }

    /// Flip the square vertically (e.g., a1 <-> a8)
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Whether the square is a light square (h1 is light).
    #[inline]
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<usize> for Square {
    type Error = SquareError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < 64 {
            Ok(Square(index as u8))
        } else {
            Err(SquareError::IndexOutOfBounds { index })
        }
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0] {
            b'a'..=b'h' => (bytes[0] - b'a') as usize,
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => (bytes[1] - b'1') as usize,
            _ => return Err(invalid()),
        };
        Square::from_coords(rank, file).ok_or_else(invalid)
    }
}
