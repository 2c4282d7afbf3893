//! Error types for position loading and move input.

use std::fmt;

use crate::board::types::Color;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in placement field
    InvalidPiece { char: char },
    /// Placement field does not describe exactly 8 ranks
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    WrongFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square, or one on the wrong rank for the side to move
    InvalidEnPassant { found: String },
    /// Halfmove clock is not a number
    InvalidHalfmoveClock { found: String },
    /// Fullmove number is not a positive number
    InvalidFullmoveNumber { found: String },
    /// A side has no king, or more than one
    KingCount { color: Color, found: u32 },
    /// A pawn stands on the first or eighth rank
    PawnOnBackRank { square: String },
    /// The side not to move is in check
    OpponentInCheck { color: Color },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "Invalid halfmove clock '{found}'")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "Invalid fullmove number '{found}'")
            }
            FenError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            FenError::PawnOnBackRank { square } => {
                write!(f, "Pawn on back rank square {square}")
            }
            FenError::OpponentInCheck { color } => {
                write!(f, "{color} is in check but it is not {color}'s turn")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Index out of bounds (must be 0-63)
    IndexOutOfBounds { index: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::IndexOutOfBounds { index } => {
                write!(f, "Square index {index} out of bounds (must be 0-63)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// A stored move sequence could not be replayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The move at `ply` (0-based) is not legal in the position reached so far
    IllegalMove { ply: usize, raw: u16 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::IllegalMove { ply, raw } => {
                write!(f, "Move {raw:#06x} at ply {ply} is not legal")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_too_few_parts() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_fen_error_king_count() {
        let err = FenError::KingCount {
            color: Color::Black,
            found: 0,
        };
        assert_eq!(err.to_string(), "Black must have exactly one king, found 0");
    }

    #[test]
    fn test_fen_error_equality() {
        assert_eq!(
            FenError::WrongFileCount { rank: 8, files: 9 },
            FenError::WrongFileCount { rank: 8, files: 9 }
        );
        assert_ne!(
            FenError::InvalidCastling { char: 'x' },
            FenError::InvalidCastling { char: 'y' }
        );
    }

    #[test]
    fn test_move_parse_error_display() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
        let err = MoveParseError::InvalidLength { len: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_square_error_display() {
        let err = SquareError::IndexOutOfBounds { index: 70 };
        assert!(err.to_string().contains("70"));
    }

    #[test]
    fn test_replay_error_display() {
        let err = ReplayError::IllegalMove { ply: 3, raw: 0x1234 };
        assert_eq!(err.to_string(), "Move 0x1234 at ply 3 is not legal");
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&FenError::TooFewParts { found: 1 });
        assert_error(&MoveParseError::InvalidLength { len: 0 });
        assert_error(&SquareError::InvalidNotation {
            notation: String::new(),
        });
        assert_error(&ReplayError::IllegalMove { ply: 0, raw: 0 });
    }
}
