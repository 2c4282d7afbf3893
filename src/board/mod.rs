//! Chess board representation and game logic.
//!
//! Uses bitboards plus a square-indexed mailbox for move generation and evaluation.
//! Supports full chess rules including castling, en passant, promotions and draw rules.
//!
//! # Example
//! ```
//! use chess_core::board::{Color, Position};
//!
//! let mut pos = Position::new();
//! let moves = pos.generate_moves();
//! assert_eq!(moves.len(), 20);
//! let e4 = pos.parse_move("e2e4").unwrap();
//! pos.make_move(e4);
//! assert_eq!(pos.side_to_move(), Color::Black);
//! pos.unmake_move(e4);
//! assert_eq!(pos, Position::new());
//! ```

mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
mod perft;
mod placement;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use attack_tables::init_tables;
pub use error::{FenError, MoveParseError, ReplayError, SquareError};
pub use fen::{FenRecord, MAX_FEN_CLOCK, START_FEN};
pub use movegen::{GenState, GenType};
pub use placement::Placement;
pub use state::{DrawReason, GameStatus, Position};
pub use types::{
    castle_squares, Bitboard, BitboardIter, CastlingRights, Color, Move, MoveKind, MoveList,
    MoveListIntoIter, Piece, Square, PROMOTION_PIECES,
};

// Public API - search functions and configuration
pub use search::{
    find_best_move, find_best_move_with_time, search, SearchConfig, SearchInfoCallback,
    SearchIterationInfo, SearchParams, SearchResult, SearchState, SearchStats, DEFAULT_TT_MB,
};
