//! Chess engine core: bitboard positions, legal move generation, make/unmake with incremental
//! Zobrist hashing, a transposition table and an iterative-deepening alpha-beta search.

pub mod board;
pub mod book;
pub mod engine;
pub mod tt;
pub mod zobrist;

pub use board::{Color, Move, Piece, Position, Square};
pub use book::{MemoryBook, OpeningBook};
pub use engine::{EngineController, SearchJob};
pub use tt::TranspositionTable;

/// Build every precomputed table up front instead of on first use.
pub fn init() {
    board::init_tables();
    zobrist::init_keys();
}
