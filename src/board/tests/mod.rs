//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `movegen.rs` - Check, pin, en passant and castling classification
//! - `proptest.rs` - Property-based tests
//! - `search.rs` - Alpha-beta, quiescence and cancellation

mod perft;
mod search;
