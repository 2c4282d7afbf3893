//! Opening book lookup.
//!
//! A book maps a position's Zobrist hash to a move. How books are stored is up to the
//! implementation; the engine only asks for a move before it starts searching.

use std::collections::HashMap;

use crate::board::{Move, MoveParseError, Position};

/// Source of prepared moves, keyed by position hash.
pub trait OpeningBook: Send + Sync {
    fn lookup(&self, hash: u64) -> Option<Move>;
}

/// Book held in a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryBook {
    entries: HashMap<u64, Move>,
}

impl MemoryBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from lines of space-separated UCI moves played from the start position.
    ///
    /// Each position along a line maps to the move played from it. When lines share a position,
    /// the first line's move is kept.
    pub fn from_uci_lines<'a, I>(lines: I) -> Result<Self, MoveParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut book = MemoryBook::new();
        for line in lines {
            let mut pos = Position::new();
            for uci in line.split_whitespace() {
                let mv = pos.parse_move(uci)?;
                book.entries.entry(pos.hash()).or_insert(mv);
                pos.make_move(mv);
            }
        }
        Ok(book)
    }

    pub fn insert(&mut self, hash: u64, mv: Move) {
        self.entries.insert(hash, mv);
    }

    pub fn insert_position(&mut self, position: &Position, mv: Move) {
        self.insert(position.hash(), mv);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpeningBook for MemoryBook {
    fn lookup(&self, hash: u64) -> Option<Move> {
        self.entries.get(&hash).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_share_prefixes() {
        let book = MemoryBook::from_uci_lines(["e2e4 e7e5 g1f3", "e2e4 c7c5", "d2d4"]).unwrap();
        let start = Position::new();
        // The start position keeps the first line's move.
        assert_eq!(book.lookup(start.hash()).map(|m| m.to_string()).as_deref(), Some("e2e4"));

        let mut after_e4 = Position::new();
        after_e4.make_move_uci("e2e4").unwrap();
        assert_eq!(book.lookup(after_e4.hash()).map(|m| m.to_string()).as_deref(), Some("e7e5"));
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn illegal_line_is_rejected() {
        assert_eq!(
            MemoryBook::from_uci_lines(["e2e5"]).unwrap_err(),
            MoveParseError::IllegalMove {
                notation: "e2e5".to_string()
            }
        );
    }

    #[test]
    fn unknown_position_misses() {
        let book = MemoryBook::new();
        assert!(book.is_empty());
        assert!(book.lookup(Position::new().hash()).is_none());
    }
}
