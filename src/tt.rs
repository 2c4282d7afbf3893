//! Transposition table for caching search results.
//!
//! A fixed-capacity array indexed by `hash % capacity`, one entry per slot. Entries carry the
//! full key, so an index collision is detected on probe and treated as a miss.

use std::mem;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        self.depth as u32
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

/// Depth-preferring transposition table.
#[derive(Clone, Debug)]
pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
}

impl TranspositionTable {
    /// Create a table using roughly `size_mb` megabytes (at least one slot).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<Option<TTEntry>>();
        TranspositionTable::with_capacity((size_mb * 1024 * 1024) / slot_size)
    }

    /// Create a table with an exact number of slots (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TranspositionTable {
            slots: vec![None; capacity.max(1)],
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// The entry stored for exactly this position, if any.
    #[must_use]
    pub fn entry(&self, hash: u64) -> Option<&TTEntry> {
        self.slots[self.index(hash)]
            .as_ref()
            .filter(|entry| entry.key == hash)
    }

    /// Best move remembered for this position.
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.entry(hash).and_then(|entry| entry.best_move)
    }

    /// A score usable at `depth` within the `(alpha, beta)` window, or `None` on a miss.
    ///
    /// Exact entries return their score; a lower bound at or above beta returns beta; an upper
    /// bound at or below alpha returns alpha.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entry(hash)?;
        if entry.depth() < depth {
            return None;
        }
        match entry.bound_type {
            BoundType::Exact => Some(entry.score),
            BoundType::LowerBound if entry.score >= beta => Some(beta),
            BoundType::UpperBound if entry.score <= alpha => Some(alpha),
            _ => None,
        }
    }

    /// Store a search result unless the slot holds a deeper one.
    ///
    /// The depth test ignores the key: a deeper entry for another position is kept too.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        bound_type: BoundType,
        score: i32,
        best_move: Option<Move>,
    ) {
        let depth = depth.min(u8::MAX as u32) as u8;
        let idx = self.index(hash);
        if let Some(existing) = &self.slots[idx] {
            if depth < existing.depth {
                return;
            }
        }
        self.slots[idx] = Some(TTEntry {
            key: hash,
            depth,
            score,
            bound_type,
            best_move: best_move.filter(|mv| !mv.is_null()),
        });
    }

    /// Returns table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample].iter().filter(|s| s.is_some()).count();
        ((used * 1000) / sample) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0x1234_5678_9ABC_DEF0;
        let mv = Move::quiet(Square::E1, Square::F1);
        tt.store(hash, 10, BoundType::Exact, 500, Some(mv));

        assert_eq!(tt.probe(hash, 10, -1000, 1000), Some(500));
        assert_eq!(tt.probe(hash, 11, -1000, 1000), None);
        assert_eq!(tt.best_move(hash), Some(mv));
    }

    #[test]
    fn test_bounds() {
        let mut tt = TranspositionTable::with_capacity(64);
        tt.store(1, 4, BoundType::LowerBound, 300, None);
        assert_eq!(tt.probe(1, 4, 0, 200), Some(200));
        assert_eq!(tt.probe(1, 4, 0, 400), None);
        tt.store(2, 4, BoundType::UpperBound, -50, None);
        assert_eq!(tt.probe(2, 4, 0, 100), Some(0));
        assert_eq!(tt.probe(2, 4, -100, 100), None);
    }

    #[test]
    fn test_no_false_positives() {
        let mut tt = TranspositionTable::with_capacity(16);
        tt.store(5, 3, BoundType::Exact, 1, None);
        // Same slot, different key.
        assert!(tt.entry(21).is_none());
        assert!(tt.probe(21, 0, -10, 10).is_none());
    }

    #[test]
    fn test_shallower_store_keeps_deeper_entry() {
        let mut tt = TranspositionTable::with_capacity(16);
        tt.store(7, 6, BoundType::Exact, 42, None);
        let before = *tt.entry(7).unwrap();
        tt.store(7, 5, BoundType::LowerBound, -3, None);
        assert_eq!(*tt.entry(7).unwrap(), before);
        // A colliding key at lower depth is rejected as well.
        tt.store(23, 2, BoundType::Exact, 9, None);
        assert_eq!(*tt.entry(7).unwrap(), before);
        // Equal depth replaces.
        tt.store(23, 6, BoundType::Exact, 9, None);
        assert!(tt.entry(7).is_none());
        assert_eq!(tt.entry(23).unwrap().score, 9);
    }

    #[test]
    fn test_clear_and_hashfull() {
        let mut tt = TranspositionTable::with_capacity(10);
        for h in 0..5 {
            tt.store(h, 1, BoundType::Exact, 0, None);
        }
        assert_eq!(tt.hashfull_per_mille(), 500);
        tt.clear();
        assert_eq!(tt.hashfull_per_mille(), 0);
    }
}
