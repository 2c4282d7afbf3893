//! Perft: count leaf nodes of the legal move tree, the standard move generator check.

use super::state::Position;
use super::types::Move;

impl Position {
    /// Number of legal move sequences of length `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv);
        }
        nodes
    }

    /// Perft split by root move, for locating generator bugs against a reference engine.
    pub fn divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for mv in moves {
            self.make_move(mv);
            let nodes = if depth <= 1 { 1 } else { self.perft(depth - 1) };
            self.unmake_move(mv);
            counts.push((mv, nodes));
        }
        counts
    }
}
