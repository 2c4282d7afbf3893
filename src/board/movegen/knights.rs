use super::{Generator, PinPolicy};
use crate::board::attack_tables::KNIGHT_ATTACKS;
use crate::board::types::{Bitboard, MoveList, Piece};

impl Generator<'_> {
    /// A pinned knight never has a move on its pin axis, so the axis mask empties it.
    pub(super) fn knight_moves(&self, moves: &mut MoveList, mask: Bitboard, pins: PinPolicy) {
        let targets = self.piece_targets();
        for from in self.pos.placement.pieces(self.us, Piece::Knight) {
            let Some(allowed) = self.allowed(from, mask, pins) else {
                continue;
            };
            for to in KNIGHT_ATTACKS[from.index()] & targets & allowed {
                self.push_piece_move(moves, from, to);
            }
        }
    }
}
