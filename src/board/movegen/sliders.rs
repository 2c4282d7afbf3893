use super::{Generator, PinPolicy};
use crate::board::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use crate::board::types::{Bitboard, MoveList, Piece, Square};

impl Generator<'_> {
    pub(super) fn slider_moves(&self, moves: &mut MoveList, mask: Bitboard, pins: PinPolicy) {
        let sliders: [(Piece, fn(Square, Bitboard) -> Bitboard); 3] = [
            (Piece::Bishop, bishop_attacks),
            (Piece::Rook, rook_attacks),
            (Piece::Queen, queen_attacks),
        ];
        let targets = self.piece_targets();
        for (piece, attacks) in sliders {
            for from in self.pos.placement.pieces(self.us, piece) {
                let Some(allowed) = self.allowed(from, mask, pins) else {
                    continue;
                };
                for to in attacks(from, self.occ) & targets & allowed {
                    self.push_piece_move(moves, from, to);
                }
            }
        }
    }
}
