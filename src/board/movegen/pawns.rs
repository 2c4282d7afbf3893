use super::{GenType, Generator, PinPolicy};
use crate::board::attack_tables::{bishop_attacks, rook_attacks, PAWN_ATTACKS, PAWN_PUSHES};
use crate::board::placement::en_passant_victim;
use crate::board::types::{Bitboard, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Generator<'_> {
    pub(super) fn pawn_moves(&self, moves: &mut MoveList, mask: Bitboard, pins: PinPolicy) {
        let us = self.us;
        let promotion_rank = us.pawn_promotion_rank();
        let start_rank = us.pawn_start_rank();
        let ep_square = self.pos.en_passant_square();

        for from in self.pos.placement.pieces(us, Piece::Pawn) {
            let Some(allowed) = self.allowed(from, mask, pins) else {
                continue;
            };

            if let Some(one) = PAWN_PUSHES[us.index()][from.index()].lsb() {
                if !self.occ.contains(one) {
                    if allowed.contains(one) {
                        if one.rank() == promotion_rank {
                            push_promotions(moves, from, one, false);
                        } else if self.gen_type == GenType::All {
                            moves.push(Move::quiet(from, one));
                        }
                    }
                    if self.gen_type == GenType::All && from.rank() == start_rank {
                        if let Some(two) = PAWN_PUSHES[us.index()][one.index()].lsb() {
                            if !self.occ.contains(two) && allowed.contains(two) {
                                moves.push(Move::double_pawn_push(from, two));
                            }
                        }
                    }
                }
            }

            let attacks = PAWN_ATTACKS[us.index()][from.index()];
            for to in attacks & self.enemy & allowed {
                if to.rank() == promotion_rank {
                    push_promotions(moves, from, to, true);
                } else {
                    moves.push(Move::capture(from, to));
                }
            }

            if let Some(ep) = ep_square {
                if attacks.contains(ep) && self.en_passant_is_legal(from, ep) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    /// En passant removes the capturing pawn and the victim from two different squares, which
    /// the pin analysis cannot see. Replay the capture on the occupancy and look for a slider
    /// that would reach our king.
    fn en_passant_is_legal(&self, from: Square, to: Square) -> bool {
        let victim = en_passant_victim(to, self.us);
        let placement = &self.pos.placement;
        if !placement.pieces(self.them, Piece::Pawn).contains(victim) || self.occ.contains(to) {
            return false;
        }
        if self.threats.in_check()
            && !(self.threats.checkers.contains(victim) || self.threats.check_ray.contains(to))
        {
            return false;
        }
        let occ = self.occ.without(from).without(victim).with(to);
        let orthogonal = rook_attacks(self.king, occ) & placement.orthogonal_sliders(self.them);
        let diagonal = bishop_attacks(self.king, occ) & placement.diagonal_sliders(self.them);
        orthogonal.is_empty() && diagonal.is_empty()
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, capture: bool) {
    for piece in PROMOTION_PIECES {
        moves.push(Move::promotion(from, to, piece, capture));
    }
}
