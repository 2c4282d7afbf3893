use super::{GenType, Generator};
use crate::board::attack_tables::{BETWEEN, KING_ATTACKS};
use crate::board::types::{castle_squares, Bitboard, Move, MoveList, Piece};

impl Generator<'_> {
    /// King steps to unattacked squares, plus castling when `castling` is set (not in check).
    pub(super) fn king_moves(&self, moves: &mut MoveList, castling: bool) {
        let from = self.king;
        let targets = KING_ATTACKS[from.index()] & self.piece_targets() & !self.threats.under_attack;
        for to in targets {
            self.push_piece_move(moves, from, to);
        }
        if castling && self.gen_type == GenType::All {
            self.castling_moves(moves);
        }
    }

    fn castling_moves(&self, moves: &mut MoveList) {
        let rights = self.pos.castling_rights();
        let rooks = self.pos.placement.pieces(self.us, Piece::Rook);
        for kingside in [true, false] {
            if !rights.has(self.us, kingside) {
                continue;
            }
            let (king_from, king_to, rook_from, _) = castle_squares(self.us, kingside);
            if self.king != king_from || !rooks.contains(rook_from) {
                continue;
            }
            if (BETWEEN[king_from.index()][rook_from.index()] & self.occ).any() {
                continue;
            }
            let king_path = BETWEEN[king_from.index()][king_to.index()]
                | Bitboard::from_square(king_from)
                | Bitboard::from_square(king_to);
            if (king_path & self.threats.under_attack).any() {
                continue;
            }
            moves.push(if kingside {
                Move::castle_kingside(king_from, king_to)
            } else {
                Move::castle_queenside(king_from, king_to)
            });
        }
    }
}
