use crate::board::attack_tables::{
    bishop_attacks, queen_attacks, rook_attacks, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use crate::board::placement::en_passant_victim;
use crate::board::state::Position;
use crate::board::types::{castle_squares, Bitboard, Move, MoveKind, Piece, Square};

impl Position {
    /// Whether a legal move gives check, computed without making it.
    ///
    /// Covers direct checks by the moved (or promoted, or castled) piece and discovered checks
    /// through the squares the move vacates.
    #[must_use]
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let Some(enemy_king) = self.king_square(them) else {
            return false;
        };
        let Some((_, moved)) = self.placement.piece_at(mv.from()) else {
            return false;
        };

        let from = mv.from();
        let to = mv.to();
        let occ = self.placement.occupancy();

        // Where the checking piece ends up, what it is, and which friendly squares it vacated.
        let (checker_sq, checker, occ_after, vacated) = match mv.kind() {
            MoveKind::Castle { kingside } => {
                let (king_from, king_to, rook_from, rook_to) = castle_squares(us, kingside);
                let occ_after = occ
                    .without(king_from)
                    .without(rook_from)
                    .with(king_to)
                    .with(rook_to);
                let vacated = Bitboard::from_square(king_from) | Bitboard::from_square(rook_from);
                (rook_to, Piece::Rook, occ_after, vacated)
            }
            MoveKind::EnPassant => {
                let occ_after = occ.without(from).without(en_passant_victim(to, us)).with(to);
                (to, Piece::Pawn, occ_after, Bitboard::from_square(from))
            }
            MoveKind::Promotion(promoted) => {
                (to, promoted, occ.without(from).with(to), Bitboard::from_square(from))
            }
            MoveKind::Standard => (to, moved, occ.without(from).with(to), Bitboard::from_square(from)),
        };

        if piece_attacks(checker, us.index(), checker_sq, occ_after).contains(enemy_king) {
            return true;
        }

        let p = &self.placement;
        let diagonal = p.diagonal_sliders(us) & !vacated;
        let orthogonal = p.orthogonal_sliders(us) & !vacated;
        (bishop_attacks(enemy_king, occ_after) & diagonal).any()
            || (rook_attacks(enemy_king, occ_after) & orthogonal).any()
    }
}

fn piece_attacks(piece: Piece, color_idx: usize, sq: Square, occ: Bitboard) -> Bitboard {
    match piece {
        Piece::Pawn => PAWN_ATTACKS[color_idx][sq.index()],
        Piece::Knight => KNIGHT_ATTACKS[sq.index()],
        Piece::Bishop => bishop_attacks(sq, occ),
        Piece::Rook => rook_attacks(sq, occ),
        Piece::Queen => queen_attacks(sq, occ),
        Piece::King => Bitboard::EMPTY,
    }
}
