//! Piece placement: twelve piece bitboards, two colour occupancies and a mailbox.
//!
//! Every mutation goes through XOR toggles, so each move applier is its own inverse: applying
//! the same move twice restores the previous placement. The mailbox cells touched by a move are
//! re-derived from the bitboards afterwards, which keeps that property for the mailbox as well.

use crate::board::types::{castle_squares, Bitboard, Color, Move, MoveKind, Piece, Square};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pieces: [[Bitboard; 6]; 2],
    occupied: [Bitboard; 2],
    piece_on: [Option<Piece>; 64],
    color_on: [Option<Color>; 64],
}

impl Default for Placement {
    fn default() -> Self {
        Placement::empty()
    }
}

impl Placement {
    #[must_use]
    pub const fn empty() -> Self {
        Placement {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            piece_on: [None; 64],
            color_on: [None; 64],
        }
    }

    /// Bitboard of one piece type of one colour
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All pieces of one colour
    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// All pieces on the board
    #[inline]
    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    /// Mailbox lookup
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        match (self.color_on[sq.index()], self.piece_on[sq.index()]) {
            (Some(color), Some(piece)) => Some((color, piece)),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_on[sq.index()].is_none()
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Bishops and queens of one colour
    #[inline]
    #[must_use]
    pub fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, Piece::Bishop) | self.pieces(color, Piece::Queen)
    }

    /// Rooks and queens of one colour
    #[inline]
    #[must_use]
    pub fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, Piece::Rook) | self.pieces(color, Piece::Queen)
    }

    /// Place a piece on an empty square (used while setting up a position).
    pub(crate) fn put(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.is_empty(sq), "put on occupied square {sq}");
        self.toggle(sq, color, piece);
        self.piece_on[sq.index()] = Some(piece);
        self.color_on[sq.index()] = Some(color);
    }

    #[inline]
    fn toggle(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] ^= bit;
        self.occupied[color.index()] ^= bit;
    }

    /// Re-derive one mailbox cell from the bitboards.
    #[inline]
    fn refresh(&mut self, sq: Square) {
        let idx = sq.index();
        self.piece_on[idx] = None;
        self.color_on[idx] = None;
        for color in Color::BOTH {
            if !self.occupied[color.index()].contains(sq) {
                continue;
            }
            for piece in Piece::ALL {
                if self.pieces[color.index()][piece.index()].contains(sq) {
                    self.piece_on[idx] = Some(piece);
                    self.color_on[idx] = Some(color);
                    return;
                }
            }
        }
    }

    /// Apply (or, called again with the same arguments, undo) a move.
    ///
    /// `moved` is the piece standing on the origin before the move; for promotions it is the
    /// pawn. `captured` is the victim, if any; for en passant it is the pawn behind `to`.
    pub(crate) fn apply_move(
        &mut self,
        mv: Move,
        color: Color,
        moved: Piece,
        captured: Option<Piece>,
    ) {
        let from = mv.from();
        let to = mv.to();
        match mv.kind() {
            MoveKind::Standard => {
                if let Some(victim) = captured {
                    self.toggle(to, color.opponent(), victim);
                }
                self.toggle(from, color, moved);
                self.toggle(to, color, moved);
                self.refresh(from);
                self.refresh(to);
            }
            MoveKind::Castle { kingside } => {
                let (king_from, king_to, rook_from, rook_to) = castle_squares(color, kingside);
                self.toggle(king_from, color, Piece::King);
                self.toggle(king_to, color, Piece::King);
                self.toggle(rook_from, color, Piece::Rook);
                self.toggle(rook_to, color, Piece::Rook);
                for sq in [king_from, king_to, rook_from, rook_to] {
                    self.refresh(sq);
                }
            }
            MoveKind::Promotion(promoted) => {
                if let Some(victim) = captured {
                    self.toggle(to, color.opponent(), victim);
                }
                self.toggle(from, color, Piece::Pawn);
                self.toggle(to, color, promoted);
                self.refresh(from);
                self.refresh(to);
            }
            MoveKind::EnPassant => {
                let victim_sq = en_passant_victim(to, color);
                self.toggle(victim_sq, color.opponent(), Piece::Pawn);
                self.toggle(from, color, Piece::Pawn);
                self.toggle(to, color, Piece::Pawn);
                self.refresh(victim_sq);
                self.refresh(from);
                self.refresh(to);
            }
        }
    }

    /// Check the bitboard and mailbox invariants.
    pub fn validate(&self) -> Result<(), String> {
        for color in Color::BOTH {
            let union = Piece::ALL
                .iter()
                .fold(Bitboard::EMPTY, |acc, &p| acc | self.pieces(color, p));
            if union != self.occupied_by(color) {
                return Err(format!("{color} occupancy is not the union of its pieces"));
            }
        }
        if (self.occupied[0] & self.occupied[1]).any() {
            return Err("a square is occupied by both colours".to_string());
        }
        for idx in 0..64 {
            let sq = Square::from_index(idx);
            let mut owners = Vec::new();
            for color in Color::BOTH {
                for piece in Piece::ALL {
                    if self.pieces(color, piece).contains(sq) {
                        owners.push((color, piece));
                    }
                }
            }
            if owners.len() > 1 {
                return Err(format!("{sq} is set in {} piece bitboards", owners.len()));
            }
            if owners.first().copied() != self.piece_at(sq) {
                return Err(format!(
                    "mailbox disagrees on {sq}: bitboards {:?}, mailbox {:?}",
                    owners.first(),
                    self.piece_at(sq)
                ));
            }
        }
        Ok(())
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
#[must_use]
pub(crate) fn en_passant_victim(to: Square, capturer: Color) -> Square {
    match capturer {
        Color::White => Square::from_index(to.index() - 8),
        Color::Black => Square::from_index(to.index() + 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn sample() -> Placement {
        let mut p = Placement::empty();
        p.put(Square::E1, Color::White, Piece::King);
        p.put(Square::H1, Color::White, Piece::Rook);
        p.put(Square::E8, Color::Black, Piece::King);
        p.put(sq("e5"), Color::White, Piece::Pawn);
        p.put(sq("d5"), Color::Black, Piece::Pawn);
        p.put(sq("b7"), Color::White, Piece::Pawn);
        p.put(Square::A8, Color::Black, Piece::Rook);
        p
    }

    #[test]
    fn every_applier_is_its_own_inverse() {
        let cases = [
            (Move::castle_kingside(Square::E1, Square::G1), Piece::King, None),
            (Move::en_passant(sq("e5"), sq("d6")), Piece::Pawn, Some(Piece::Pawn)),
            (
                Move::promotion(sq("b7"), Square::A8, Piece::Knight, true),
                Piece::Pawn,
                Some(Piece::Rook),
            ),
            (Move::quiet(Square::H1, sq("h5")), Piece::Rook, None),
        ];
        for (mv, moved, captured) in cases {
            let before = sample();
            let mut p = before.clone();
            p.apply_move(mv, Color::White, moved, captured);
            assert_ne!(p, before, "{mv:?} changed nothing");
            p.validate().unwrap();
            p.apply_move(mv, Color::White, moved, captured);
            assert_eq!(p, before, "{mv:?} is not self-inverse");
        }
    }

    #[test]
    fn en_passant_removes_pawn_behind_destination() {
        let mut p = sample();
        p.apply_move(Move::en_passant(sq("e5"), sq("d6")), Color::White, Piece::Pawn, Some(Piece::Pawn));
        assert!(p.is_empty(sq("d5")));
        assert_eq!(p.piece_at(sq("d6")), Some((Color::White, Piece::Pawn)));
    }

    #[test]
    fn castle_moves_rook() {
        let mut p = sample();
        p.apply_move(Move::castle_kingside(Square::E1, Square::G1), Color::White, Piece::King, None);
        assert_eq!(p.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
        assert_eq!(p.king_square(Color::White), Some(Square::G1));
        assert!(p.is_empty(Square::H1));
    }
}
