//! Strictly legal move generation.
//!
//! Generation runs in two passes. The threat pass (`threats`) finds the squares the opponent
//! attacks, the checking pieces and our pinned pieces. The generation pass then picks one of
//! five branches from (double check, check, pins) and only emits legal moves; the single
//! exception that needs its own test is en passant, which removes two pieces from one line.

mod checks;
mod kings;
mod knights;
mod pawns;
mod sliders;
mod threats;

pub(crate) use threats::ThreatInfo;

use crate::board::attack_tables::{
    bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, LINE, PAWN_ATTACKS,
};
use crate::board::state::Position;
use crate::board::types::{Bitboard, Color, Move, MoveList, Piece, Square};

/// Which subset of the legal moves to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenType {
    /// Every legal move.
    All,
    /// Captures (including en passant) and promotions.
    Noisy,
}

/// Generation branch selected from the threat pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenState {
    /// Two checkers: only the king may move.
    DoubleCheck,
    /// One checker and at least one pinned piece; pinned pieces cannot help.
    CheckWithPins,
    /// One checker, nothing pinned.
    Check,
    /// Not in check; pinned pieces stay on their pin axis.
    Pins,
    /// Not in check and nothing pinned.
    Free,
}

impl GenState {
    #[must_use]
    pub const fn select(double_check: bool, pins: bool, check: bool) -> Self {
        match (double_check, pins, check) {
            (true, _, _) => GenState::DoubleCheck,
            (false, true, true) => GenState::CheckWithPins,
            (false, false, true) => GenState::Check,
            (false, true, false) => GenState::Pins,
            (false, false, false) => GenState::Free,
        }
    }
}

/// How pinned pieces are treated by a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PinPolicy {
    /// Pinned pieces have no legal moves.
    Skip,
    /// Pinned pieces may only move along the king line through them.
    Axis,
}

/// Per-call generation context.
pub(crate) struct Generator<'a> {
    pos: &'a Position,
    us: Color,
    them: Color,
    king: Square,
    own: Bitboard,
    enemy: Bitboard,
    occ: Bitboard,
    threats: ThreatInfo,
    gen_type: GenType,
}

impl<'a> Generator<'a> {
    /// `None` when the side to move has no king (never for a validated position).
    pub(crate) fn new(pos: &'a Position, gen_type: GenType) -> Option<Self> {
        let us = pos.side_to_move();
        let king = pos.placement.king_square(us)?;
        Some(Generator {
            pos,
            us,
            them: us.opponent(),
            king,
            own: pos.placement.occupied_by(us),
            enemy: pos.placement.occupied_by(us.opponent()),
            occ: pos.placement.occupancy(),
            threats: ThreatInfo::analyze(&pos.placement, us, king),
            gen_type,
        })
    }

    pub(crate) fn state(&self) -> GenState {
        GenState::select(
            self.threats.in_double_check(),
            self.threats.pinned.any(),
            self.threats.in_check(),
        )
    }

    pub(crate) fn generate(&self, moves: &mut MoveList) {
        match self.state() {
            GenState::DoubleCheck => {
                self.king_moves(moves, false);
            }
            GenState::CheckWithPins | GenState::Check => {
                self.piece_moves(moves, self.threats.evasion_mask(), PinPolicy::Skip);
                self.king_moves(moves, false);
            }
            GenState::Pins | GenState::Free => {
                self.piece_moves(moves, Bitboard::ALL, PinPolicy::Axis);
                self.king_moves(moves, true);
            }
        }
    }

    fn piece_moves(&self, moves: &mut MoveList, mask: Bitboard, pins: PinPolicy) {
        self.pawn_moves(moves, mask, pins);
        self.knight_moves(moves, mask, pins);
        self.slider_moves(moves, mask, pins);
    }

    /// Destinations allowed for the non-king piece on `from`, or `None` if it may not move.
    #[inline]
    fn allowed(&self, from: Square, mask: Bitboard, pins: PinPolicy) -> Option<Bitboard> {
        if !self.threats.pinned.contains(from) {
            return Some(mask);
        }
        match pins {
            PinPolicy::Skip => None,
            PinPolicy::Axis => Some(mask & LINE[self.king.index()][from.index()]),
        }
    }

    /// Destination filter for non-pawn pieces: never own pieces, enemy only in noisy mode.
    #[inline]
    fn piece_targets(&self) -> Bitboard {
        match self.gen_type {
            GenType::All => !self.own,
            GenType::Noisy => self.enemy,
        }
    }

    #[inline]
    fn push_piece_move(&self, moves: &mut MoveList, from: Square, to: Square) {
        if self.enemy.contains(to) {
            moves.push(Move::capture(from, to));
        } else {
            moves.push(Move::quiet(from, to));
        }
    }
}

impl Position {
    /// Every legal move for the side to move.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.generate(GenType::All)
    }

    /// Legal captures and promotions, for quiescence search.
    #[must_use]
    pub fn generate_noisy_moves(&self) -> MoveList {
        self.generate(GenType::Noisy)
    }

    /// Legal quiet (non-capture, non-promotion) moves that give check.
    #[must_use]
    pub fn generate_quiet_checks(&self) -> MoveList {
        let mut moves = self.generate(GenType::All);
        moves.retain(|mv| !mv.is_tactical() && self.gives_check(mv));
        moves
    }

    #[must_use]
    pub fn generate(&self, gen_type: GenType) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(generator) = Generator::new(self, gen_type) {
            generator.generate(&mut moves);
        }
        moves
    }

    /// Branch the generator takes in this position.
    #[must_use]
    pub fn generation_state(&self) -> Option<GenState> {
        Generator::new(self, GenType::All).map(|g| g.state())
    }

    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.generate_moves().contains(mv)
    }

    /// Whether any piece of `by` attacks `square` on the current board.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.attackers_to(square, by, self.placement.occupancy()).any()
    }

    /// Pieces of `by` attacking `square` given occupancy `occ`.
    #[must_use]
    pub(crate) fn attackers_to(&self, square: Square, by: Color, occ: Bitboard) -> Bitboard {
        let p = &self.placement;
        let idx = square.index();
        let pawns = PAWN_ATTACKS[by.opponent().index()][idx] & p.pieces(by, Piece::Pawn);
        let knights = KNIGHT_ATTACKS[idx] & p.pieces(by, Piece::Knight);
        let kings = KING_ATTACKS[idx] & p.pieces(by, Piece::King);
        let diagonal = bishop_attacks(square, occ) & p.diagonal_sliders(by);
        let orthogonal = rook_attacks(square, occ) & p.orthogonal_sliders(by);
        pawns | knights | kings | diagonal | orthogonal
    }

    /// Side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        match self.king_square(us) {
            Some(king) => self.is_square_attacked(king, us.opponent()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_selection_covers_all_combinations() {
        for double in [false, true] {
            for pins in [false, true] {
                for check in [false, true] {
                    let state = GenState::select(double, pins, check);
                    if double {
                        assert_eq!(state, GenState::DoubleCheck);
                    } else {
                        let expected = match (pins, check) {
                            (true, true) => GenState::CheckWithPins,
                            (false, true) => GenState::Check,
                            (true, false) => GenState::Pins,
                            (false, false) => GenState::Free,
                        };
                        assert_eq!(state, expected);
                    }
                }
            }
        }
    }
}
