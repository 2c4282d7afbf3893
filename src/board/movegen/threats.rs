//! Threat pass: what the opponent attacks, who gives check, and which of our pieces are pinned.

use crate::board::attack_tables::{
    DIRECTION_OFFSETS, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS, SQUARES_TO_EDGE,
};
use crate::board::placement::Placement;
use crate::board::types::{Bitboard, Color, Piece, Square};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ThreatInfo {
    /// Squares the opponent attacks, with our king treated as transparent to sliders.
    pub under_attack: Bitboard,
    /// Opponent pieces giving check.
    pub checkers: Bitboard,
    /// Squares strictly between a sliding checker and our king.
    pub check_ray: Bitboard,
    /// Our pieces absolutely pinned to our king.
    pub pinned: Bitboard,
}

impl ThreatInfo {
    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers.any()
    }

    #[inline]
    pub fn in_double_check(&self) -> bool {
        self.checkers.has_several()
    }

    /// Destinations that resolve a single check: capture the checker or block its ray.
    #[inline]
    pub fn evasion_mask(&self) -> Bitboard {
        self.checkers | self.check_ray
    }

    /// Analyse the threats against `us`, whose king stands on `king`.
    pub fn analyze(placement: &Placement, us: Color, king: Square) -> Self {
        let them = us.opponent();
        let mut info = ThreatInfo::default();

        for sq in placement.pieces(them, Piece::Pawn) {
            info.add_leaper(sq, PAWN_ATTACKS[them.index()][sq.index()], king);
        }
        for sq in placement.pieces(them, Piece::Knight) {
            info.add_leaper(sq, KNIGHT_ATTACKS[sq.index()], king);
        }
        for sq in placement.pieces(them, Piece::King) {
            info.under_attack |= KING_ATTACKS[sq.index()];
        }

        for sq in placement.pieces(them, Piece::Bishop) {
            info.walk_rays(placement, us, sq, 4..8);
        }
        for sq in placement.pieces(them, Piece::Rook) {
            info.walk_rays(placement, us, sq, 0..4);
        }
        for sq in placement.pieces(them, Piece::Queen) {
            info.walk_rays(placement, us, sq, 0..8);
        }
        info
    }

    fn add_leaper(&mut self, from: Square, attacks: Bitboard, king: Square) {
        self.under_attack |= attacks;
        if attacks.contains(king) {
            self.checkers |= Bitboard::from_square(from);
        }
    }

    /// Walk each ray of a slider and classify what it meets first.
    ///
    /// Empty squares are attacked until the first blocker. If the first blocker is our king the
    /// slider gives check, and the squares behind the king stay attacked. If it is one of our
    /// pieces followed by our king, that piece is pinned. Anything else ends the ray.
    fn walk_rays(
        &mut self,
        placement: &Placement,
        us: Color,
        slider: Square,
        dirs: std::ops::Range<usize>,
    ) {
        for dir in dirs {
            let mut idx = slider.index() as i32;
            let mut ray = Bitboard::EMPTY;
            let mut defender: Option<Square> = None;
            let mut past_king = false;

            for _ in 0..SQUARES_TO_EDGE[slider.index()][dir] {
                idx += DIRECTION_OFFSETS[dir];
                let target = Square::from_index(idx as usize);

                if past_king {
                    self.under_attack |= Bitboard::from_square(target);
                    if !placement.is_empty(target) {
                        break;
                    }
                    continue;
                }

                match placement.piece_at(target) {
                    None => {
                        if defender.is_none() {
                            self.under_attack |= Bitboard::from_square(target);
                        }
                        ray |= Bitboard::from_square(target);
                    }
                    Some((color, Piece::King)) if color == us => {
                        if let Some(pinned) = defender {
                            self.pinned |= Bitboard::from_square(pinned);
                            break;
                        }
                        self.under_attack |= Bitboard::from_square(target);
                        self.checkers |= Bitboard::from_square(slider);
                        self.check_ray |= ray;
                        past_king = true;
                    }
                    Some((color, _)) if color == us => {
                        if defender.is_some() {
                            break;
                        }
                        self.under_attack |= Bitboard::from_square(target);
                        defender = Some(target);
                    }
                    Some(_) => {
                        if defender.is_none() {
                            self.under_attack |= Bitboard::from_square(target);
                        }
                        break;
                    }
                }
            }
        }
    }
}
