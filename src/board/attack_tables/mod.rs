//! Attack tables for move generation.
//!
//! Uses Hyperbola Quintessence for sliding piece attacks (bishop, rook, queen).
//! This is a fast, branch-free algorithm that uses the `o^(o-2r)` trick.
//! Leaper and ray tables live in `tables`; all of them are immutable once built.

#![allow(clippy::inline_always)] // Performance-critical hot path functions

mod tables;

pub(crate) use tables::{
    BETWEEN, DIRECTION_OFFSETS, KING_ATTACKS, KNIGHT_ATTACKS, LINE, PAWN_ATTACKS, PAWN_PUSHES,
    RAYS, SQUARES_TO_EDGE,
};

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Square};

/// Diagonal masks for each square (bottom-left to top-right direction)
static DIAG_MASKS: Lazy<[u64; 64]> =
    Lazy::new(|| line_masks(|sq| RAYS[6][sq].0 | RAYS[7][sq].0 | (1u64 << sq)));

/// Anti-diagonal masks for each square (top-left to bottom-right direction)
static ANTI_MASKS: Lazy<[u64; 64]> =
    Lazy::new(|| line_masks(|sq| RAYS[4][sq].0 | RAYS[5][sq].0 | (1u64 << sq)));

/// File masks for each square
static FILE_MASKS: Lazy<[u64; 64]> = Lazy::new(|| line_masks(|sq| Bitboard::file_mask(sq % 8).0));

/// Rank attack lookup table: `[8 * occupancy_6bit + file]` -> attacks on that rank
/// Only stores attacks for file positions, shifted to rank 0
static RANK_ATTACKS: Lazy<[u64; 512]> = Lazy::new(|| {
    let mut attacks = [0u64; 512];
    for occ_6bit in 0..64 {
        for file in 0..8 {
            let mut attack = 0u64;
            for f in (file + 1)..8 {
                attack |= 1u64 << f;
                if (1..=6).contains(&f) && (occ_6bit & (1 << (f - 1))) != 0 {
                    break;
                }
            }
            for f in (0..file).rev() {
                attack |= 1u64 << f;
                if (1..=6).contains(&f) && (occ_6bit & (1 << (f - 1))) != 0 {
                    break;
                }
            }
            attacks[8 * occ_6bit + file] = attack;
        }
    }
    attacks
});

fn line_masks(mask_for: impl Fn(usize) -> u64) -> [u64; 64] {
    let mut masks = [0u64; 64];
    for (sq, slot) in masks.iter_mut().enumerate() {
        *slot = mask_for(sq);
    }
    masks
}

/// Build every table up front.
///
/// Tables are built lazily on first use anyway; calling this at startup moves that cost out of
/// the first search. Order matters: edge distances feed the rays, which feed the line masks used
/// by the sliders.
pub fn init_tables() {
    Lazy::force(&SQUARES_TO_EDGE);
    Lazy::force(&RAYS);
    Lazy::force(&BETWEEN);
    Lazy::force(&LINE);
    Lazy::force(&KNIGHT_ATTACKS);
    Lazy::force(&KING_ATTACKS);
    Lazy::force(&PAWN_ATTACKS);
    Lazy::force(&PAWN_PUSHES);
    Lazy::force(&DIAG_MASKS);
    Lazy::force(&ANTI_MASKS);
    Lazy::force(&FILE_MASKS);
    Lazy::force(&RANK_ATTACKS);
}

/// Hyperbola Quintessence attack calculation for a single line.
/// Uses the o^(o-2r) trick with byteswap for the reverse direction.
#[inline(always)]
fn hyp_quint(occupied: u64, mask: u64, square: usize) -> u64 {
    let piece_bit = 1u64 << square;
    let forward = occupied & mask;
    let backward = forward.swap_bytes();
    let forward_attacks = forward.wrapping_sub(piece_bit.wrapping_mul(2));
    let backward_attacks =
        backward.wrapping_sub(piece_bit.swap_bytes().wrapping_mul(2)).swap_bytes();
    (forward_attacks ^ backward_attacks) & mask
}

/// Rank attacks (horizontal) - uses lookup table since byteswap doesn't help
#[inline(always)]
fn rank_attacks(occupied: u64, square: usize) -> u64 {
    let rank = square / 8;
    let file = square % 8;
    let occ_6bit = ((occupied >> (rank * 8 + 1)) & 63) as usize;
    RANK_ATTACKS[8 * occ_6bit + file] << (rank * 8)
}

/// Diagonal attacks of a bishop on `sq` given the full occupancy
#[inline]
#[must_use]
pub(crate) fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let s = sq.index();
    Bitboard(
        hyp_quint(occupancy.0, DIAG_MASKS[s], s) | hyp_quint(occupancy.0, ANTI_MASKS[s], s),
    )
}

/// Orthogonal attacks of a rook on `sq` given the full occupancy
#[inline]
#[must_use]
pub(crate) fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let s = sq.index();
    Bitboard(hyp_quint(occupancy.0, FILE_MASKS[s], s) | rank_attacks(occupancy.0, s))
}

/// Queen attacks are the union of the bishop and rook sets
#[inline]
#[must_use]
pub(crate) fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn bb(squares: &[&str]) -> Bitboard {
        squares
            .iter()
            .fold(Bitboard::EMPTY, |acc, s| acc.with(sq(s)))
    }

    /// Slow reference: walk each direction until a blocker.
    fn walked_attacks(from: Square, occ: Bitboard, dirs: std::ops::Range<usize>) -> Bitboard {
        let mut result = Bitboard::EMPTY;
        for dir in dirs {
            let mut idx = from.index() as i32;
            for _ in 0..SQUARES_TO_EDGE[from.index()][dir] {
                idx += DIRECTION_OFFSETS[dir];
                let target = Square::from_index(idx as usize);
                result = result.with(target);
                if occ.contains(target) {
                    break;
                }
            }
        }
        result
    }

    #[test]
    fn rook_attacks_empty_board() {
        let attacks = rook_attacks(sq("e4"), Bitboard::EMPTY);
        let expected = (Bitboard::rank_mask(3) | Bitboard::file_mask(4)).without(sq("e4"));
        assert_eq!(attacks, expected);
    }

    #[test]
    fn bishop_attacks_with_blocker() {
        let attacks = bishop_attacks(sq("e4"), bb(&["g6"]));
        assert!(attacks.contains(sq("g6")));
        assert!(!attacks.contains(sq("h7")));
        assert!(attacks.contains(sq("a8")));
        assert!(attacks.contains(sq("h1")));
        assert!(!attacks.contains(sq("e4")));
    }

    #[test]
    fn sliders_agree_with_ray_walk() {
        let occupancies = [
            Bitboard::EMPTY,
            Bitboard(0xFF00_FF00_FF00_FF00),
            Bitboard(0x0042_1800_0024_8100),
            bb(&["d4", "e5", "b7", "g2", "c3"]),
        ];
        for idx in 0..64 {
            let from = Square::from_index(idx);
            for &occ in &occupancies {
                assert_eq!(rook_attacks(from, occ), walked_attacks(from, occ, 0..4));
                assert_eq!(bishop_attacks(from, occ), walked_attacks(from, occ, 4..8));
            }
        }
    }

    #[test]
    fn edge_distances() {
        // a1: north 7, south 0, west 0, east 7, NE 7
        assert_eq!(SQUARES_TO_EDGE[0], [7, 0, 0, 7, 0, 0, 7, 0]);
        // e4
        let e4 = SQUARES_TO_EDGE[sq("e4").index()];
        assert_eq!(e4, [4, 3, 4, 3, 4, 3, 3, 3]);
    }

    #[test]
    fn between_and_line() {
        assert_eq!(BETWEEN[sq("a1").index()][sq("d4").index()], bb(&["b2", "c3"]));
        assert_eq!(BETWEEN[sq("e1").index()][sq("e2").index()], Bitboard::EMPTY);
        assert_eq!(BETWEEN[sq("a1").index()][sq("b3").index()], Bitboard::EMPTY);
        assert_eq!(LINE[sq("e1").index()][sq("e5").index()], Bitboard::file_mask(4));
        assert!(LINE[sq("a1").index()][sq("b3").index()].is_empty());
        assert_eq!(LINE[sq("c3").index()][sq("a1").index()].popcount(), 8);
    }

    #[test]
    fn leaper_tables() {
        assert_eq!(KNIGHT_ATTACKS[0], bb(&["b3", "c2"]));
        assert_eq!(KING_ATTACKS[sq("h8").index()], bb(&["g8", "g7", "h7"]));
        assert_eq!(PAWN_ATTACKS[0][sq("a2").index()], bb(&["b3"]));
        assert_eq!(PAWN_ATTACKS[1][sq("e7").index()], bb(&["d6", "f6"]));
        assert_eq!(PAWN_PUSHES[0][sq("e2").index()], bb(&["e3"]));
        assert!(PAWN_PUSHES[0][sq("e8").index()].is_empty());
    }
}
