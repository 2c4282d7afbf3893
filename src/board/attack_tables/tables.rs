//! Precomputed per-square tables: leaper attacks, pawn pushes, edge distances and ray geometry.

use once_cell::sync::Lazy;

use crate::board::types::Bitboard;

/// Ray directions as (rank delta, file delta).
///
/// Indices 0-3 are orthogonal (N, S, W, E), 4-7 diagonal (NW, SE, NE, SW).
pub(crate) const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
];

/// Square index delta for each entry of `DIRECTIONS`.
pub(crate) const DIRECTION_OFFSETS: [i32; 8] = [8, -8, -1, 1, 7, -7, 9, -9];

fn leaper_table(deltas: &[(i32, i32)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as i32;
        let f = (sq % 8) as i32;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        *slot = Bitboard(mask);
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&DIRECTIONS));

/// Squares attacked by a pawn of the indexed color standing on the square.
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])]);

/// Single-push destination of a pawn of the indexed color (empty on the last rank).
pub(crate) static PAWN_PUSHES: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, 0)]), leaper_table(&[(-1, 0)])]);

/// Number of steps from a square to the board edge in each direction.
pub(crate) static SQUARES_TO_EDGE: Lazy<[[u8; 8]; 64]> = Lazy::new(|| {
    let mut table = [[0u8; 8]; 64];
    for (sq, row) in table.iter_mut().enumerate() {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        for (dir, &(dr, df)) in DIRECTIONS.iter().enumerate() {
            let mut steps = 0u8;
            let (mut r, mut f) = (rank + dr, file + df);
            while (0..8).contains(&r) && (0..8).contains(&f) {
                steps += 1;
                r += dr;
                f += df;
            }
            row[dir] = steps;
        }
    }
    table
});

/// Full ray from a square (exclusive) to the edge, per direction.
pub(crate) static RAYS: Lazy<[[Bitboard; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    for (dir, row) in rays.iter_mut().enumerate() {
        for (sq, slot) in row.iter_mut().enumerate() {
            let mut mask = 0u64;
            let mut idx = sq as i32;
            for _ in 0..SQUARES_TO_EDGE[sq][dir] {
                idx += DIRECTION_OFFSETS[dir];
                mask |= 1u64 << idx;
            }
            *slot = Bitboard(mask);
        }
    }
    rays
});

/// Squares strictly between two aligned squares; empty when not aligned.
pub(crate) static BETWEEN: Lazy<Box<[[Bitboard; 64]; 64]>> = Lazy::new(|| {
    let mut table = Box::new([[Bitboard::EMPTY; 64]; 64]);
    for from in 0..64usize {
        for dir in 0..8 {
            let mut idx = from as i32;
            let mut passed = 0u64;
            for _ in 0..SQUARES_TO_EDGE[from][dir] {
                idx += DIRECTION_OFFSETS[dir];
                table[from][idx as usize] = Bitboard(passed);
                passed |= 1u64 << idx;
            }
        }
    }
    table
});

/// Whole board line through two aligned squares (both included); empty when not aligned.
pub(crate) static LINE: Lazy<Box<[[Bitboard; 64]; 64]>> = Lazy::new(|| {
    let mut table = Box::new([[Bitboard::EMPTY; 64]; 64]);
    for from in 0..64usize {
        for dir in 0..8 {
            let opposite = dir ^ 1;
            let line = RAYS[dir][from].0 | RAYS[opposite][from].0 | (1u64 << from);
            for to in RAYS[dir][from] {
                table[from][to.index()] = Bitboard(line);
            }
        }
    }
    table
});
