//! Zobrist hashing for chess positions.
//!
//! Keys are drawn from a fixed-seed generator, so every process computes the same hash for the
//! same position. The helpers below return XOR deltas; applying a delta twice cancels it.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Placement, Square};

const ZOBRIST_SEED: u64 = 1_234_567_890;

/// Index of the "no en-passant file" key.
pub const NO_EN_PASSANT: u8 = 8;

pub(crate) struct ZobristKeys {
    // pieces[piece_type][color][square_index]
    pub(crate) pieces: [[[u64; 64]; 2]; 6],
    // one key per castling-rights nibble
    pub(crate) castling: [u64; 16],
    // files a-h, then "none"
    pub(crate) en_passant: [u64; 9],
    pub(crate) black_to_move: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut pieces = [[[0; 64]; 2]; 6];
        let mut castling = [0; 16];
        let mut en_passant = [0; 9];

        for piece in &mut pieces {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let black_to_move = rng.gen();
        for key in &mut castling {
            *key = rng.gen();
        }
        for key in &mut en_passant {
            *key = rng.gen();
        }

        ZobristKeys {
            pieces,
            castling,
            en_passant,
            black_to_move,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Build the keys now rather than on first hash.
pub fn init_keys() {
    Lazy::force(&ZOBRIST);
}

#[inline]
#[must_use]
pub(crate) fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
    ZOBRIST.pieces[piece.index()][color.index()][sq.index()]
}

/// Key of the side to move; only black to move contributes.
#[inline]
#[must_use]
pub(crate) fn side_key() -> u64 {
    ZOBRIST.black_to_move
}

#[inline]
#[must_use]
pub(crate) fn quiet_move_delta(color: Color, piece: Piece, from: Square, to: Square) -> u64 {
    piece_key(color, piece, from) ^ piece_key(color, piece, to)
}

#[inline]
#[must_use]
pub(crate) fn capture_delta(
    color: Color,
    piece: Piece,
    from: Square,
    to: Square,
    captured: Piece,
) -> u64 {
    quiet_move_delta(color, piece, from, to) ^ piece_key(color.opponent(), captured, to)
}

/// Pawn takes en passant; the victim sits on `captured_sq`, not on `to`.
#[inline]
#[must_use]
pub(crate) fn en_passant_capture_delta(
    color: Color,
    from: Square,
    to: Square,
    captured_sq: Square,
) -> u64 {
    quiet_move_delta(color, Piece::Pawn, from, to)
        ^ piece_key(color.opponent(), Piece::Pawn, captured_sq)
}

#[inline]
#[must_use]
pub(crate) fn promotion_delta(
    color: Color,
    from: Square,
    to: Square,
    promoted: Piece,
    captured: Option<Piece>,
) -> u64 {
    let mut delta = piece_key(color, Piece::Pawn, from) ^ piece_key(color, promoted, to);
    if let Some(victim) = captured {
        delta ^= piece_key(color.opponent(), victim, to);
    }
    delta
}

#[inline]
#[must_use]
pub(crate) fn castle_delta(
    color: Color,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    rook_to: Square,
) -> u64 {
    quiet_move_delta(color, Piece::King, king_from, king_to)
        ^ quiet_move_delta(color, Piece::Rook, rook_from, rook_to)
}

#[inline]
#[must_use]
pub(crate) fn castling_rights_delta(old: CastlingRights, new: CastlingRights) -> u64 {
    if old == new {
        0
    } else {
        ZOBRIST.castling[old.as_u8() as usize] ^ ZOBRIST.castling[new.as_u8() as usize]
    }
}

/// Files are 0-7, `NO_EN_PASSANT` for none.
#[inline]
#[must_use]
pub(crate) fn en_passant_delta(old_file: u8, new_file: u8) -> u64 {
    if old_file == new_file {
        0
    } else {
        ZOBRIST.en_passant[old_file as usize] ^ ZOBRIST.en_passant[new_file as usize]
    }
}

/// Hash a position from scratch.
#[must_use]
pub(crate) fn full_hash(
    placement: &Placement,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant_file: u8,
) -> u64 {
    let mut hash = 0u64;
    for color in Color::BOTH {
        for piece in Piece::ALL {
            for sq in placement.pieces(color, piece) {
                hash ^= piece_key(color, piece, sq);
            }
        }
    }
    hash ^= ZOBRIST.castling[castling.as_u8() as usize];
    hash ^= ZOBRIST.en_passant[en_passant_file as usize];
    if side_to_move == Color::Black {
        hash ^= ZOBRIST.black_to_move;
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_reproducible_and_distinct() {
        let fresh = ZobristKeys::new();
        assert_eq!(fresh.pieces[0][0][8], ZOBRIST.pieces[0][0][8]);
        assert_eq!(fresh.black_to_move, ZOBRIST.black_to_move);
        assert_ne!(ZOBRIST.castling[0], ZOBRIST.castling[15]);
        assert_ne!(ZOBRIST.en_passant[0], ZOBRIST.en_passant[8]);
    }

    #[test]
    fn deltas_cancel() {
        let delta = capture_delta(Color::White, Piece::Knight, Square::B1, Square::C1, Piece::Rook);
        assert_ne!(delta, 0);
        assert_eq!(delta ^ delta, 0);
        assert_eq!(en_passant_delta(3, 3), 0);
        assert_eq!(
            castling_rights_delta(CastlingRights::all(), CastlingRights::all()),
            0
        );
    }
}
