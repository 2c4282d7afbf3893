use crate::board::placement::en_passant_victim;
use crate::board::state::{Position, UndoInfo};
use crate::board::types::{castle_squares, Color, Move, MoveKind, Piece};
use crate::zobrist::{self, NO_EN_PASSANT};

impl Position {
    /// Apply a legal move, updating the hash incrementally.
    ///
    /// The move must come from `generate_moves` for this position; anything else is a caller
    /// bug, caught by a debug assertion.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opponent();
        let from = mv.from();
        let to = mv.to();

        let Some((owner, moved)) = self.placement.piece_at(from) else {
            debug_assert!(false, "make_move {mv:?}: no piece on {from}");
            return;
        };
        debug_assert_eq!(owner, us, "make_move {mv:?}: moving the opponent's piece");

        let kind = mv.kind();
        let captured = match kind {
            MoveKind::EnPassant => Some(Piece::Pawn),
            MoveKind::Castle { .. } => None,
            _ if mv.is_capture() => self.placement.piece_at(to).map(|(_, piece)| piece),
            _ => None,
        };

        self.undo_stack.push(UndoInfo {
            castling_rights: self.castling_rights,
            en_passant_file: self.en_passant_file,
            captured,
            halfmove_clock: self.halfmove_clock,
        });
        self.hash_history.push(self.hash);

        self.placement.apply_move(mv, us, moved, captured);

        self.hash ^= match kind {
            MoveKind::Standard => match captured {
                Some(victim) => zobrist::capture_delta(us, moved, from, to, victim),
                None => zobrist::quiet_move_delta(us, moved, from, to),
            },
            MoveKind::Castle { kingside } => {
                let (king_from, king_to, rook_from, rook_to) = castle_squares(us, kingside);
                zobrist::castle_delta(us, king_from, king_to, rook_from, rook_to)
            }
            MoveKind::Promotion(promoted) => {
                zobrist::promotion_delta(us, from, to, promoted, captured)
            }
            MoveKind::EnPassant => {
                zobrist::en_passant_capture_delta(us, from, to, en_passant_victim(to, us))
            }
        };

        let old_rights = self.castling_rights;
        if moved == Piece::King {
            self.castling_rights.remove_color(us);
        } else if moved == Piece::Rook {
            self.castling_rights.remove_rook_square(from);
        }
        if captured == Some(Piece::Rook) {
            self.castling_rights.remove_rook_square(to);
        }
        self.hash ^= zobrist::castling_rights_delta(old_rights, self.castling_rights);

        let old_ep = self.en_passant_file;
        self.en_passant_file = if mv.is_double_pawn_push() {
            from.file() as u8
        } else {
            NO_EN_PASSANT
        };
        self.hash ^= zobrist::en_passant_delta(old_ep, self.en_passant_file);

        if moved == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;
        self.hash ^= zobrist::side_key();
    }

    /// Take back the last move made with `make_move`. `mv` must be that move.
    pub fn unmake_move(&mut self, mv: Move) {
        let Some(undo) = self.undo_stack.pop() else {
            debug_assert!(false, "unmake_move {mv:?} with empty history");
            return;
        };
        let previous_hash = self.hash_history.pop();
        debug_assert!(previous_hash.is_some(), "hash history out of sync");

        let us = self.side_to_move.opponent();
        self.side_to_move = us;

        let moved = match mv.kind() {
            MoveKind::Promotion(_) | MoveKind::EnPassant => Piece::Pawn,
            MoveKind::Castle { .. } => Piece::King,
            MoveKind::Standard => match self.placement.piece_at(mv.to()) {
                Some((_, piece)) => piece,
                None => {
                    debug_assert!(false, "unmake_move {mv:?}: destination empty");
                    return;
                }
            },
        };
        self.placement.apply_move(mv, us, moved, undo.captured);

        self.castling_rights = undo.castling_rights;
        self.en_passant_file = undo.en_passant_file;
        self.halfmove_clock = undo.halfmove_clock;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }
        if let Some(hash) = previous_hash {
            self.hash = hash;
        }
    }
}
