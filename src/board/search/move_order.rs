//! Move ordering utilities for search.

use super::constants::TT_MOVE_SCORE;
use super::params::SearchParams;
use crate::board::attack_tables::PAWN_ATTACKS;
use crate::board::types::{Move, MoveList, Piece, ScoredMoveList};
use crate::board::Position;

/// Heuristic ordering score; higher is searched first.
///
/// Captures get the bias plus ten times the victim's value less the attacker's, promotions the
/// promoted piece's value, and a move onto a square an enemy pawn attacks loses the mover's value.
pub(crate) fn score_move(pos: &Position, mv: Move, params: &SearchParams) -> i32 {
    let Some((us, moved)) = pos.piece_at(mv.from()) else {
        return 0;
    };
    let mut score = 0;

    if mv.is_capture() {
        let victim = if mv.is_en_passant() {
            Piece::Pawn
        } else {
            pos.piece_at(mv.to()).map_or(Piece::Pawn, |(_, p)| p)
        };
        score += params.capture_bias + 10 * victim.value() - moved.value();
    }

    if let Some(promoted) = mv.promotion_piece() {
        score += promoted.value();
    }

    let enemy_pawns = pos.pieces(us.opponent(), Piece::Pawn);
    if (PAWN_ATTACKS[us.index()][mv.to().index()] & enemy_pawns).any() {
        score -= params.pawn_attack_penalty * moved.value();
    }

    score
}

/// Score and sort `moves`, putting `tt_move` first when present.
pub(crate) fn order_moves(
    pos: &Position,
    moves: &MoveList,
    tt_move: Option<Move>,
    params: &SearchParams,
) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = if Some(mv) == tt_move {
            TT_MOVE_SCORE
        } else {
            score_move(pos, mv, params)
        };
        scored.push(mv, score);
    }
    scored.sort_by_score_desc();
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered(fen: &str) -> Vec<String> {
        let pos = Position::from_fen(fen).unwrap();
        let moves = pos.generate_moves();
        order_moves(&pos, &moves, None, &SearchParams::default())
            .iter()
            .map(|s| s.mv.to_string())
            .collect()
    }

    #[test]
    fn captures_sort_before_quiet_moves() {
        // Rook takes queen, pawn takes knight, and a pile of quiet moves.
        let order = ordered("4k3/8/8/3q4/8/2n5/1P6/3RK3 w - - 0 1");
        assert_eq!(order[0], "d1d5");
        assert_eq!(order[1], "b2c3");
    }

    #[test]
    fn tt_move_goes_first() {
        let pos = Position::new();
        let moves = pos.generate_moves();
        let tt = pos.parse_move("g1f3").unwrap();
        let list = order_moves(&pos, &moves, Some(tt), &SearchParams::default());
        assert_eq!(list.as_slice()[0].mv, tt);
        assert_eq!(list.len(), 20);
    }

    #[test]
    fn pawn_attacked_destination_is_penalised() {
        let pos = Position::from_fen("4k3/8/8/2p5/8/8/8/3QK3 w - - 0 1").unwrap();
        let params = SearchParams::default();
        let into_pawn = pos.parse_move("d1d4").unwrap();
        let safe = pos.parse_move("d1d3").unwrap();
        assert_eq!(score_move(&pos, into_pawn, &params), -Piece::Queen.value());
        assert_eq!(score_move(&pos, safe, &params), 0);
    }

    #[test]
    fn promotion_bonus_uses_promoted_piece() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let params = SearchParams::default();
        let queen = pos.parse_move("a7a8q").unwrap();
        let knight = pos.parse_move("a7a8n").unwrap();
        assert!(score_move(&pos, queen, &params) > score_move(&pos, knight, &params));
    }
}
