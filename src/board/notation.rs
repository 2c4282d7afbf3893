//! Human-readable move formatting.

use super::state::Position;
use super::types::{Move, MoveKind};

impl Position {
    /// Format a move generated from this position.
    ///
    /// Coordinates for ordinary moves (`e2e4`), `O-O`/`O-O-O` for castling, `=Q` style
    /// promotion suffixes, then `+` for check or `#` for mate. The position is not modified.
    #[must_use]
    pub fn format_move(&self, mv: Move) -> String {
        let mut text = match mv.kind() {
            MoveKind::Castle { kingside: true } => "O-O".to_string(),
            MoveKind::Castle { kingside: false } => "O-O-O".to_string(),
            MoveKind::Promotion(piece) => format!(
                "{}{}={}",
                mv.from(),
                mv.to(),
                piece.to_char().to_ascii_uppercase()
            ),
            MoveKind::Standard | MoveKind::EnPassant => format!("{}{}", mv.from(), mv.to()),
        };

        if self.gives_check(mv) {
            let mut after = self.clone();
            after.make_move(mv);
            text.push(if after.generate_moves().is_empty() { '#' } else { '+' });
        }
        text
    }

    /// Format a line of moves starting from this position.
    #[must_use]
    pub fn format_line(&self, line: &[Move]) -> String {
        let mut pos = self.clone();
        let mut parts = Vec::with_capacity(line.len());
        for &mv in line {
            if !pos.is_legal(mv) {
                break;
            }
            parts.push(pos.format_move(mv));
            pos.make_move(mv);
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(fen: &str, uci: &str) -> String {
        let pos = Position::from_fen(fen).unwrap();
        let mv = pos.parse_move(uci).unwrap();
        pos.format_move(mv)
    }

    #[test]
    fn coordinates_and_castling() {
        assert_eq!(fmt(crate::board::START_FEN, "e2e4"), "e2e4");
        assert_eq!(fmt("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"), "O-O");
        assert_eq!(fmt("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8c8"), "O-O-O");
    }

    #[test]
    fn promotion_check_and_mate() {
        assert_eq!(fmt("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8q"), "a7a8=Q+");
        assert_eq!(fmt("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8n"), "a7a8=N");
        assert_eq!(fmt("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", "e1e8"), "e1e8#");
        assert_eq!(fmt("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1c1"), "O-O-O");
        assert_eq!(fmt("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1c1"), "O-O-O+");
    }

    #[test]
    fn formatting_leaves_position_untouched() {
        let pos = Position::new();
        let before = pos.clone();
        let line: Vec<Move> = ["e2e4", "e7e5", "d1h5"]
            .iter()
            .scan(pos.clone(), |p, uci| {
                let mv = p.parse_move(uci).ok()?;
                p.make_move(mv);
                Some(mv)
            })
            .collect();
        assert_eq!(pos.format_line(&line), "e2e4 e7e5 d1h5");
        assert_eq!(pos, before);
    }
}
