use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::{FenError, MoveParseError, ReplayError};
use super::placement::Placement;
use super::state::Position;
use super::types::{CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::NO_EN_PASSANT;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest accepted halfmove clock or fullmove number, far below where play could overflow them.
pub const MAX_FEN_CLOCK: u32 = 1_000_000;

/// The six FEN fields, syntactically checked.
///
/// The placement field is kept as text; `Position::from_record` validates it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FenRecord {
    pub placement: String,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FromStr for FenRecord {
    type Err = FenError;

    /// Parse FEN text. The two clock fields may be omitted (defaults 0 and 1).
    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.set(Color::White, true),
                    'Q' => castling.set(Color::White, false),
                    'k' => castling.set(Color::Black, true),
                    'q' => castling.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            text => {
                let invalid = || FenError::InvalidEnPassant {
                    found: text.to_string(),
                };
                let sq: Square = text.parse().map_err(|_| invalid())?;
                if sq.rank() != side_to_move.en_passant_target_rank() {
                    return Err(invalid());
                }
                Some(sq)
            }
        };

        let halfmove_clock = match parts.get(4) {
            Some(text) => match text.parse::<u32>() {
                Ok(n) if n <= MAX_FEN_CLOCK => n,
                _ => {
                    return Err(FenError::InvalidHalfmoveClock {
                        found: (*text).to_string(),
                    })
                }
            },
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(text) => match text.parse::<u32>() {
                Ok(n) if (1..=MAX_FEN_CLOCK).contains(&n) => n,
                _ => {
                    return Err(FenError::InvalidFullmoveNumber {
                        found: (*text).to_string(),
                    })
                }
            },
            None => 1,
        };

        Ok(FenRecord {
            placement: parts[0].to_string(),
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}

impl fmt::Display for FenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement, side, self.castling, ep, self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_placement(text: &str) -> Result<Placement, FenError> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut placement = Placement::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let sq = Square::from_coords(rank, file).ok_or(FenError::WrongFileCount {
                rank: rank + 1,
                files: file + 1,
            })?;
            if piece == Piece::Pawn && (rank == 0 || rank == 7) {
                return Err(FenError::PawnOnBackRank {
                    square: sq.to_string(),
                });
            }
            placement.put(sq, color, piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::WrongFileCount {
                rank: rank + 1,
                files: file,
            });
        }
    }

    for color in Color::BOTH {
        let kings = placement.pieces(color, Piece::King).popcount();
        if kings != 1 {
            return Err(FenError::KingCount {
                color,
                found: kings,
            });
        }
    }
    Ok(placement)
}

impl Position {
    /// Parse a position from FEN text.
    ///
    /// Every field is validated before the position is built.
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Position;
    ///
    /// let pos = Position::from_fen("8/8/8/8/8/8/8/K6k b - - 3 40").unwrap();
    /// assert_eq!(pos.halfmove_clock(), 3);
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let record: FenRecord = fen.parse()?;
        Position::from_record(&record)
    }

    /// Build a position from a parsed FEN record.
    pub fn from_record(record: &FenRecord) -> Result<Self, FenError> {
        let placement = parse_placement(&record.placement)?;
        let en_passant_file = match record.en_passant {
            Some(sq) if sq.rank() == record.side_to_move.en_passant_target_rank() => {
                sq.file() as u8
            }
            Some(sq) => {
                return Err(FenError::InvalidEnPassant {
                    found: sq.to_string(),
                })
            }
            None => NO_EN_PASSANT,
        };
        let pos = Position::assemble(
            placement,
            record.side_to_move,
            record.castling,
            en_passant_file,
            record.halfmove_clock,
            record.fullmove_number,
        );

        // The side that just moved may not have left its king attacked.
        let waiting = record.side_to_move.opponent();
        if let Some(king) = pos.king_square(waiting) {
            if pos.is_square_attacked(king, record.side_to_move) {
                return Err(FenError::OpponentInCheck { color: waiting });
            }
        }
        Ok(pos)
    }

    /// The position as a FEN record.
    #[must_use]
    pub fn to_record(&self) -> FenRecord {
        let mut placement = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }
        FenRecord {
            placement,
            side_to_move: self.side_to_move,
            castling: self.castling_rights,
            en_passant: self.en_passant_square(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        self.to_record().to_string()
    }

    /// Parse a move in coordinate notation (e.g. "e2e4", "e7e8q") and check it is legal here.
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&uci.len()) || !uci.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.generate_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a coordinate move and make it in one call.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv);
        Ok(mv)
    }

    /// Replay a stored sequence of packed moves.
    ///
    /// Each move must be legal where it is played. On failure the position is restored to what
    /// it was before the call.
    pub fn replay(&mut self, moves: &[Move]) -> Result<(), ReplayError> {
        for (ply, &mv) in moves.iter().enumerate() {
            if !self.is_legal(mv) {
                for &played in moves[..ply].iter().rev() {
                    self.unmake_move(played);
                }
                return Err(ReplayError::IllegalMove {
                    ply,
                    raw: mv.as_u16(),
                });
            }
            self.make_move(mv);
        }
        Ok(())
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 12 57",
        ];
        for fen in fens {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
        }
    }

    #[test]
    fn test_start_fen_matches_new() {
        assert_eq!(Position::from_fen(START_FEN).unwrap(), Position::new());
    }

    #[test]
    fn test_clock_fields_are_optional() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b -").unwrap_err();
        assert_eq!(pos, FenError::TooFewParts { found: 3 });
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn test_fen_errors() {
        let cases = [
            ("4k3/8/8/8/8/8/8/4K3 x - - 0 1", "side"),
            ("4k3/8/8/8/8/8/8/4K3 w X - 0 1", "castling"),
            ("4k3/8/8/8/8/8/8/4K3 w - e3 0 1", "ep rank"),
            ("4k3/8/8/8/8/8/8/4K3 w - z9 0 1", "ep square"),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", "halfmove"),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 0", "fullmove"),
            ("4k3/8/8/8/8/8/4K3 w - - 0 1", "ranks"),
            ("4k3/8/8/8/8/8/8/4K4 w - - 0 1", "files"),
            ("4k3/8/8/8/8/8/8/4KK2 w - - 0 1", "kings"),
            ("8/8/8/8/8/8/8/4K3 w - - 0 1", "no black king"),
            ("4k3/8/8/8/8/8/8/4K2P w - - 0 1", "pawn"),
            ("4k3/8/8/8/8/8/8/4K2X w - - 0 1", "piece"),
        ];
        for (fen, what) in cases {
            assert!(Position::from_fen(fen).is_err(), "{what}: {fen}");
        }
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4KK2 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::White,
                found: 2
            })
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1"),
            Err(FenError::InvalidPiece { char: 'X' })
        );
    }

    #[test]
    fn test_opponent_in_check_is_rejected() {
        // White to move while the black king on e8 stands in the rook's line.
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1"),
            Err(FenError::OpponentInCheck {
                color: Color::Black
            })
        );
        assert_eq!(
            Position::from_fen("6k1/pp4pp/8/8/8/8/PP4PP/1q4K1 b - - 0 1"),
            Err(FenError::OpponentInCheck {
                color: Color::White
            })
        );
        // The side to move may be in check.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").unwrap();
        assert!(pos.in_check());
        assert!(pos.generate_moves().iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_clocks_are_bounded() {
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295"),
            Err(FenError::InvalidFullmoveNumber { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 4294967295 1"),
            Err(FenError::InvalidHalfmoveClock { .. })
        ));

        let fen = format!("4k3/8/8/8/8/8/8/4K3 b - - {MAX_FEN_CLOCK} {MAX_FEN_CLOCK}");
        let mut pos = Position::from_fen(&fen).unwrap();
        let mv = pos.make_move_uci("e8d8").unwrap();
        assert_eq!(pos.halfmove_clock(), MAX_FEN_CLOCK + 1);
        assert_eq!(pos.fullmove_number(), MAX_FEN_CLOCK + 1);
        pos.unmake_move(mv);
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn test_record_fields() {
        let record: FenRecord = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w Kq e6 0 2"
            .parse()
            .unwrap();
        assert_eq!(record.side_to_move, Color::White);
        assert!(record.castling.has(Color::White, true));
        assert!(!record.castling.has(Color::White, false));
        assert_eq!(record.en_passant, Some("e6".parse().unwrap()));
        let pos = Position::from_record(&record).unwrap();
        assert_eq!(pos.en_passant_file(), Some(4));
    }

    #[test]
    fn test_parse_move() {
        let pos = Position::new();
        let mv = pos.parse_move("e2e4").unwrap();
        assert!(mv.is_double_pawn_push());
        assert_eq!(
            pos.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove {
                notation: "e2e5".to_string()
            })
        );
        assert_eq!(
            pos.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert!(matches!(
            pos.parse_move("z2e4"),
            Err(MoveParseError::InvalidSquare { .. })
        ));

        let promo = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = promo.parse_move("a7a8n").unwrap();
        assert_eq!(mv.promotion_piece(), Some(Piece::Knight));
        assert_eq!(
            promo.parse_move("a7a8k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
        assert!(promo.parse_move("a7a8").is_err());
    }

    #[test]
    fn test_replay_restores_on_failure() {
        let mut pos = Position::new();
        let e4 = pos.parse_move("e2e4").unwrap();
        let mut after = pos.clone();
        after.make_move(e4);
        let e5 = after.parse_move("e7e5").unwrap();

        let original = pos.clone();
        let err = pos.replay(&[e4, e5, e4]).unwrap_err();
        assert_eq!(
            err,
            ReplayError::IllegalMove {
                ply: 2,
                raw: e4.as_u16()
            }
        );
        assert_eq!(pos, original);

        pos.replay(&[e4, e5]).unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }
}
