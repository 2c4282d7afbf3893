use crate::board::placement::Placement;
use crate::board::types::{Bitboard, CastlingRights, Color, Piece, Square};
use crate::zobrist::{self, NO_EN_PASSANT};

/// Irreversible state saved by `make_move` so `unmake_move` can restore it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UndoInfo {
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: u8,
    pub(crate) captured: Option<Piece>,
    pub(crate) halfmove_clock: u32,
}

/// Why a position is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// Outcome of the side to move's situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is checkmated.
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

/// A chess position: placement plus side to move, castling, en passant, clocks and history.
///
/// Mutated only through `make_move`/`unmake_move`; the undo and hash-history stacks always hold
/// one entry per applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) placement: Placement,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: u8,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    pub(crate) hash_history: Vec<u64>,
    pub(crate) undo_stack: Vec<UndoInfo>,
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut placement = Placement::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            placement.put(Square::from_index(file), Color::White, *piece);
            placement.put(Square::from_index(8 + file), Color::White, Piece::Pawn);
            placement.put(Square::from_index(48 + file), Color::Black, Piece::Pawn);
            placement.put(Square::from_index(56 + file), Color::Black, *piece);
        }
        Position::assemble(placement, Color::White, CastlingRights::all(), NO_EN_PASSANT, 0, 1)
    }

    /// Build a position from already validated parts and hash it from scratch.
    pub(crate) fn assemble(
        placement: Placement,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_file: u8,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        let hash =
            zobrist::full_hash(&placement, side_to_move, castling_rights, en_passant_file);
        Position {
            placement,
            side_to_move,
            castling_rights,
            en_passant_file,
            halfmove_clock,
            fullmove_number,
            hash,
            hash_history: Vec::with_capacity(256),
            undo_stack: Vec::with_capacity(256),
        }
    }

    #[inline]
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// File (0-7) of a pawn that just made a double push, if any
    #[inline]
    #[must_use]
    pub fn en_passant_file(&self) -> Option<u8> {
        (self.en_passant_file != NO_EN_PASSANT).then_some(self.en_passant_file)
    }

    /// Square behind the pawn that just made a double push, if any
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        let file = self.en_passant_file()?;
        Square::from_coords(
            self.side_to_move.en_passant_target_rank(),
            file as usize,
        )
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves applied since this position was loaded
    #[inline]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.placement.piece_at(sq)
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.placement.pieces(color, piece)
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.placement.king_square(color)
    }

    /// Hash recomputed from scratch, for checking the incremental one.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        zobrist::full_hash(
            &self.placement,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_file,
        )
    }

    /// Verify placement invariants, hash agreement and stack synchronisation.
    pub fn validate(&self) -> Result<(), String> {
        self.placement.validate()?;
        if self.hash != self.compute_hash() {
            return Err(format!(
                "hash drift: incremental {:016x}, recomputed {:016x}",
                self.hash,
                self.compute_hash()
            ));
        }
        if self.hash_history.len() != self.undo_stack.len() {
            return Err(format!(
                "history stacks out of sync: {} hashes, {} undo entries",
                self.hash_history.len(),
                self.undo_stack.len()
            ));
        }
        Ok(())
    }

    /// How many earlier positions in the reversible part of the history equal this one.
    fn repetitions(&self) -> usize {
        let window = (self.halfmove_clock as usize).min(self.hash_history.len());
        self.hash_history
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .filter(|&&h| h == self.hash)
            .count()
    }

    /// This position already occurred earlier in the history.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.repetitions() >= 1
    }

    /// Third occurrence of this position.
    #[must_use]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 2
    }

    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can mate: bare kings, a single minor, or only same-coloured bishops.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawn = Color::BOTH.iter().any(|&c| {
            (self.pieces(c, Piece::Pawn) | self.pieces(c, Piece::Rook) | self.pieces(c, Piece::Queen))
                .any()
        });
        if heavy_or_pawn {
            return false;
        }
        let knights = self.pieces(Color::White, Piece::Knight) | self.pieces(Color::Black, Piece::Knight);
        let bishops = self.pieces(Color::White, Piece::Bishop) | self.pieces(Color::Black, Piece::Bishop);
        let minors = knights.popcount() + bishops.popcount();
        if minors <= 1 {
            return true;
        }
        if knights.any() {
            return false;
        }
        let light = (bishops & Bitboard::LIGHT_SQUARES).any();
        let dark = (bishops & !Bitboard::LIGHT_SQUARES).any();
        !(light && dark)
    }

    /// Draw by rule, not counting stalemate
    #[must_use]
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.is_fifty_move_draw() {
            Some(DrawReason::FiftyMoveRule)
        } else if self.is_threefold_repetition() {
            Some(DrawReason::ThreefoldRepetition)
        } else if self.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else {
            None
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.generate_moves().is_empty() {
            if self.in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if let Some(reason) = self.draw_reason() {
            GameStatus::Draw(reason)
        } else {
            GameStatus::Ongoing
        }
    }
}
