//! Search constants.
//!
//! Score bounds and move ordering priorities shared by the alpha-beta search.

// ============================================================================
// SEARCH LIMITS
// ============================================================================

/// Deepest ply the recursive search will reach, quiescence included
pub const MAX_PLY: usize = 128;

/// Score of the side to move being mated at the root; reduced by one per ply
pub const MATE_SCORE: i32 = 30000;

/// Bound outside every reachable score
pub const INFINITY: i32 = 32000;

/// Scores with absolute value >= this are considered checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================

/// Hash move (from transposition table) - highest priority
pub const TT_MOVE_SCORE: i32 = 1 << 20;

/// Convert a node-relative mate score into a root-independent one before storing it.
#[inline]
pub(crate) fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`].
#[inline]
pub(crate) fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Moves to mate for a mate score, negative when the side to move is being mated.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score.abs() < MATE_THRESHOLD {
        None
    } else if score > 0 {
        Some((MATE_SCORE - score + 1) / 2)
    } else {
        Some(-(MATE_SCORE + score + 1) / 2)
    }
}
