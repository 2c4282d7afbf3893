/// Tunable search settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    /// Transposition table size in megabytes.
    pub tt_mb: usize,
    /// Deepest iterative-deepening iteration.
    pub max_depth: u32,
    /// Quiescence plies before the static evaluation is returned.
    pub max_qsearch_depth: u32,
    /// Quiescence plies in which quiet checking moves are also searched.
    pub qsearch_check_plies: u32,
    /// Quiet checks tried per quiescence node.
    pub max_qsearch_checks: usize,
    /// Added to every capture so it sorts ahead of quiet moves.
    pub capture_bias: i32,
    /// Scales the moved piece's value when its destination is attacked by an enemy pawn.
    pub pawn_attack_penalty: i32,
}

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 16;

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            tt_mb: DEFAULT_TT_MB,
            max_depth: 64,
            max_qsearch_depth: 8,
            qsearch_check_plies: 2,
            max_qsearch_checks: 8,
            capture_bias: 10_000,
            pawn_attack_penalty: 1,
        }
    }
}
