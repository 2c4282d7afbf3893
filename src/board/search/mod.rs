//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening, discarding cancelled iterations
//! - Fail-hard negamax alpha-beta with transposition table cutoffs
//! - Quiescence search with stand-pat, evasions in check and bounded quiet checks
//! - Move ordering (TT move, captures, promotions, pawn-attacked penalty)
//! - Cooperative cancellation through a shared stop flag, a deadline or a node limit

mod alphabeta;
mod constants;
mod iterative;
mod move_order;
mod params;
mod quiescence;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::tt::TranspositionTable;

use super::{Move, Position};
use alphabeta::SearchContext;
pub use constants::{mate_in, INFINITY, MATE_SCORE, MATE_THRESHOLD, MAX_PLY};
pub use params::{SearchParams, DEFAULT_TT_MB};

/// Outcome of a search with its telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found, `None` only when there is no legal move
    pub best_move: Option<Move>,
    /// Score of the last completed depth, relative to the side to move
    pub score: i32,
    /// Last fully completed iteration
    pub depth: u32,
    /// Deepest ply reached, quiescence included
    pub seldepth: u32,
    pub nodes: u64,
    pub tt_hits: u64,
    pub elapsed: Duration,
    /// Principal variation starting with `best_move`
    pub pv: Vec<Move>,
    /// The search was interrupted before reaching its depth limit
    pub cancelled: bool,
}

impl SearchResult {
    /// Moves to mate, negative when the side to move is getting mated.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        constants::mate_in(self.score)
    }
}

/// Statistics tracked during search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub seldepth: u32,
    pub tt_hits: u64,
}

/// Search state persisted across searches: the table and the tuning parameters.
#[derive(Debug)]
pub struct SearchState {
    pub tt: TranspositionTable,
    pub params: SearchParams,
    /// Statistics of the most recent search
    pub stats: SearchStats,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState::with_params(SearchParams {
            tt_mb,
            ..SearchParams::default()
        })
    }

    #[must_use]
    pub fn with_params(params: SearchParams) -> Self {
        SearchState {
            tt: TranspositionTable::new(params.tt_mb),
            params,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        if params.tt_mb != self.params.tt_mb {
            self.tt = TranspositionTable::new(params.tt_mb);
        }
        self.params = params;
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::with_params(SearchParams::default())
    }
}

// ============================================================================
// UNIFIED SEARCH API
// ============================================================================

/// Configuration for a search operation.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = `SearchParams::max_depth`)
    pub max_depth: Option<u32>,
    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Node limit (0 = unlimited)
    pub node_limit: u64,
    /// Optional callback for iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Create a time-limited search config
    #[must_use]
    pub fn time(time_limit_ms: u64) -> Self {
        SearchConfig {
            time_limit_ms,
            ..Default::default()
        }
    }

    /// Set node limit
    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Attach a callback for iteration info reporting.
    #[must_use]
    pub fn with_info_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("max_depth", &self.max_depth)
            .field("time_limit_ms", &self.time_limit_ms)
            .field("node_limit", &self.node_limit)
            .field("info_callback", &self.info_callback.is_some())
            .finish()
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub seldepth: u32,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub score: i32,
    pub mate_in: Option<i32>,
    pub pv: Vec<Move>,
    pub tt_hits: u64,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Run a search on `position` and return the best move with telemetry.
///
/// The table is cleared first, so a fixed-depth search of a position always gives the same
/// result. `position` is left exactly as it was handed in, even when `stop` interrupts the
/// search.
///
/// # Example
/// ```
/// use std::sync::atomic::AtomicBool;
/// use chess_core::board::{search, Position, SearchConfig, SearchState};
///
/// let mut pos = Position::new();
/// let mut state = SearchState::new(1);
/// let result = search(&mut pos, &mut state, &SearchConfig::depth(3), &AtomicBool::new(false));
/// assert!(result.best_move.is_some());
/// ```
pub fn search(
    position: &mut Position,
    state: &mut SearchState,
    config: &SearchConfig,
    stop: &AtomicBool,
) -> SearchResult {
    state.tt.clear();
    let max_depth = config
        .max_depth
        .unwrap_or(state.params.max_depth)
        .min(MAX_PLY as u32 - 1);

    let mut ctx = SearchContext::new(position, &mut state.tt, &state.params, stop);
    ctx.node_limit = config.node_limit;
    if config.time_limit_ms > 0 {
        ctx.time_limit = Some(Duration::from_millis(config.time_limit_ms));
    }
    let result = ctx.iterative_deepening(max_depth, config.info_callback.as_ref());
    state.stats = ctx.stats;
    result
}

/// Find best move with fixed depth limit
pub fn find_best_move(
    position: &mut Position,
    state: &mut SearchState,
    max_depth: u32,
) -> Option<Move> {
    search(position, state, &SearchConfig::depth(max_depth), &AtomicBool::new(false)).best_move
}

/// Search for at most `budget` of wall-clock time.
pub fn find_best_move_with_time(
    position: &mut Position,
    state: &mut SearchState,
    budget: Duration,
) -> SearchResult {
    let config = SearchConfig::time((budget.as_millis() as u64).max(1));
    search(position, state, &config, &AtomicBool::new(false))
}
