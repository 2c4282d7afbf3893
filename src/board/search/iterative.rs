use log::{debug, info, trace, warn};

use super::alphabeta::SearchContext;
use super::constants::{mate_in, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use super::move_order::order_moves;
use super::{SearchInfoCallback, SearchIterationInfo, SearchResult};
use crate::board::Move;

impl SearchContext<'_> {
    /// Iterative deepening from depth 1 to `max_depth`.
    ///
    /// A depth interrupted by cancellation is thrown away and the last completed depth's move
    /// and score are reported. If not even depth 1 finishes, the first move in ordered sequence
    /// is returned so the caller always gets a move when one exists.
    pub(crate) fn iterative_deepening(
        &mut self,
        max_depth: u32,
        info_callback: Option<&SearchInfoCallback>,
    ) -> SearchResult {
        let moves = self.pos.generate_moves();
        if moves.is_empty() {
            let score = if self.pos.in_check() { -MATE_SCORE } else { 0 };
            warn!("search started in a position with no legal moves");
            return self.result(None, score, 0, Vec::new(), false);
        }

        let fallback = order_moves(&*self.pos, &moves, None, self.params)
            .iter()
            .next()
            .map(|s| s.mv);

        let mut best_move = None;
        let mut best_score = 0;
        let mut completed = 0;
        let mut pv = Vec::new();

        for depth in 1..=max_depth.max(1) {
            self.root_best = None;
            let score = self.alphabeta(depth, -INFINITY, INFINITY, 0);

            if self.aborted {
                trace!(
                    "discarding depth {depth} after {} nodes: search cancelled",
                    self.stats.nodes
                );
                break;
            }

            best_move = self.root_best.or(best_move);
            best_score = score;
            completed = depth;
            pv = self.extract_pv(best_move, depth as usize);

            let elapsed = self.start_time.elapsed();
            debug!(
                "depth {depth} score {score} nodes {} time {}ms best {}",
                self.stats.nodes,
                elapsed.as_millis(),
                best_move.map_or_else(|| "none".to_string(), |m| m.to_string())
            );

            if let Some(cb) = info_callback {
                let time_ms = elapsed.as_millis() as u64;
                let nps = if time_ms > 0 {
                    self.stats.nodes * 1000 / time_ms
                } else {
                    0
                };
                cb(&SearchIterationInfo {
                    depth,
                    seldepth: self.stats.seldepth,
                    nodes: self.stats.nodes,
                    nps,
                    time_ms,
                    score,
                    mate_in: mate_in(score),
                    pv: pv.clone(),
                    tt_hits: self.stats.tt_hits,
                });
            }

            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        let cancelled = self.aborted;
        if best_move.is_none() {
            best_move = fallback;
            pv = fallback.into_iter().collect();
        }
        let result = self.result(best_move, best_score, completed, pv, cancelled);
        info!(
            "search finished: depth {} score {} nodes {} time {}ms best {}",
            result.depth,
            result.score,
            result.nodes,
            result.elapsed.as_millis(),
            result
                .best_move
                .map_or_else(|| "none".to_string(), |m| m.to_string())
        );
        result
    }

    /// Principal variation: the root move, then best moves followed through the table.
    ///
    /// Stops at the first missing or illegal move or when a position repeats.
    pub(crate) fn extract_pv(&mut self, root: Option<Move>, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen = Vec::with_capacity(max_len);
        let mut next = root;

        while let Some(mv) = next {
            if pv.len() >= max_len || seen.contains(&self.pos.hash()) || !self.pos.is_legal(mv) {
                break;
            }
            seen.push(self.pos.hash());
            self.pos.make_move(mv);
            pv.push(mv);
            next = self.tt.best_move(self.pos.hash());
        }

        for &mv in pv.iter().rev() {
            self.pos.unmake_move(mv);
        }
        pv
    }

    fn result(
        &self,
        best_move: Option<Move>,
        score: i32,
        depth: u32,
        pv: Vec<Move>,
        cancelled: bool,
    ) -> SearchResult {
        SearchResult {
            best_move,
            score,
            depth,
            seldepth: self.stats.seldepth,
            nodes: self.stats.nodes,
            tt_hits: self.stats.tt_hits,
            elapsed: self.start_time.elapsed(),
            pv,
            cancelled,
        }
    }
}
