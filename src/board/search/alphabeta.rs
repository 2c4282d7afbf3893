//! Fail-hard negamax alpha-beta over the legal move tree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::constants::{score_from_tt, score_to_tt, MATE_SCORE, MAX_PLY};
use super::move_order::order_moves;
use super::params::SearchParams;
use super::SearchStats;
use crate::board::{Move, Position};
use crate::tt::{BoundType, TranspositionTable};

/// Everything one search call mutates, borrowed for its duration.
pub(crate) struct SearchContext<'a> {
    pub pos: &'a mut Position,
    pub tt: &'a mut TranspositionTable,
    pub params: &'a SearchParams,
    pub stop: &'a AtomicBool,
    pub start_time: Instant,
    pub time_limit: Option<Duration>,
    pub node_limit: u64,
    pub stats: SearchStats,
    /// Set once cancellation is observed; every frame then unwinds.
    pub aborted: bool,
    /// Best root move of the iteration in progress.
    pub root_best: Option<Move>,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(
        pos: &'a mut Position,
        tt: &'a mut TranspositionTable,
        params: &'a SearchParams,
        stop: &'a AtomicBool,
    ) -> Self {
        SearchContext {
            pos,
            tt,
            params,
            stop,
            start_time: Instant::now(),
            time_limit: None,
            node_limit: 0,
            stats: SearchStats::default(),
            aborted: false,
            root_best: None,
        }
    }

    /// Polled once per node. The clock is only read every 1024 nodes.
    pub(crate) fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        let hit = self.stop.load(Ordering::Relaxed)
            || (self.node_limit > 0 && self.stats.nodes >= self.node_limit)
            || (self.stats.nodes.trailing_zeros() >= 10
                && self
                    .time_limit
                    .is_some_and(|limit| self.start_time.elapsed() >= limit));
        if hit {
            self.aborted = true;
        }
        hit
    }

    pub(crate) fn visit(&mut self, ply: usize) {
        self.stats.nodes += 1;
        self.stats.seldepth = self.stats.seldepth.max(ply as u32);
    }

    /// Negamax with alpha-beta bounds; scores are relative to the side to move.
    pub(crate) fn alphabeta(&mut self, depth: u32, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.visit(ply);

        if ply > 0
            && (self.pos.is_repetition()
                || self.pos.is_fifty_move_draw()
                || self.pos.is_insufficient_material())
        {
            return 0;
        }

        if depth == 0 {
            return self.quiescence(alpha, beta, ply, 0);
        }

        let hash = self.pos.hash();
        if ply > 0 {
            let hit = self.tt.probe(
                hash,
                depth,
                score_to_tt(alpha, ply),
                score_to_tt(beta, ply),
            );
            if let Some(score) = hit {
                self.stats.tt_hits += 1;
                return score_from_tt(score, ply);
            }
        }

        let moves = self.pos.generate_moves();
        if moves.is_empty() {
            return if self.pos.in_check() {
                -MATE_SCORE + ply as i32
            } else {
                0
            };
        }
        if ply >= MAX_PLY - 1 {
            return self.pos.evaluate();
        }

        let tt_move = self.tt.best_move(hash);
        let ordered = order_moves(&*self.pos, &moves, tt_move, self.params);
        let mut best_move = None;

        for scored in ordered.iter() {
            let mv = scored.mv;
            self.pos.make_move(mv);
            let score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1);
            self.pos.unmake_move(mv);

            if self.aborted {
                return 0;
            }
            if score >= beta {
                self.tt.store(
                    hash,
                    depth,
                    BoundType::LowerBound,
                    score_to_tt(beta, ply),
                    Some(mv),
                );
                if ply == 0 {
                    self.root_best = Some(mv);
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                if ply == 0 {
                    self.root_best = Some(mv);
                }
            }
        }

        let bound = if best_move.is_some() {
            BoundType::Exact
        } else {
            BoundType::UpperBound
        };
        self.tt
            .store(hash, depth, bound, score_to_tt(alpha, ply), best_move);
        alpha
    }
}
