use super::alphabeta::SearchContext;
use super::constants::{MATE_SCORE, MAX_PLY};
use super::move_order::order_moves;
use crate::board::{Move, MoveList};

impl SearchContext<'_> {
    /// Search captures, promotions and a few quiet checks until the position is quiet.
    ///
    /// Stand-pat bounds the score from below unless in check, where every evasion is searched
    /// and mate is detected. `qply` counts quiescence plies; at `max_qsearch_depth` the static
    /// evaluation is returned.
    pub(crate) fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: usize, qply: u32) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.visit(ply);

        let params = self.params;
        let at_cap = qply >= params.max_qsearch_depth || ply >= MAX_PLY - 1;

        if self.pos.in_check() {
            let evasions = self.pos.generate_moves();
            if evasions.is_empty() {
                return -MATE_SCORE + ply as i32;
            }
            if at_cap {
                return self.pos.evaluate();
            }
            return self.search_noisy(&evasions, alpha, beta, ply, qply);
        }

        let stand_pat = self.pos.evaluate();
        if at_cap {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let noisy = self.pos.generate_noisy_moves();
        alpha = self.search_noisy(&noisy, alpha, beta, ply, qply);
        if self.aborted || alpha >= beta {
            return alpha;
        }

        if qply < params.qsearch_check_plies && params.max_qsearch_checks > 0 {
            let mut checks = self.pos.generate_quiet_checks();
            let mut kept = 0;
            checks.retain(|_: Move| {
                kept += 1;
                kept <= params.max_qsearch_checks
            });
            alpha = self.search_noisy(&checks, alpha, beta, ply, qply);
        }
        alpha
    }

    /// Fail-hard loop shared by the quiescence move classes. Returns `beta` on a cutoff.
    fn search_noisy(
        &mut self,
        moves: &MoveList,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        qply: u32,
    ) -> i32 {
        let ordered = order_moves(&*self.pos, moves, None, self.params);
        for scored in ordered.iter() {
            let mv = scored.mv;
            self.pos.make_move(mv);
            let score = -self.quiescence(-beta, -alpha, ply + 1, qply + 1);
            self.pos.unmake_move(mv);

            if self.aborted {
                return 0;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}
