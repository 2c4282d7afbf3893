//! Search algorithm tests.
//!
//! Tests for alpha-beta, quiescence, cancellation and reproducibility.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::board::search::{
    find_best_move, find_best_move_with_time, search, SearchConfig, SearchIterationInfo,
    SearchState, MATE_SCORE,
};
use crate::board::Position;

fn run(fen: &str, depth: u32) -> (Position, crate::board::SearchResult) {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut state = SearchState::new(1);
    let result = search(
        &mut pos,
        &mut state,
        &SearchConfig::depth(depth),
        &AtomicBool::new(false),
    );
    (pos, result)
}

// ============================================================================
// Alpha-beta search tests
// ============================================================================

#[test]
fn alphabeta_finds_mate_in_one() {
    let (_, result) = run("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 3);
    assert_eq!(result.best_move.unwrap().to_string(), "e1e8", "Should find Qe8#");
    assert_eq!(result.score, MATE_SCORE - 1);
    assert_eq!(result.mate_in(), Some(1));
    assert!(!result.cancelled);
}

#[test]
fn alphabeta_handles_stalemate() {
    let (_, result) = run("k7/8/1QK5/8/8/8/8/8 b - - 0 1", 4);
    assert!(result.best_move.is_none(), "Should return None for stalemate");
    assert_eq!(result.score, 0);
}

#[test]
fn alphabeta_returns_none_for_checkmate_position() {
    let (_, result) = run("7k/7Q/7K/8/8/8/8/8 b - - 0 1", 4);
    assert!(result.best_move.is_none());
    assert_eq!(result.score, -MATE_SCORE);
}

#[test]
fn alphabeta_wins_hanging_queen() {
    let (_, result) = run("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 3);
    assert_eq!(result.best_move.unwrap().to_string(), "d1d5");
    assert!(result.score > 300);
}

#[test]
fn quiescence_sees_the_recapture() {
    // Qxd5 wins a pawn at depth 1 only if cxd5 is not considered.
    let (_, result) = run("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1", 1);
    assert_ne!(result.best_move.unwrap().to_string(), "d1d5");
    assert!(result.score > 0);
}

#[test]
fn search_leaves_position_untouched() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let (pos, result) = run(fen, 3);
    assert_eq!(pos, Position::from_fen(fen).unwrap());
    assert!(pos.is_legal(result.best_move.unwrap()));
}

#[test]
fn fixed_depth_search_is_deterministic() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);
    let config = SearchConfig::depth(4);

    let first = search(&mut pos, &mut state, &config, &stop);
    let second = search(&mut pos, &mut state, &config, &stop);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.pv, second.pv);

    let (_, fresh) = run(fen, 4);
    assert_eq!(fresh.best_move, first.best_move);
    assert_eq!(fresh.score, first.score);
}

#[test]
fn principal_variation_is_playable() {
    let (mut pos, result) = run(crate::board::START_FEN, 4);
    assert!(!result.pv.is_empty());
    assert_eq!(result.pv.first().copied(), result.best_move);
    assert!(result.pv.len() <= 4);
    pos.replay(&result.pv).unwrap();
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn pre_cancelled_search_still_returns_a_move() {
    let mut pos = Position::new();
    let before = pos.clone();
    let mut state = SearchState::new(1);
    let result = search(
        &mut pos,
        &mut state,
        &SearchConfig::depth(10),
        &AtomicBool::new(true),
    );
    assert!(result.cancelled);
    assert_eq!(result.depth, 0);
    assert!(result.best_move.is_some());
    assert_eq!(pos, before);
}

#[test]
fn node_limit_cancels_and_restores_position() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    let before = pos.clone();
    let mut state = SearchState::new(1);
    let config = SearchConfig::depth(20).with_nodes(5_000);
    let result = search(&mut pos, &mut state, &config, &AtomicBool::new(false));
    assert!(result.cancelled);
    assert!(result.nodes <= 5_000);
    assert!(result.best_move.is_some());
    assert_eq!(pos, before);
}

#[test]
fn timed_search_returns_a_move() {
    let mut pos = Position::new();
    let mut state = SearchState::new(1);
    let result = find_best_move_with_time(&mut pos, &mut state, Duration::from_millis(100));
    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
    assert!(find_best_move(&mut pos, &mut state, 2).is_some());
}

#[test]
fn info_callback_reports_each_depth() {
    let seen: Arc<Mutex<Vec<SearchIterationInfo>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = SearchConfig::depth(3).with_info_callback(Arc::new(move |info: &SearchIterationInfo| {
        sink.lock().unwrap().push(info.clone());
    }));

    let mut pos = Position::new();
    let mut state = SearchState::new(1);
    let result = search(&mut pos, &mut state, &config, &AtomicBool::new(false));

    let seen = seen.lock().unwrap();
    let depths: Vec<u32> = seen.iter().map(|i| i.depth).collect();
    assert_eq!(depths, [1, 2, 3]);
    assert_eq!(seen[2].nodes, result.nodes);
    assert_eq!(seen[2].pv, result.pv);
    assert_eq!(result.depth, 3);
}
