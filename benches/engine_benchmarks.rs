//! Benchmarks for move generation and search throughput.

use std::sync::atomic::AtomicBool;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_core::board::{search, Position, SearchConfig, SearchState, DEFAULT_TT_MB};
use chess_core::TranspositionTable;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn position(fen: &str) -> Position {
    Position::from_fen(fen).expect("benchmark fen is valid")
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Position::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let mut kiwipete = position(KIWIPETE);
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, fen) in [
        ("startpos", chess_core::board::START_FEN),
        ("middlegame", MIDDLEGAME),
        ("kiwipete", KIWIPETE),
    ] {
        let pos = position(fen);
        group.bench_function(BenchmarkId::new("legal", name), |b| {
            b.iter(|| black_box(pos.generate_moves()))
        });
        group.bench_function(BenchmarkId::new("noisy", name), |b| {
            b.iter(|| black_box(pos.generate_noisy_moves()))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let stop = AtomicBool::new(false);

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            let mut state = SearchState::new(DEFAULT_TT_MB);
            b.iter(|| {
                let mut pos = Position::new();
                search(&mut pos, &mut state, &SearchConfig::depth(depth), &stop)
            })
        });
    }

    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            let mut state = SearchState::new(DEFAULT_TT_MB);
            b.iter(|| {
                let mut pos =
                    position("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
                search(&mut pos, &mut state, &SearchConfig::depth(depth), &stop)
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    for (name, fen) in [
        ("startpos", chess_core::board::START_FEN),
        ("middlegame", MIDDLEGAME),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ] {
        let pos = position(fen);
        group.bench_with_input(BenchmarkId::new("position", name), &pos, |b, pos| {
            b.iter(|| black_box(pos.evaluate()))
        });
    }

    group.finish();
}

fn bench_tt(c: &mut Criterion) {
    let mut tt = TranspositionTable::new(DEFAULT_TT_MB);
    let mut key = 0x9E37_79B9_7F4A_7C15u64;

    c.bench_function("tt/store_probe", |b| {
        b.iter(|| {
            key = key.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            tt.store(key, 4, chess_core::tt::BoundType::Exact, 17, None);
            black_box(tt.probe(key, 4, -100, 100))
        })
    });
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_search,
    bench_eval,
    bench_tt
);
criterion_main!(benches);
