use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chess_core::board::{GameStatus, Position, SearchIterationInfo, START_FEN};
use chess_core::EngineController;

const USAGE: &str = "usage: analyze <perft DEPTH | divide DEPTH | moves | search MILLIS> [FEN]";

fn parse_position(fen_parts: &[String]) -> Result<Position, String> {
    let fen = if fen_parts.is_empty() {
        START_FEN.to_string()
    } else {
        fen_parts.join(" ")
    };
    Position::from_fen(&fen).map_err(|e| format!("bad fen '{fen}': {e}"))
}

fn parse_number(arg: Option<&String>) -> Result<u64, String> {
    let arg = arg.ok_or_else(|| USAGE.to_string())?;
    arg.parse()
        .map_err(|_| format!("expected a number, got '{arg}'"))
}

fn run(args: &[String]) -> Result<(), String> {
    let command = args.first().ok_or_else(|| USAGE.to_string())?;
    match command.as_str() {
        "perft" => {
            let depth = parse_number(args.get(1))? as usize;
            let mut pos = parse_position(&args[2..])?;
            let start = Instant::now();
            let nodes = pos.perft(depth);
            let elapsed = start.elapsed();
            let nps = (nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;
            println!("nodes {nodes} time {}ms nps {nps}", elapsed.as_millis());
        }
        "divide" => {
            let depth = parse_number(args.get(1))? as usize;
            let mut pos = parse_position(&args[2..])?;
            let mut total = 0;
            for (mv, count) in pos.divide(depth) {
                println!("{mv}: {count}");
                total += count;
            }
            println!("\ntotal {total}");
        }
        "moves" => {
            let pos = parse_position(&args[1..])?;
            let moves = pos.generate_moves();
            println!("side_to_move: {:?}", pos.side_to_move());
            println!("status: {:?}", pos.status());
            println!("legal_moves: {}", moves.len());
            for &mv in moves.iter() {
                println!("{mv} {}", pos.format_move(mv));
            }
        }
        "search" => {
            let millis = parse_number(args.get(1))?;
            let pos = parse_position(&args[2..])?;
            if pos.status() != GameStatus::Ongoing {
                println!("status: {:?}", pos.status());
                return Ok(());
            }

            let mut engine = EngineController::new(chess_core::board::DEFAULT_TT_MB);
            let line_start = pos.clone();
            engine.set_info_callback(Some(Arc::new(move |info: &SearchIterationInfo| {
                println!(
                    "depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
                    info.depth,
                    info.seldepth,
                    info.score,
                    info.nodes,
                    info.nps,
                    info.time_ms,
                    line_start.format_line(&info.pv)
                );
            })));

            let result = engine
                .think(&pos, Duration::from_millis(millis))
                .map_err(|e| format!("search thread failed: {e}"))?;
            match result.best_move {
                Some(mv) => println!("bestmove {mv} ({})", pos.format_move(mv)),
                None => println!("bestmove (none)"),
            }
        }
        _ => return Err(USAGE.to_string()),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    chess_core::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
