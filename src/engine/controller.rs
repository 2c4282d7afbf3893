//! Engine controller implementation.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{trace, warn};
use parking_lot::{Condvar, Mutex};

use crate::board::{
    search, Position, SearchConfig, SearchInfoCallback, SearchParams, SearchResult, SearchState,
};
use crate::book::OpeningBook;

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Lets the search thread release the timer before its deadline.
#[derive(Default)]
struct TimerSignal {
    done: Mutex<bool>,
    cvar: Condvar,
}

impl TimerSignal {
    fn finish(&self) {
        *self.done.lock() = true;
        self.cvar.notify_all();
    }
}

/// Join the timer thread, logging a panic instead of propagating it.
fn join_timer(handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            warn!("search timer thread panicked");
            false
        }
    }
}

/// A search running on a background thread.
pub struct SearchJob {
    stop: Arc<AtomicBool>,
    signal: Arc<TimerSignal>,
    handle: Option<JoinHandle<SearchResult>>,
    timer_handle: Option<JoinHandle<()>>,
    /// Answer known before any thread was started (book move)
    ready: Option<SearchResult>,
}

impl SearchJob {
    fn finished(result: SearchResult) -> Self {
        SearchJob {
            stop: Arc::new(AtomicBool::new(true)),
            signal: Arc::new(TimerSignal::default()),
            handle: None,
            timer_handle: None,
            ready: Some(result),
        }
    }

    /// Signal stop without waiting
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the search returns.
    pub fn wait(mut self) -> io::Result<SearchResult> {
        if let Some(result) = self.ready.take() {
            return Ok(result);
        }
        let joined = match self.handle.take() {
            Some(handle) => handle.join(),
            None => return Err(io::Error::other("search job has no thread")),
        };
        self.signal.finish();
        if let Some(timer) = self.timer_handle.take() {
            join_timer(timer);
        }
        joined.map_err(|_| io::Error::other("search thread panicked"))
    }

    /// Stop the search and wait for the thread to finish
    pub fn stop_and_wait(self) -> io::Result<SearchResult> {
        self.stop();
        self.wait()
    }
}

impl Drop for SearchJob {
    fn drop(&mut self) {
        // An abandoned job must not keep searching until its deadline.
        if self.handle.is_some() {
            self.stop();
            self.signal.finish();
        }
    }
}

/// Runs searches off the caller's thread, one at a time.
pub struct EngineController {
    /// Search state (transposition table and parameters)
    search_state: Arc<Mutex<SearchState>>,
    book: Option<Arc<dyn OpeningBook>>,
    /// Optional callback for per-iteration search info
    info_callback: Option<SearchInfoCallback>,
}

impl EngineController {
    /// Create a new engine controller
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        Self::with_params(SearchParams {
            tt_mb,
            ..SearchParams::default()
        })
    }

    #[must_use]
    pub fn with_params(params: SearchParams) -> Self {
        EngineController {
            search_state: Arc::new(Mutex::new(SearchState::with_params(params))),
            book: None,
            info_callback: None,
        }
    }

    /// Consult `book` before every search.
    #[must_use]
    pub fn with_book(mut self, book: Arc<dyn OpeningBook>) -> Self {
        self.book = Some(book);
        self
    }

    pub fn set_book(&mut self, book: Option<Arc<dyn OpeningBook>>) {
        self.book = book;
    }

    /// Set callback for iteration info reporting.
    pub fn set_info_callback(&mut self, cb: Option<SearchInfoCallback>) {
        self.info_callback = cb;
    }

    /// Get a reference to the search state
    #[must_use]
    pub fn search_state(&self) -> &Arc<Mutex<SearchState>> {
        &self.search_state
    }

    /// A legal book move for `position`, if the book has one.
    #[must_use]
    pub fn book_move(&self, position: &Position) -> Option<crate::board::Move> {
        let book = self.book.as_ref()?;
        let mv = book.lookup(position.hash())?;
        if position.is_legal(mv) {
            Some(mv)
        } else {
            trace!("ignoring illegal book move {mv}");
            None
        }
    }

    fn spawn_timer(
        budget: Duration,
        stop: Arc<AtomicBool>,
        signal: Arc<TimerSignal>,
    ) -> io::Result<JoinHandle<()>> {
        let deadline = Instant::now() + budget;
        thread::Builder::new()
            .name("search-timer".to_string())
            .spawn(move || {
                let mut done = signal.done.lock();
                while !*done {
                    if signal.cvar.wait_until(&mut done, deadline).timed_out() {
                        stop.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            })
    }

    /// Start searching a copy of `position`; the search is cancelled once `budget` elapses.
    ///
    /// A legal book move is returned immediately without searching.
    pub fn start(&self, position: &Position, budget: Duration) -> io::Result<SearchJob> {
        if let Some(mv) = self.book_move(position) {
            trace!("book move {mv}");
            return Ok(SearchJob::finished(SearchResult {
                best_move: Some(mv),
                score: 0,
                depth: 0,
                seldepth: 0,
                nodes: 0,
                tt_hits: 0,
                elapsed: Duration::ZERO,
                pv: vec![mv],
                cancelled: false,
            }));
        }

        let stop = Arc::new(AtomicBool::new(false));
        let signal = Arc::new(TimerSignal::default());
        let timer_handle = Self::spawn_timer(budget, Arc::clone(&stop), Arc::clone(&signal))?;

        let mut config = SearchConfig::default();
        if let Some(cb) = &self.info_callback {
            config = config.with_info_callback(cb.clone());
        }

        let mut search_position = position.clone();
        let search_state = Arc::clone(&self.search_state);
        let stop_clone = Arc::clone(&stop);
        let signal_clone = Arc::clone(&signal);

        let spawned = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let result = {
                    let mut guard = search_state.lock();
                    search(&mut search_position, &mut guard, &config, &stop_clone)
                };
                signal_clone.finish();
                result
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(err) => {
                signal.finish();
                join_timer(timer_handle);
                return Err(err);
            }
        };

        Ok(SearchJob {
            stop,
            signal,
            handle: Some(handle),
            timer_handle: Some(timer_handle),
            ready: None,
        })
    }

    /// Search `position` for `budget` and block until a result is available.
    pub fn think(&self, position: &Position, budget: Duration) -> io::Result<SearchResult> {
        self.start(position, budget)?.wait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::MemoryBook;

    #[test]
    fn stop_interrupts_a_long_search() {
        let engine = EngineController::new(1);
        let job = engine
            .start(&Position::new(), Duration::from_secs(600))
            .unwrap();
        thread::sleep(Duration::from_millis(50));
        let result = job.stop_and_wait().unwrap();
        assert!(result.cancelled);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn book_move_skips_search() {
        let book = MemoryBook::from_uci_lines(["d2d4"]).unwrap();
        let engine = EngineController::new(1).with_book(Arc::new(book));
        let result = engine.think(&Position::new(), Duration::from_secs(5)).unwrap();
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("d2d4"));
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn panicked_timer_is_reported_not_raised() {
        let finished = thread::spawn(|| {});
        assert!(join_timer(finished));
        let panicked = thread::spawn(|| panic!("timer failed"));
        assert!(!join_timer(panicked));
    }

    #[test]
    fn illegal_book_move_is_ignored() {
        let mut book = MemoryBook::new();
        let pos = Position::new();
        // Ke2 is blocked by our own pawn.
        book.insert_position(
            &pos,
            crate::board::Move::quiet(crate::board::Square::E1, "e2".parse().unwrap()),
        );
        let engine = EngineController::new(1).with_book(Arc::new(book));
        assert!(engine.book_move(&pos).is_none());
    }
}
