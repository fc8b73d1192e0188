//! Background search worker
//!
//! Runs `get_best_move` on a dedicated thread against an owned snapshot so the caller that owns
//! the live `GameState` stays responsive. At most one search is in flight per worker: starting a
//! new one cancels and joins the previous one first.

use crate::core::{Difficulty, GameState, Move};
use crate::error::EngineError;
use crate::player::ai::{get_best_move_with_config, AIConfig, CancelToken};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

type SearchResult = Result<Option<Move>, EngineError>;

struct InFlight {
    handle: JoinHandle<()>,
    rx: Receiver<SearchResult>,
}

pub struct AiWorker {
    config: AIConfig,
    cancel: CancelToken,
    in_flight: Option<InFlight>,
}

impl AiWorker {
    pub fn new(config: AIConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
            in_flight: None,
        }
    }

    /// Start searching `snapshot` for the side to move.
    pub fn start(&mut self, snapshot: GameState, difficulty: Difficulty) {
        self.stop();

        let token = CancelToken::new();
        self.cancel = token.clone();
        let config = self.config.clone();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = get_best_move_with_config(&snapshot, difficulty, &config, Some(&token));
            // 受信側が先に破棄されていれば結果は捨てる
            let _ = tx.send(result);
        });

        tracing::debug!(%difficulty, "search worker started");
        self.in_flight = Some(InFlight { handle, rx });
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A handle that cancels the current search from elsewhere
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight
            .as_ref()
            .map_or(false, |job| !job.handle.is_finished())
    }

    /// Non-blocking poll. `None` while the search is still running or when nothing was started.
    pub fn try_result(&mut self) -> Option<SearchResult> {
        let job = self.in_flight.as_ref()?;
        match job.rx.try_recv() {
            Ok(result) => {
                if let Some(job) = self.in_flight.take() {
                    let _ = job.handle.join();
                }
                Some(result)
            }
            // 送信前にスレッドが落ちた
            Err(TryRecvError::Disconnected) => Some(self.wait()),
            Err(TryRecvError::Empty) => None,
        }
    }

    /// Block until the current search ends.
    ///
    /// A panicking search is reported as `SearchFailed` instead of tearing down the caller.
    pub fn wait(&mut self) -> SearchResult {
        let job = self.in_flight.take().ok_or_else(|| {
            EngineError::SearchFailed("no search in flight".to_string())
        })?;

        if let Err(panic) = job.handle.join() {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::warn!(%msg, "search worker panicked");
            return Err(EngineError::SearchFailed(msg));
        }

        let result = job
            .rx
            .recv()
            .unwrap_or_else(|_| Err(EngineError::SearchFailed("worker exited silently".into())));
        if let Err(EngineError::SearchCanceled) = &result {
            tracing::info!("search canceled");
        }
        result
    }

    fn stop(&mut self) {
        if let Some(job) = self.in_flight.take() {
            self.cancel.cancel();
            let _ = job.handle.join();
        }
    }
}

impl Default for AiWorker {
    fn default() -> Self {
        Self::new(AIConfig::get().clone())
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{start_new_game, BoardDimension};
    use crate::logic::is_move_legal;

    #[test]
    fn test_worker_returns_a_legal_move() {
        let state = start_new_game(BoardDimension::Six, Difficulty::Medium);
        let mut worker = AiWorker::new(AIConfig::default());
        worker.start(state.clone(), Difficulty::Medium);
        let mv = worker.wait().unwrap().unwrap();
        assert!(is_move_legal(&state, &mv));
        assert!(!worker.is_running());
    }

    #[test]
    fn test_cancel_reports_search_canceled() {
        let mut config = AIConfig::default();
        config.search.hard.depth = 6;
        config.search.hard.move_cap = 10_000;
        config.search.hard.deep_slots = None;

        let state = start_new_game(BoardDimension::Ten, Difficulty::Hard);
        let mut worker = AiWorker::new(config);
        worker.start(state, Difficulty::Hard);
        worker.cancel();
        assert!(matches!(worker.wait(), Err(EngineError::SearchCanceled)));
    }

    #[test]
    fn test_restart_cancels_previous_search() {
        let mut config = AIConfig::default();
        config.search.hard.depth = 6;
        config.search.hard.move_cap = 10_000;

        let state = start_new_game(BoardDimension::Ten, Difficulty::Hard);
        let mut worker = AiWorker::new(config);
        worker.start(state.clone(), Difficulty::Hard);
        let first = worker.cancel_token();

        worker.start(state.clone(), Difficulty::Easy);
        assert!(first.is_canceled());
        assert!(!worker.cancel_token().is_canceled());
        let mv = worker.wait().unwrap().unwrap();
        assert!(is_move_legal(&state, &mv));
    }

    #[test]
    fn test_try_result_delivers_the_move_once() {
        let state = start_new_game(BoardDimension::Six, Difficulty::Easy);
        let mut worker = AiWorker::new(AIConfig::default());
        worker.start(state.clone(), Difficulty::Easy);

        let result = loop {
            if let Some(result) = worker.try_result() {
                break result;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        };
        let mv = result.unwrap().unwrap();
        assert!(is_move_legal(&state, &mv));

        // 受け取り済みなら何も残っていない
        assert!(worker.try_result().is_none());
        assert!(!worker.is_running());
    }

    #[test]
    fn test_wait_without_search_is_an_error() {
        let mut worker = AiWorker::new(AIConfig::default());
        assert!(worker.try_result().is_none());
        assert!(matches!(worker.wait(), Err(EngineError::SearchFailed(_))));
    }
}
