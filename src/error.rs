//! Engine error type
//!
//! `SearchCanceled` is a cooperative abort, not a fault. Callers that launch a
//! search catch it at that boundary and treat it as "no move produced".

use crate::core::Move;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// `apply_move` was given a move that fails `is_move_legal`
    #[error("illegal move: {mv}")]
    IllegalMove { mv: Move },

    #[error("search canceled")]
    SearchCanceled,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The search worker panicked or vanished before reporting
    #[error("search failed: {0}")]
    SearchFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
