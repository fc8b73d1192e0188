//! Evaluator trait for position evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::{GameState, Player};

/// Trait for evaluating positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the state from `perspective`'s point of view
    ///
    /// Returns:
    ///   - Positive score: `perspective` is better off
    ///   - Negative score: the opponent is better off
    ///   - `±WIN_SCORE` for finished games
    fn evaluate(&self, state: &GameState, perspective: Player) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}
