//! Game of the Amazons engine: board model, rules, heuristic evaluation and a cancellable
//! alpha-beta search with three difficulty tiers.

pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;
pub mod worker;


pub use crate::core::{
    start_new_game, Board, BoardDimension, Difficulty, GameState, Move, Player, Position,
    TileContent,
};
pub use crate::error::EngineError;
pub use crate::logic::{
    apply_move, evaluate_win_state, generate_moves_for_player, has_any_legal_move,
    is_move_legal,
};
pub use crate::player::ai::{get_best_move, AIConfig, CancelToken};
pub use crate::worker::AiWorker;
