pub mod board;
pub mod r#move;
pub mod setup;
pub mod state;
pub mod types;

pub use board::Board;
pub use r#move::Move;
pub use setup::{layout_for, start_new_game};
pub use state::GameState;
pub use types::{BoardDimension, Difficulty, Player, Position, TileContent};
