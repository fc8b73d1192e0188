pub mod alpha_beta;
pub mod cancel;
pub mod config;
pub mod eval;
pub mod evaluator;
pub mod random;

pub use alpha_beta::{
    get_best_move, get_best_move_with_config, minimax, search, AlphaBetaAI, SearchReport,
};
pub use cancel::CancelToken;
pub use config::{AIConfig, DifficultyProfile};
pub use eval::HeuristicEvaluator;
pub use evaluator::Evaluator;
pub use random::RandomAI;
