pub mod record;
pub mod replay;

pub use record::GameRecord;
pub use replay::Replay;

use crate::core::{start_new_game, BoardDimension, Difficulty, GameState, Move, Player};
use crate::error::EngineError;
use crate::logic::apply_move;
use crate::player::PlayerController;

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// 手数上限で打ち切った場合は `Player::None`
    pub winner: Player,
    pub plies: usize,
}

pub struct Game {
    pub state: GameState,
    /// 異常時の打ち切り手数
    pub max_plies: usize,
}

impl Game {
    pub fn new(dimension: BoardDimension, difficulty: Difficulty) -> Self {
        Self::from_state(start_new_game(dimension, difficulty))
    }

    pub fn from_state(state: GameState) -> Self {
        let n = state.board().size();
        Game {
            state,
            // 1 手ごとに空きマスが 1 つ減るので盤面のマス数を超えることはない
            max_plies: n * n,
        }
    }

    /// 終局まで 2 人に交互に指させる。`on_move` は各手の適用後に呼ばれる。
    pub fn play<F>(
        &mut self,
        white: &dyn PlayerController,
        black: &dyn PlayerController,
        mut on_move: F,
    ) -> Result<GameOutcome, EngineError>
    where
        F: FnMut(&Move, &GameState),
    {
        loop {
            let plies = self.state.history().len();
            if self.state.is_finished() {
                return Ok(GameOutcome {
                    winner: self.state.winner(),
                    plies,
                });
            }
            if plies >= self.max_plies {
                tracing::warn!(plies, "ply limit reached");
                return Ok(GameOutcome {
                    winner: Player::None,
                    plies,
                });
            }

            let current = self.state.current_player();
            let controller = match current {
                Player::White => white,
                _ => black,
            };

            match controller.choose_move(&self.state)? {
                Some(mv) => {
                    apply_move(&mut self.state, &mv)?;
                    tracing::debug!(player = controller.name(), %mv, "move played");
                    on_move(&mv, &self.state);
                }
                None => {
                    tracing::info!(player = controller.name(), "no move produced, resigning");
                    return Ok(GameOutcome {
                        winner: current.opponent(),
                        plies,
                    });
                }
            }
        }
    }

    pub fn record(&self) -> GameRecord {
        GameRecord::from_state(&self.state)
    }
}
