use crate::core::{GameState, Move};
use crate::error::EngineError;

/// プレイヤー操作のtrait
pub trait PlayerController: Send + Sync {
    /// 手番側の手を選ぶ。`Ok(None)` は指せる手がない (投了) ことを表す。
    fn choose_move(&self, state: &GameState) -> Result<Option<Move>, EngineError>;
    fn name(&self) -> &str;
}
