use crate::core::{start_new_game, BoardDimension, Difficulty, GameState, Move, Player};
use crate::error::EngineError;
use crate::logic::apply_move;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 棋譜 (JSON で保存する)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub dimension: BoardDimension,
    pub moves: Vec<Move>,
    /// 保存時点で終局していなければ `Player::None`
    pub winner: Player,
}

impl GameRecord {
    pub fn from_state(state: &GameState) -> Self {
        GameRecord {
            dimension: state.dimension(),
            moves: state.history().to_vec(),
            winner: if state.is_finished() {
                state.winner()
            } else {
                Player::None
            },
        }
    }

    /// 初期局面から全手を合法性を確かめながら再生する
    pub fn replay(&self) -> Result<GameState, EngineError> {
        let mut state = start_new_game(self.dimension, Difficulty::default());
        for mv in &self.moves {
            apply_move(&mut state, mv)?;
        }
        Ok(state)
    }

    /// `dir` に日時付きのファイル名で保存し、そのパスを返す
    pub fn save(&self, dir: impl AsRef<Path>, tag: &str) -> Result<PathBuf, EngineError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let filename = dir.join(format!(
            "{}_{}.json",
            tag,
            chrono::Local::now().format("%Y%m%d_%H%M%S%3f")
        ));
        self.save_as(&filename)?;
        Ok(filename)
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
