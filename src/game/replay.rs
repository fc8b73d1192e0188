use super::record::GameRecord;
use crate::core::{start_new_game, Difficulty, GameState, Move};
use crate::error::EngineError;
use crate::logic::apply_move;

/// 棋譜を 1 手ずつ行き来するためのビューア
pub struct Replay {
    record: GameRecord,
    states: Vec<GameState>,
    current_index: usize,
}

impl Replay {
    pub fn new(record: GameRecord) -> Result<Self, EngineError> {
        // 全局面を先に計算しておく
        let mut state = start_new_game(record.dimension, Difficulty::default());
        let mut states = Vec::with_capacity(record.moves.len() + 1);
        states.push(state.clone());
        for mv in &record.moves {
            apply_move(&mut state, mv)?;
            states.push(state.clone());
        }

        Ok(Self {
            record,
            states,
            current_index: 0,
        })
    }

    pub fn current(&self) -> &GameState {
        &self.states[self.current_index]
    }

    /// 現在の局面に至った直前の手
    pub fn last_move(&self) -> Option<&Move> {
        self.current_index
            .checked_sub(1)
            .and_then(|i| self.record.moves.get(i))
    }

    pub fn index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.record.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.moves.is_empty()
    }

    pub fn step_forward(&mut self) -> bool {
        if self.current_index < self.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn step_back(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn jump_to(&mut self, index: usize) {
        self.current_index = index.min(self.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardDimension, TileContent};
    use crate::game::Game;
    use crate::player::RandomAI;

    #[test]
    fn test_step_through_a_game() {
        let mut game = Game::new(BoardDimension::Six, Difficulty::Easy);
        game.play(&RandomAI::seeded("w", 5), &RandomAI::seeded("b", 6), |_, _| {})
            .unwrap();
        let mut replay = Replay::new(game.record()).unwrap();

        assert_eq!(replay.index(), 0);
        assert!(replay.last_move().is_none());
        assert!(!replay.step_back());
        assert_eq!(replay.current().board().count(TileContent::Arrow), 0);

        assert!(replay.step_forward());
        assert_eq!(replay.last_move(), game.state.history().first());
        assert_eq!(replay.current().board().count(TileContent::Arrow), 1);

        replay.jump_to(usize::MAX);
        assert_eq!(replay.index(), replay.len());
        assert!(!replay.step_forward());
        assert_eq!(replay.current().board(), game.state.board());
        assert!(replay.current().is_finished());
    }
}
