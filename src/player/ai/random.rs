use crate::core::{GameState, Move};
use crate::error::EngineError;
use crate::logic::generate_moves_for_player;
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;

/// 合法手から一様に選ぶ AI (自己対局の基準用)
pub struct RandomAI {
    pub name: String,
    rng: Mutex<StdRng>,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        Self::with_rng(name, StdRng::from_entropy())
    }

    /// 再現性のある乱数列で作る
    pub fn seeded(name: &str, seed: u64) -> Self {
        Self::with_rng(name, StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: &str, rng: StdRng) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: Mutex::new(rng),
        }
    }
}

impl PlayerController for RandomAI {
    fn choose_move(&self, state: &GameState) -> Result<Option<Move>, EngineError> {
        let moves = generate_moves_for_player(state, state.current_player(), None);
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| EngineError::SearchFailed("random generator poisoned".to_string()))?;
        Ok(moves.choose(&mut *rng).copied())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{start_new_game, BoardDimension, Difficulty};
    use crate::logic::is_move_legal;

    #[test]
    fn test_random_moves_are_legal_and_reproducible() {
        let state = start_new_game(BoardDimension::Eight, Difficulty::Easy);
        let a = RandomAI::seeded("a", 7);
        let b = RandomAI::seeded("b", 7);
        for _ in 0..5 {
            let mv = a.choose_move(&state).unwrap().unwrap();
            assert!(is_move_legal(&state, &mv));
            assert_eq!(Some(mv), b.choose_move(&state).unwrap());
        }
    }
}
