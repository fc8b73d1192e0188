//! # Evaluation Module
//!
//! Static evaluation of a `GameState` from the point of view of one player
//! (positive = good for that player).
//!
//! ## Scoring Strategy
//! Each term is computed for the perspective player minus the same term for the opponent:
//! 1. **Mobility**: number of legal moves, sampled up to a cap.
//! 2. **Spatial influence**: queens near the centre score higher, plus a small bonus per
//!    directly reachable tile so that central but trapped queens are not rewarded.
//! 3. **Territory**: per-queen flood fill over empty tiles using queen moves. Tiles reached by
//!    two queens of the same side count twice.
//!
//! Easy uses mobility only. Medium adds spatial influence, Hard adds territory (the flood fill
//! is by far the most expensive term).
//!
//! Finished games score `±WIN_SCORE`; heuristic scores are clamped to `±HEURISTIC_BOUND` so a
//! decided game always outranks any heuristic value.

use super::config::{AIConfig, EvaluationConfig};
use super::evaluator::Evaluator;
use crate::core::{Difficulty, GameState, Player, Position, TileContent};
use crate::logic::{gather_reachable_tiles, generate_moves_for_player};
use std::collections::VecDeque;

/// Score of a won game
pub const WIN_SCORE: i32 = i32::MAX / 4;
/// Non-terminal scores stay strictly inside this band
pub const HEURISTIC_BOUND: i32 = 1_000_000;

/// Weighted evaluator configured for one difficulty tier.
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    weights: EvaluationConfig,
    use_spatial: bool,
    use_territory: bool,
}

impl HeuristicEvaluator {
    pub fn new(weights: EvaluationConfig, use_spatial: bool, use_territory: bool) -> Self {
        Self {
            weights,
            use_spatial,
            use_territory,
        }
    }

    pub fn for_difficulty(config: &AIConfig, difficulty: Difficulty) -> Self {
        let profile = config.search.profile(difficulty);
        Self::new(
            config.evaluation.clone(),
            profile.use_spatial,
            profile.use_territory,
        )
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, state: &GameState, perspective: Player) -> i32 {
        if state.is_finished() {
            return evaluate_terminal(state, perspective);
        }

        let opponent = perspective.opponent();
        let w = &self.weights;

        let mobility = mobility_count(state, perspective, w.mobility_sample)
            - mobility_count(state, opponent, w.mobility_sample);
        let mut score = mobility * w.mobility_weight;

        if self.use_spatial {
            score += spatial_influence_score(state, perspective, w) * w.spatial_weight;
        }
        if self.use_territory {
            score += territory_score(state, perspective) * w.territory_weight;
        }

        score.clamp(-HEURISTIC_BOUND + 1, HEURISTIC_BOUND - 1)
    }

    fn name(&self) -> &str {
        match (self.use_spatial, self.use_territory) {
            (_, true) => "mobility+spatial+territory",
            (true, false) => "mobility+spatial",
            (false, false) => "mobility",
        }
    }
}

/// 終局した局面の評価値。終局していなければ 0。
pub fn evaluate_terminal(state: &GameState, perspective: Player) -> i32 {
    if !state.is_finished() || perspective == Player::None {
        return 0;
    }
    if state.winner() == perspective {
        WIN_SCORE
    } else if state.winner() == perspective.opponent() {
        -WIN_SCORE
    } else {
        0
    }
}

/// Number of legal moves for `player`, counted up to `sample`.
pub fn mobility_count(state: &GameState, player: Player, sample: usize) -> i32 {
    generate_moves_for_player(state, player, Some(sample)).len() as i32
}

/// Number of tiles reachable from `start` by repeated queen moves, `start` included.
///
/// The fill runs on a private copy of the board with `start` cleared; arrows and all queens
/// act as walls.
pub fn flood_fill_reachable_tiles(state: &GameState, start: Position) -> usize {
    let board = state.board();
    if !board.is_inside(start) {
        return 0;
    }

    let mut working = board.clone();
    working.set(start, TileContent::Empty);

    let n = working.size();
    let index = |pos: Position| pos.row as usize * n + pos.col as usize;
    let mut visited = vec![false; n * n];
    let mut frontier = VecDeque::new();

    visited[index(start)] = true;
    frontier.push_back(start);
    let mut count = 1;

    while let Some(current) = frontier.pop_front() {
        for next in gather_reachable_tiles(&working, current) {
            let idx = index(next);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            frontier.push_back(next);
            count += 1;
        }
    }
    count
}

/// Sum of per-queen flood fills for `player` minus the same for the opponent.
pub fn territory_score(state: &GameState, player: Player) -> i32 {
    let reach = |p: Player| -> i32 {
        state
            .queen_positions(p)
            .iter()
            .map(|&pos| flood_fill_reachable_tiles(state, pos) as i32)
            .sum()
    };
    reach(player) - reach(player.opponent())
}

fn positional_value(state: &GameState, pos: Position, weights: &EvaluationConfig) -> f64 {
    let board = state.board();
    let n = board.size() as f64;
    let center = (n - 1.0) / 2.0;
    // 中央から隅までのマンハッタン距離
    let max_dist = n - 1.0;

    let dist = (pos.row as f64 - center).abs() + (pos.col as f64 - center).abs();
    let normalized = if max_dist > 0.0 {
        (1.0 - dist / max_dist).max(0.0)
    } else {
        0.0
    };
    let reach = gather_reachable_tiles(board, pos).len() as f64;

    normalized * weights.center_weight + reach * weights.reach_bonus
}

/// Centre proximity plus immediate reach, `player` minus opponent.
pub fn spatial_influence_score(
    state: &GameState,
    player: Player,
    weights: &EvaluationConfig,
) -> i32 {
    let influence = |p: Player| -> f64 {
        state
            .queen_positions(p)
            .iter()
            .map(|&pos| positional_value(state, pos, weights))
            .sum()
    };
    (influence(player) - influence(player.opponent())).round() as i32
}
