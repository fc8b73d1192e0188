use super::cancel::CancelToken;
use super::config::{AIConfig, DifficultyProfile};
use super::eval::HeuristicEvaluator;
use super::evaluator::Evaluator;
use crate::core::{Difficulty, GameState, Move, Player};
use crate::error::EngineError;
use crate::logic::{apply_move, evaluate_win_state, generate_moves_for_player, is_terminal};
use crate::player::PlayerController;

/// 探索結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: i32,
    /// 訪れたノード数 (根の候補手を含む)
    pub nodes: u64,
}

struct Searcher<'a, E: Evaluator + ?Sized> {
    evaluator: &'a E,
    perspective: Player,
    move_cap: usize,
    cancel: Option<&'a CancelToken>,
    nodes: u64,
}

impl<'a, E: Evaluator + ?Sized> Searcher<'a, E> {
    fn check_cancel(&self) -> Result<(), EngineError> {
        match self.cancel {
            Some(token) if token.is_canceled() => Err(EngineError::SearchCanceled),
            _ => Ok(()),
        }
    }

    /// 末端: 指せない状態を明示的な終局に変換してから評価する (元の状態は触らない)
    fn leaf(&self, state: &GameState) -> i32 {
        let mut scratch = state.search_clone();
        evaluate_win_state(&mut scratch);
        self.evaluator.evaluate(&scratch, self.perspective)
    }

    fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing_player: Player,
    ) -> Result<i32, EngineError> {
        self.check_cancel()?;
        self.nodes += 1;

        if depth == 0 || is_terminal(state) {
            return Ok(self.leaf(state));
        }

        let current = state.current_player();
        let moves = generate_moves_for_player(state, current, Some(self.move_cap));
        if moves.is_empty() {
            return Ok(self.leaf(state));
        }

        let maximizing = current == maximizing_player;
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for mv in &moves {
            self.check_cancel()?;

            let mut next = state.search_clone();
            apply_move(&mut next, mv)?;
            let child = self.minimax(&next, depth - 1, alpha, beta, maximizing_player)?;

            if maximizing {
                value = value.max(child);
                alpha = alpha.max(value);
            } else {
                value = value.min(child);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(value)
    }
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Scores are always from `perspective`'s point of view; nodes where the side to move is
/// `maximizing_player` maximise, the others minimise. Returns `SearchCanceled` as soon as the
/// token is observed set.
#[allow(clippy::too_many_arguments)]
pub fn minimax<E: Evaluator + ?Sized>(
    state: &GameState,
    depth: u8,
    alpha: i32,
    beta: i32,
    maximizing_player: Player,
    perspective: Player,
    move_cap: usize,
    evaluator: &E,
    cancel: Option<&CancelToken>,
) -> Result<i32, EngineError> {
    let mut searcher = Searcher {
        evaluator,
        perspective,
        move_cap,
        cancel,
        nodes: 0,
    };
    searcher.minimax(state, depth, alpha, beta, maximizing_player)
}

/// Root search.
///
/// Root moves are ordered by a one-ply evaluation. When the profile sets `deep_slots`, only
/// that many of the best-ordered candidates get the full depth; the rest are searched one ply
/// shallower. Ties keep the earlier candidate.
pub fn search<E: Evaluator + ?Sized>(
    state: &GameState,
    profile: &DifficultyProfile,
    evaluator: &E,
    cancel: Option<&CancelToken>,
) -> Result<SearchReport, EngineError> {
    let root = state.search_clone();
    let perspective = root.current_player();
    let mut searcher = Searcher {
        evaluator,
        perspective,
        move_cap: profile.move_cap,
        cancel,
        nodes: 0,
    };
    searcher.check_cancel()?;

    let moves = if root.is_finished() {
        Vec::new()
    } else {
        generate_moves_for_player(&root, perspective, Some(profile.move_cap))
    };
    if moves.is_empty() {
        tracing::debug!(player = %perspective, "no legal move at root");
        return Ok(SearchReport {
            best_move: None,
            score: evaluator.evaluate(&root, perspective),
            nodes: 0,
        });
    }

    // Move ordering
    let mut scored = Vec::with_capacity(moves.len());
    for mv in moves {
        searcher.check_cancel()?;
        let mut next = root.search_clone();
        apply_move(&mut next, &mv)?;
        let heuristic = evaluator.evaluate(&next, perspective);
        scored.push((next, mv, heuristic));
    }
    scored.sort_by(|a, b| b.2.cmp(&a.2));

    let search_depth = profile.depth.max(1);
    let primary_depth = search_depth - 1;
    let shallow_depth = primary_depth.saturating_sub(1);
    let deep_slots = profile.deep_slots.unwrap_or(scored.len());

    let mut best_move = scored[0].1;
    let mut best_score = i32::MIN;

    for (idx, (next, mv, heuristic)) in scored.iter().enumerate() {
        searcher.check_cancel()?;
        let depth = if idx < deep_slots {
            primary_depth
        } else {
            shallow_depth
        };

        let score = searcher.minimax(next, depth, i32::MIN, i32::MAX, perspective)?;
        tracing::debug!(%mv, heuristic, depth, score, "root candidate");

        if score > best_score {
            best_score = score;
            best_move = *mv;
        }
    }

    tracing::info!(
        best = %best_move,
        score = best_score,
        nodes = searcher.nodes,
        evaluator = evaluator.name(),
        "search finished"
    );

    Ok(SearchReport {
        best_move: Some(best_move),
        score: best_score,
        nodes: searcher.nodes,
    })
}

/// AI entry point using the process-wide [`AIConfig`].
///
/// `Ok(None)` means the side to move has no legal move (it has lost).
/// `Err(SearchCanceled)` means the token was set; no move was produced.
pub fn get_best_move(
    state: &GameState,
    difficulty: Difficulty,
    cancel: Option<&CancelToken>,
) -> Result<Option<Move>, EngineError> {
    get_best_move_with_config(state, difficulty, AIConfig::get(), cancel)
}

pub fn get_best_move_with_config(
    state: &GameState,
    difficulty: Difficulty,
    config: &AIConfig,
    cancel: Option<&CancelToken>,
) -> Result<Option<Move>, EngineError> {
    let evaluator = HeuristicEvaluator::for_difficulty(config, difficulty);
    let profile = config.search.profile(difficulty);
    Ok(search(state, profile, &evaluator, cancel)?.best_move)
}

/// 探索 AI
pub struct AlphaBetaAI {
    name: String,
    difficulty: Difficulty,
    config: AIConfig,
    cancel: CancelToken,
}

impl AlphaBetaAI {
    pub fn new(name: &str, difficulty: Difficulty) -> Self {
        Self::with_config(name, difficulty, AIConfig::get().clone())
    }

    pub fn with_config(name: &str, difficulty: Difficulty, config: AIConfig) -> Self {
        Self {
            name: name.to_string(),
            difficulty,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// 外部から探索を止めるためのトークン
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl PlayerController for AlphaBetaAI {
    fn choose_move(&self, state: &GameState) -> Result<Option<Move>, EngineError> {
        get_best_move_with_config(state, self.difficulty, &self.config, Some(&self.cancel))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
