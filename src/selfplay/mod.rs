use crate::core::{BoardDimension, Difficulty, Player};
use crate::game::Game;
use crate::player::ai::AIConfig;
use crate::player::{AlphaBetaAI, PlayerController, RandomAI};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    Search(Difficulty),
    Random,
}

impl Opponent {
    fn controller(
        self,
        name: &str,
        config: &AIConfig,
        seed: Option<u64>,
    ) -> Box<dyn PlayerController> {
        match self {
            Opponent::Search(difficulty) => {
                Box::new(AlphaBetaAI::with_config(name, difficulty, config.clone()))
            }
            Opponent::Random => match seed {
                Some(seed) => Box::new(RandomAI::seeded(name, seed)),
                None => Box::new(RandomAI::new(name)),
            },
        }
    }

    fn label(self) -> String {
        match self {
            Opponent::Search(difficulty) => format!("AlphaBeta-{}", difficulty),
            Opponent::Random => "Random".to_string(),
        }
    }
}

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub dimension: BoardDimension,
    pub white: Opponent,
    pub black: Opponent,
    /// 指定があれば棋譜を保存する
    pub record_dir: Option<PathBuf>,
    /// rayon で 1 局ずつ並列に回す
    pub parallel: bool,
    /// ランダム AI の乱数の種 (対局ごとにずらす)
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Player,
    pub plies: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    /// 手数上限で打ち切った対局
    pub unfinished: usize,
    pub avg_plies: f64,
    pub avg_time_ms: f64,
    pub white: String,
    pub black: String,
    pub dimension: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Player::White => self.white_wins += 1,
            Player::Black => self.black_wins += 1,
            Player::None => self.unfinished += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_plies: usize = self.games.iter().map(|g| g.plies).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_plies = total_plies as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let wins = match player {
            Player::White => self.white_wins,
            Player::Black => self.black_wins,
            Player::None => self.unfinished,
        };
        wins as f64 / self.total_games as f64
    }
}

fn play_one(
    config: &SelfPlayConfig,
    ai_config: &AIConfig,
    game_num: usize,
) -> anyhow::Result<GameResult> {
    let start_time = Instant::now();
    let seed = config.seed.map(|s| s.wrapping_add(game_num as u64 * 2));

    let white = config.white.controller("AI-White", ai_config, seed);
    let black = config
        .black
        .controller("AI-Black", ai_config, seed.map(|s| s.wrapping_add(1)));

    let mut game = Game::new(config.dimension, Difficulty::default());
    let outcome = game.play(white.as_ref(), black.as_ref(), |_, _| {})?;
    let elapsed = start_time.elapsed();

    tracing::info!(
        game = game_num,
        winner = %outcome.winner,
        plies = outcome.plies,
        secs = elapsed.as_secs_f64(),
        "self-play game finished"
    );

    if let Some(dir) = &config.record_dir {
        let path = game.record().save(dir, &format!("game_{:04}", game_num))?;
        tracing::debug!(path = %path.display(), "record saved");
    }

    Ok(GameResult {
        winner: outcome.winner,
        plies: outcome.plies,
        time_ms: elapsed.as_millis(),
    })
}

pub fn run_selfplay(
    config: &SelfPlayConfig,
    ai_config: &AIConfig,
) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    stats.white = config.white.label();
    stats.black = config.black.label();
    stats.dimension = config.dimension.name().to_string();

    let results: Vec<GameResult> = if config.parallel {
        (1..=config.num_games)
            .into_par_iter()
            .map(|game_num| play_one(config, ai_config, game_num))
            .collect::<anyhow::Result<_>>()?
    } else {
        (1..=config.num_games)
            .map(|game_num| play_one(config, ai_config, game_num))
            .collect::<anyhow::Result<_>>()?
    };

    for result in results {
        stats.add_result(result);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(parallel: bool) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 4,
            dimension: BoardDimension::Six,
            white: Opponent::Search(Difficulty::Easy),
            black: Opponent::Random,
            record_dir: None,
            parallel,
            seed: Some(99),
        }
    }

    #[test]
    fn test_selfplay_counts_every_game() {
        let stats = run_selfplay(&config(false), &AIConfig::default()).unwrap();
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.white_wins + stats.black_wins + stats.unfinished, 4);
        assert_eq!(stats.unfinished, 0);
        assert!(stats.avg_plies > 0.0 && stats.avg_plies <= 28.0);
        assert_eq!(stats.white, "AlphaBeta-Easy");
        assert_eq!(stats.dimension, "6x6");
    }

    #[test]
    fn test_parallel_matches_sequential_outcomes() {
        let sequential = run_selfplay(&config(false), &AIConfig::default()).unwrap();
        let parallel = run_selfplay(&config(true), &AIConfig::default()).unwrap();
        let winners = |s: &SelfPlayStats| {
            s.games
                .iter()
                .map(|g| (g.winner, g.plies))
                .collect::<Vec<_>>()
        };
        assert_eq!(winners(&sequential), winners(&parallel));
    }

    #[test]
    fn test_win_rate() {
        let mut stats = SelfPlayStats::new();
        assert_eq!(stats.win_rate(Player::White), 0.0);
        stats.add_result(GameResult {
            winner: Player::White,
            plies: 20,
            time_ms: 10,
        });
        stats.add_result(GameResult {
            winner: Player::Black,
            plies: 24,
            time_ms: 30,
        });
        assert_eq!(stats.win_rate(Player::White), 0.5);
        assert_eq!(stats.avg_plies, 22.0);
        assert_eq!(stats.avg_time_ms, 20.0);
    }
}
