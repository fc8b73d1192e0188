use crate::core::Difficulty;
use crate::error::EngineError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "ai_config.json";

static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub mobility_weight: i32,
    pub spatial_weight: i32,
    pub territory_weight: i32,
    /// 機動力を数えるときの手数上限
    pub mobility_sample: usize,
    /// 中央にいるクイーンの位置点 (隅で 0 まで線形に減衰)
    pub center_weight: f64,
    /// クイーンから直接届くマス 1 つあたりの加点
    pub reach_bonus: f64,
}

/// 難易度ごとの探索設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// 探索の深さ (手数)
    pub depth: u8,
    /// 各ノードで生成する手の上限
    pub move_cap: usize,
    /// 並べ替え後、上位何手だけを深く読むか (None なら全手)
    pub deep_slots: Option<usize>,
    pub use_spatial: bool,
    pub use_territory: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl SearchConfig {
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl AIConfig {
    /// プロセス全体で共有する設定 (初回アクセス時に読み込む)
    pub fn get() -> &'static AIConfig {
        &CONFIG
    }

    pub fn load() -> Result<Self, EngineError> {
        let config_str = std::fs::read_to_string(CONFIG_PATH)?;
        Self::from_json(&config_str)
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: AIConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::info!(path = CONFIG_PATH, version = %config.version, "loaded AI config");
                config
            }
            Err(EngineError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "ignoring AI config");
                Self::default()
            }
        }
    }

    /// 難易度が上がるほど深さ・手数上限・評価項目が単調に増えることを確認する
    pub fn validate(&self) -> Result<(), EngineError> {
        let tiers = [&self.search.easy, &self.search.medium, &self.search.hard];

        for (difficulty, profile) in Difficulty::ALL.iter().zip(tiers.iter()) {
            if profile.depth == 0 || profile.move_cap == 0 {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{} needs a positive depth and move cap",
                    difficulty
                )));
            }
            if profile.deep_slots == Some(0) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{} deep_slots must be positive",
                    difficulty
                )));
            }
        }

        // 最弱の Easy は重い陣地評価を使わない
        if self.search.easy.use_territory {
            return Err(EngineError::InvalidConfiguration(
                "Easy must not use the territory term".to_string(),
            ));
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            let terms_shrink = (lower.use_spatial && !upper.use_spatial)
                || (lower.use_territory && !upper.use_territory);
            if lower.depth > upper.depth || lower.move_cap > upper.move_cap || terms_shrink {
                return Err(EngineError::InvalidConfiguration(
                    "search profiles must not weaken from Easy to Hard".to_string(),
                ));
            }
        }

        let eval = &self.evaluation;
        if eval.mobility_weight < 0 || eval.spatial_weight < 0 || eval.territory_weight < 0 {
            return Err(EngineError::InvalidConfiguration(
                "evaluation weights must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig {
                mobility_weight: 3,
                spatial_weight: 1,
                territory_weight: 5,
                mobility_sample: 48,
                center_weight: 10.0,
                reach_bonus: 0.25,
            },
            search: SearchConfig {
                easy: DifficultyProfile {
                    depth: 1,
                    move_cap: 6,
                    deep_slots: None,
                    use_spatial: false,
                    use_territory: false,
                },
                medium: DifficultyProfile {
                    depth: 2,
                    move_cap: 12,
                    deep_slots: None,
                    use_spatial: true,
                    use_territory: false,
                },
                hard: DifficultyProfile {
                    depth: 3,
                    move_cap: 20,
                    deep_slots: Some(6),
                    use_spatial: true,
                    use_territory: true,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_monotonic() {
        let config = AIConfig::default();
        assert!(config.validate().is_ok());
        let easy = config.search.profile(Difficulty::Easy);
        let hard = config.search.profile(Difficulty::Hard);
        assert!(easy.depth < hard.depth);
        assert!(easy.move_cap < hard.move_cap);
        assert!(!easy.use_territory && hard.use_territory);
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let config = AIConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed = AIConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_non_monotonic_tables() {
        let mut config = AIConfig::default();
        config.search.medium.move_cap = 50;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));

        let mut config = AIConfig::default();
        config.search.hard.use_spatial = false;
        assert!(config.validate().is_err());

        let mut config = AIConfig::default();
        config.search.easy.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_territory_on_easy() {
        let mut config = AIConfig::default();
        config.search.easy.use_territory = true;
        config.search.medium.use_territory = true;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));

        // Medium までなら陣地評価を有効にしてよい
        let mut config = AIConfig::default();
        config.search.medium.use_territory = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            AIConfig::from_json("{ not json"),
            Err(EngineError::Json(_))
        ));
    }
}
