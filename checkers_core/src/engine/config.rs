use crate::engine::eval::{HeuristicEvaluator, PieceCountEvaluator};
use crate::engine::Evaluator;
use crate::logic::board::{Board, BoardError, DEFAULT_BOARD_SIZE};
use crate::logic::game::DEFAULT_DRAW_MOVE_LIMIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WEIGHT_NORMAL: i32 = 1000;
pub const WEIGHT_KING: i32 = 3000;
pub const WEIGHT_EDGE_ROW: i32 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("draw_move_limit must be at least 1")]
    ZeroDrawLimit,
    #[error("evaluation weights are too large for a {size}x{size} board")]
    WeightOverflow { size: usize },
}

/// Preset search depths offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Difficult,
}

impl Difficulty {
    pub const fn depth_limit(self) -> u8 {
        match self {
            Self::Easy => 4,
            Self::Normal => 5,
            Self::Difficult => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    #[default]
    Heuristic,
    PieceCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_size: usize,

    // Search Parameters
    pub depth_limit: u8,
    pub repetition_penalty_scale: i32,
    pub shuffle_seed: Option<u64>, // None: first best move in scan order wins

    // Evaluation Parameters
    pub evaluator: EvaluatorKind,
    pub weight_normal: i32,
    pub weight_king: i32,
    pub weight_edge_row: i32,

    // Session
    pub draw_move_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,

            depth_limit: 4,
            repetition_penalty_scale: 2,
            shuffle_seed: None,

            evaluator: EvaluatorKind::Heuristic,
            weight_normal: WEIGHT_NORMAL,
            weight_king: WEIGHT_KING,
            weight_edge_row: WEIGHT_EDGE_ROW,

            draw_move_limit: DEFAULT_DRAW_MOVE_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Reads a config where every missing field keeps its default, then
    /// validates it.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::check_size(self.board_size)?;
        if self.draw_move_limit == 0 {
            return Err(ConfigError::ZeroDrawLimit);
        }

        // Every square could hold a piece scoring all three weights.
        let weights = [self.weight_normal, self.weight_king, self.weight_edge_row]
            .iter()
            .map(|weight| i128::from(weight.unsigned_abs()))
            .sum::<i128>();
        let squares = i128::try_from(self.board_size).unwrap_or(i128::MAX);
        let worst = squares.saturating_mul(squares).saturating_mul(weights);
        if worst > i128::from(i32::MAX) {
            return Err(ConfigError::WeightOverflow {
                size: self.board_size,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.depth_limit = difficulty.depth_limit();
        self
    }

    pub fn build_evaluator(&self) -> Box<dyn Evaluator> {
        match self.evaluator {
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator::from_config(self)),
            EvaluatorKind::PieceCount => Box::new(PieceCountEvaluator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Player;
    use crate::logic::game::GameState;

    #[test]
    fn test_load_config_default() {
        let json = "{}";
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.weight_normal, 1000);
        assert_eq!(config.draw_move_limit, 40);
        assert_eq!(
            GameState::from_config(&config).unwrap().draw_move_limit,
            DEFAULT_DRAW_MOVE_LIMIT
        );
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "depth_limit": 6,
            "weight_king": 5000,
            "evaluator": "piece_count",
            "shuffle_seed": 7
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.depth_limit, 6);
        assert_eq!(config.weight_king, 5000);
        assert_eq!(config.evaluator, EvaluatorKind::PieceCount);
        assert_eq!(config.shuffle_seed, Some(7));
        // Others should be default
        assert_eq!(config.board_size, 8);
        assert_eq!(config.weight_normal, WEIGHT_NORMAL);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let json = "{ invalid json }";
        let result = EngineConfig::load_from_json(json);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_config_rejects_bad_values() {
        let result = EngineConfig::load_from_json(r#"{ "board_size": 9 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Board(BoardError::InvalidSize(9)))
        ));

        let result = EngineConfig::load_from_json(r#"{ "draw_move_limit": 0 }"#);
        assert!(matches!(result, Err(ConfigError::ZeroDrawLimit)));

        let result = EngineConfig::load_from_json(r#"{ "weight_normal": 1000000000 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::WeightOverflow { size: 8 })
        ));

        let result = EngineConfig::load_from_json(r#"{ "weight_king": -2147483648 }"#);
        assert!(matches!(result, Err(ConfigError::WeightOverflow { .. })));

        // Large but safe weights still load.
        let result = EngineConfig::load_from_json(r#"{ "weight_king": 1000000 }"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Easy.depth_limit(), 4);
        assert_eq!(Difficulty::Normal.depth_limit(), 5);
        assert_eq!(Difficulty::Difficult.depth_limit(), 6);

        let config = EngineConfig::default().with_difficulty(Difficulty::Difficult);
        assert_eq!(config.depth_limit, 6);

        let config: EngineConfig = serde_json::from_str(r#"{ "depth_limit": 3 }"#).unwrap();
        assert_eq!(config.with_difficulty(Difficulty::Easy).depth_limit, 4);
    }

    #[test]
    fn test_build_evaluator() {
        let board = Board::new(8).unwrap();
        let heuristic = EngineConfig::default().build_evaluator();
        // Material is level; four black pieces hold row 7.
        assert_eq!(heuristic.evaluate(&board, Player::Black), 4 * WEIGHT_EDGE_ROW);

        let config = EngineConfig {
            evaluator: EvaluatorKind::PieceCount,
            ..EngineConfig::default()
        };
        assert_eq!(config.build_evaluator().evaluate(&board, Player::White), 0);
    }
}
