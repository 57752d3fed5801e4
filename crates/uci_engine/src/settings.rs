//! Engine settings file.
//!
//! A TOML file whose fields all have defaults, so an empty file (or no file
//! at all) is a working configuration. Environment variables override the
//! file:
//!
//! | variable                    | field                |
//! |-----------------------------|----------------------|
//! | `ENGINE_STRATEGY`           | `strategy`           |
//! | `ENGINE_MOVE_TIME`          | `time_limit_secs`    |
//! | `ENGINE_DEPTH`              | `max_depth`          |
//! | `ENGINE_EXPLORATION_WEIGHT` | `exploration_weight` |
//! | `ENGINE_LOG`                | `log_level`          |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use chess_eval::{EvalError, HeuristicEvaluator, LearnedEvaluator, MaterialEvaluator};
use chess_rules::ChessPosition;
use game_core::{EngineConfig, Evaluator, ExpansionPolicy, RolloutPolicy, SearchError};

use crate::strategy::{Strategy, StrategyKind};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] SearchError),

    #[error("failed to load evaluator: {0}")]
    Evaluator(#[from] EvalError),
}

/// Position scorer used by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    Material,
    #[default]
    Heuristic,
    Learned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub name: String,
    pub author: String,
    pub strategy: StrategyKind,
    pub evaluator: EvaluatorKind,
    /// JSON network weights, required by the learned evaluator
    pub weights_path: Option<PathBuf>,
    pub time_limit_secs: f64,
    pub exploration_weight: f64,
    pub max_depth: u32,
    pub rollout_depth_cap: Option<u32>,
    pub rollout_score_scale: f64,
    pub rollout_policy: RolloutPolicy,
    pub expansion_policy: ExpansionPolicy,
    pub seed: u64,
    pub log_level: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            name: format!("ML-chess {}", env!("CARGO_PKG_VERSION")),
            author: "ML-chess".to_string(),
            strategy: StrategyKind::default(),
            evaluator: EvaluatorKind::default(),
            weights_path: None,
            time_limit_secs: config.time_limit_per_move.as_secs_f64(),
            exploration_weight: config.exploration_weight,
            max_depth: config.max_depth,
            rollout_depth_cap: config.rollout_depth_cap,
            rollout_score_scale: config.rollout_score_scale,
            rollout_policy: config.rollout,
            expansion_policy: config.expansion,
            seed: config.seed,
            log_level: "info".to_string(),
        }
    }
}

/// Overwrites a field from an environment variable, failing on values that
/// do not parse.
macro_rules! env_override {
    ($lookup:expr, $field:expr, $var:expr) => {
        if let Some(v) = $lookup($var) {
            $field = v;
        }
    };
    ($lookup:expr, $field:expr, $var:expr, parse) => {
        if let Some(v) = $lookup($var) {
            $field = v
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnv { var: $var, value: v.clone() })?;
        }
    };
}

impl EngineSettings {
    /// Defaults, then the file at `path` if given, then the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!(path = %path.display(), "loading settings");
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        settings.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        env_override!(lookup, self.strategy, "ENGINE_STRATEGY", parse);
        env_override!(lookup, self.time_limit_secs, "ENGINE_MOVE_TIME", parse);
        env_override!(lookup, self.max_depth, "ENGINE_DEPTH", parse);
        env_override!(lookup, self.exploration_weight, "ENGINE_EXPLORATION_WEIGHT", parse);
        env_override!(lookup, self.log_level, "ENGINE_LOG");
        Ok(())
    }

    /// Checks the settings and converts them to a search configuration.
    pub fn engine_config(&self) -> Result<EngineConfig, SettingsError> {
        let invalid_time = || {
            SearchError::InvalidConfiguration(format!(
                "time limit must be a positive number of seconds, got {}",
                self.time_limit_secs
            ))
        };
        if self.time_limit_secs <= 0.0 {
            return Err(invalid_time().into());
        }
        let time_limit_per_move =
            Duration::try_from_secs_f64(self.time_limit_secs).map_err(|_| invalid_time())?;

        let config = EngineConfig {
            time_limit_per_move,
            exploration_weight: self.exploration_weight,
            max_depth: self.max_depth,
            rollout_depth_cap: self.rollout_depth_cap,
            rollout_score_scale: self.rollout_score_scale,
            expansion: self.expansion_policy,
            rollout: self.rollout_policy,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn build_evaluator(&self) -> Result<Box<dyn Evaluator<ChessPosition>>, SettingsError> {
        let evaluator: Box<dyn Evaluator<ChessPosition>> = match self.evaluator {
            EvaluatorKind::Material => Box::new(MaterialEvaluator::new()),
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator::new()),
            EvaluatorKind::Learned => {
                let path = self.weights_path.as_ref().ok_or_else(|| {
                    SearchError::InvalidConfiguration(
                        "the learned evaluator needs weights_path".into(),
                    )
                })?;
                Box::new(LearnedEvaluator::load(path)?)
            }
        };
        Ok(evaluator)
    }

    pub fn build_strategy(&self) -> Result<Strategy<ChessPosition>, SettingsError> {
        Ok(Strategy::build(self.strategy, self.build_evaluator()?))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod settings_tests;
