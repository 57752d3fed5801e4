//! Engine configuration shared by both search strategies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// How the randomized engine picks which untried move to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionPolicy {
    /// Uniformly at random (seeded).
    #[default]
    Random,
    /// Apply every untried move, score the results with the evaluator from
    /// the mover's perspective and expand the best one.
    Greedy,
}

/// How moves are chosen during a rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolloutPolicy {
    /// Uniformly at random among legal moves.
    #[default]
    Uniform,
    /// Captures, then checks, then promotions; uniform among the best class.
    Tactical,
}

/// Configuration for a move-selection call.
///
/// Fields that only one strategy reads are ignored by the other.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Wall-clock budget for one move.
    pub time_limit_per_move: Duration,

    /// UCT exploration constant (randomized engine). Must be >= 0.
    pub exploration_weight: f64,

    /// Search depth in plies (adversarial engine). Must be >= 1.
    pub max_depth: u32,

    /// Maximum rollout length in plies. `None` plays rollouts to the end.
    pub rollout_depth_cap: Option<u32>,

    /// Divisor applied to evaluator scores of capped rollouts before they are
    /// squashed onto the [-1, 1] win/loss scale with `tanh`.
    pub rollout_score_scale: f64,

    pub expansion: ExpansionPolicy,

    pub rollout: RolloutPolicy,

    /// Seed for the randomized engine's RNG.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit_per_move: Duration::from_secs(5),
            exploration_weight: 1.41,
            max_depth: 3,
            rollout_depth_cap: None,
            rollout_score_scale: 10.0,
            expansion: ExpansionPolicy::Random,
            rollout: RolloutPolicy::Uniform,
            seed: 0x5eed,
        }
    }
}

impl EngineConfig {
    /// Fast settings for tests.
    pub fn for_testing() -> Self {
        Self {
            time_limit_per_move: Duration::from_millis(50),
            rollout_depth_cap: Some(40),
            ..Self::default()
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_per_move = limit;
        self
    }

    pub fn with_exploration_weight(mut self, w: f64) -> Self {
        self.exploration_weight = w;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_rollout_depth_cap(mut self, cap: Option<u32>) -> Self {
        self.rollout_depth_cap = cap;
        self
    }

    pub fn with_expansion(mut self, expansion: ExpansionPolicy) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn with_rollout(mut self, rollout: RolloutPolicy) -> Self {
        self.rollout = rollout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every field, whichever engine reads it.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.validate_randomized()?;
        self.validate_adversarial()
    }

    /// Checks the fields the randomized engine reads.
    pub fn validate_randomized(&self) -> Result<(), SearchError> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration weight must be a finite number >= 0, got {}",
                self.exploration_weight
            )));
        }
        if !self.rollout_score_scale.is_finite() || self.rollout_score_scale <= 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "rollout score scale must be > 0, got {}",
                self.rollout_score_scale
            )));
        }
        Ok(())
    }

    /// Checks the fields the adversarial engine reads.
    pub fn validate_adversarial(&self) -> Result<(), SearchError> {
        if self.max_depth < 1 {
            return Err(SearchError::InvalidConfiguration(format!(
                "search depth must be >= 1, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
