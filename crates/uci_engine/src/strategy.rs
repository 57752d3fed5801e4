use serde::{Deserialize, Serialize};

use alphabeta_engine::AlphaBetaEngine;
use game_core::{EngineConfig, Evaluator, GameState, SearchError};
use mcts_engine::MctsEngine;

/// Which search a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Monte Carlo tree search
    #[default]
    Mcts,
    /// Minimax with alpha-beta pruning
    Alphabeta,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Mcts => "mcts",
            StrategyKind::Alphabeta => "alphabeta",
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mcts" => Ok(StrategyKind::Mcts),
            "alphabeta" => Ok(StrategyKind::Alphabeta),
            other => Err(format!("unknown strategy '{other}' (expected mcts or alphabeta)")),
        }
    }
}

/// A search engine fixed for the lifetime of a session.
pub enum Strategy<G: GameState> {
    Randomized(MctsEngine<G>),
    Adversarial(AlphaBetaEngine<G>),
}

impl<G: GameState> Strategy<G> {
    pub fn build(kind: StrategyKind, evaluator: Box<dyn Evaluator<G>>) -> Self {
        match kind {
            StrategyKind::Mcts => Strategy::Randomized(MctsEngine::with_boxed(evaluator)),
            StrategyKind::Alphabeta => Strategy::Adversarial(AlphaBetaEngine::with_boxed(evaluator)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Randomized(_) => StrategyKind::Mcts,
            Strategy::Adversarial(_) => StrategyKind::Alphabeta,
        }
    }

    pub fn select_move(&self, pos: &G, config: &EngineConfig) -> Result<G::Move, SearchError> {
        match self {
            Strategy::Randomized(engine) => engine.select_move(pos, config),
            Strategy::Adversarial(engine) => engine.select_move(pos, config),
        }
    }
}
