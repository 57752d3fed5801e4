//! Chess position evaluators.
//!
//! Every evaluator here scores positions in pawn units, **positive for
//! White**, regardless of the side to move. The search engines convert to
//! their own perspective once per search.
//!
//! - [`MaterialEvaluator`]: signed piece values only.
//! - [`HeuristicEvaluator`]: phase-weighted sum of material, mobility, king
//!   safety, pawn structure, center control and piece-square tables.
//! - [`LearnedEvaluator`]: a small feed-forward network with weights loaded
//!   from JSON.

mod features;
mod heuristic;
mod learned;
mod material;
mod phase;
mod tables;

pub use features::{encode_board, NUM_INPUTS};
pub use heuristic::{FactorWeights, HeuristicEvaluator, HeuristicWeights, WIN_SCORE};
pub use learned::{Activation, EvalError, LayerWeights, LearnedEvaluator, NetworkWeights};
pub use material::{material_balance, MaterialEvaluator, PIECE_VALUES};
pub use phase::GamePhase;
