//! Randomized tree search engine.
//!
//! Monte Carlo tree search with UCT selection over any
//! [`game_core::GameState`]. Each call builds a fresh arena-backed
//! [`SearchTree`], runs selection, expansion, simulation and backpropagation
//! until the time budget runs out, then plays the most visited root move.

mod node;
mod rollout;
mod search;
pub mod tree;

pub use node::{NodeId, SearchNode};
pub use rollout::rollout;
pub use search::{MctsEngine, SearchReport};
pub use tree::SearchTree;
