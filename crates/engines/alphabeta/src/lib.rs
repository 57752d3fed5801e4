//! Adversarial Search Engine
//!
//! Minimax with alpha-beta pruning, bounded by depth and a per-move time
//! budget.

mod search;

pub use search::{minimax, AlphaBetaEngine, SearchReport};
