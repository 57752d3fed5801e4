pub mod config;
pub mod error;
pub mod time_control;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::*;
pub use error::*;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Evaluator trait: implemented by every position scorer (material, heuristic,
// learned). Search engines only ever see this one method.
// =============================================================================

/// Scores a position on a fixed orientation.
///
/// Every implementation must pick one sign convention and keep it: all the
/// evaluators shipped in this workspace score positive for [`Side::White`].
/// Engines convert to their own perspective with [`Side::sign`] once per
/// search, so scores are never negated per ply.
///
/// Implementations must be deterministic for a fixed position.
pub trait Evaluator<G: GameState> {
    fn score(&self, pos: &G) -> f64;
}

impl<G: GameState, E: Evaluator<G> + ?Sized> Evaluator<G> for Box<E> {
    fn score(&self, pos: &G) -> f64 {
        (**self).score(pos)
    }
}

/// Adapts a closure into an [`Evaluator`].
#[derive(Debug, Clone, Copy)]
pub struct FnEvaluator<F>(pub F);

impl<G: GameState, F: Fn(&G) -> f64> Evaluator<G> for FnEvaluator<F> {
    fn score(&self, pos: &G) -> f64 {
        (self.0)(pos)
    }
}
