//! Minimax search with alpha-beta pruning.
//!
//! Scores are taken from the evaluator's White-positive scale and multiplied
//! once by the root side's sign, so the root player maximizes and its
//! opponent minimizes. Nothing is negated per ply.

use game_core::{EngineConfig, Evaluator, GameState, SearchError, TimeControl};
use tracing::debug;

/// Result of a search plus statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<M> {
    pub best_move: M,
    /// Value of `best_move` from the root side's point of view
    pub score: f64,
    /// Positions visited below the root
    pub nodes: u64,
    /// Root moves whose subtree was searched to full depth
    pub completed_root_moves: usize,
    /// True if the time budget cut the root loop short
    pub stopped: bool,
}

/// Depth-bounded minimax engine.
pub struct AlphaBetaEngine<G: GameState> {
    evaluator: Box<dyn Evaluator<G>>,
}

impl<G: GameState> AlphaBetaEngine<G> {
    pub fn new(evaluator: impl Evaluator<G> + 'static) -> Self {
        Self::with_boxed(Box::new(evaluator))
    }

    pub fn with_boxed(evaluator: Box<dyn Evaluator<G>>) -> Self {
        Self { evaluator }
    }

    pub fn select_move(&self, pos: &G, config: &EngineConfig) -> Result<G::Move, SearchError> {
        self.search(pos, config).map(|report| report.best_move)
    }

    /// Searches every root move to `config.max_depth` plies.
    ///
    /// The clock is only consulted between root moves, and only after the
    /// first one has been scored, so a search always returns a move and a
    /// root subtree in progress always completes.
    pub fn search(
        &self,
        pos: &G,
        config: &EngineConfig,
    ) -> Result<SearchReport<G::Move>, SearchError> {
        let clock = TimeControl::start(Some(config.time_limit_per_move));
        config.validate_adversarial()?;

        let moves = pos.legal_moves();
        match moves.as_slice() {
            [] => return Err(SearchError::NoLegalMoves),
            [only] => {
                return Ok(SearchReport {
                    best_move: *only,
                    score: 0.0,
                    nodes: 0,
                    completed_root_moves: 0,
                    stopped: false,
                })
            }
            _ => {}
        }

        let orientation = pos.to_move().sign();
        let evaluator = self.evaluator.as_ref();
        let mut nodes = 0u64;
        let mut alpha = f64::NEG_INFINITY;
        let mut best: Option<(G::Move, f64)> = None;
        let mut completed = 0;
        let mut stopped = false;

        for (i, &mv) in moves.iter().enumerate() {
            if i > 0 && clock.expired() {
                stopped = true;
                break;
            }

            nodes += 1;
            let value = minimax(
                &pos.apply(mv),
                config.max_depth - 1,
                alpha,
                f64::INFINITY,
                false,
                orientation,
                evaluator,
                &mut nodes,
            );
            completed += 1;

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
            alpha = alpha.max(value);
        }

        // The first root move is always searched
        let (best_move, score) = best.ok_or(SearchError::InsufficientSearchBudget)?;
        let report = SearchReport {
            best_move,
            score,
            nodes,
            completed_root_moves: completed,
            stopped,
        };

        debug!(
            depth = config.max_depth,
            nodes = report.nodes,
            completed = report.completed_root_moves,
            root_moves = moves.len(),
            stopped = report.stopped,
            score = report.score,
            best_move = ?report.best_move,
            elapsed_ms = clock.elapsed().as_millis() as u64,
            "alpha-beta search finished"
        );
        Ok(report)
    }
}

/// Minimax value of `pos` searched `depth` plies deep.
///
/// `orientation` is `+1.0` when the maximizing player is White and `-1.0`
/// when it is Black; leaf scores are `orientation * evaluator.score(pos)`.
/// `nodes` is incremented once per position visited below `pos`.
#[allow(clippy::too_many_arguments)]
pub fn minimax<G, E>(
    pos: &G,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
    orientation: f64,
    evaluator: &E,
    nodes: &mut u64,
) -> f64
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    if depth == 0 || pos.is_terminal() {
        return orientation * evaluator.score(pos);
    }

    let moves = pos.legal_moves();
    if moves.is_empty() {
        return orientation * evaluator.score(pos);
    }

    if maximizing {
        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            *nodes += 1;
            let value = minimax(
                &pos.apply(mv),
                depth - 1,
                alpha,
                beta,
                false,
                orientation,
                evaluator,
                nodes,
            );
            best = best.max(value);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for mv in moves {
            *nodes += 1;
            let value = minimax(
                &pos.apply(mv),
                depth - 1,
                alpha,
                beta,
                true,
                orientation,
                evaluator,
                nodes,
            );
            best = best.min(value);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
