//! The search loop: selection, expansion, simulation, backpropagation.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use game_core::{
    EngineConfig, Evaluator, ExpansionPolicy, GameState, SearchError, Side, TimeControl,
};

use crate::node::NodeId;
use crate::rollout::rollout;
use crate::tree::SearchTree;

/// What a finished search found, plus statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<M> {
    pub best_move: M,
    /// Completed select/expand/simulate/backpropagate rounds
    pub iterations: u32,
    pub tree_size: usize,
    pub root_visits: u32,
    pub elapsed: Duration,
}

/// Monte Carlo tree search engine.
///
/// The evaluator is only consulted for rollouts cut off by
/// `rollout_depth_cap` and for greedy expansion.
pub struct MctsEngine<G: GameState> {
    evaluator: Box<dyn Evaluator<G>>,
}

impl<G: GameState> MctsEngine<G> {
    pub fn new(evaluator: impl Evaluator<G> + 'static) -> Self {
        Self::with_boxed(Box::new(evaluator))
    }

    pub fn with_boxed(evaluator: Box<dyn Evaluator<G>>) -> Self {
        Self { evaluator }
    }

    /// Picks a move for the side to move in `root`.
    pub fn select_move(&self, root: &G, config: &EngineConfig) -> Result<G::Move, SearchError> {
        self.search(root, config).map(|report| report.best_move)
    }

    /// Searches `root` until `config.time_limit_per_move` has elapsed.
    ///
    /// # Errors
    /// - `NoLegalMoves` if the root has no legal move
    /// - `InvalidConfiguration` if `config` fails validation
    /// - `InsufficientSearchBudget` if the budget ran out before a single
    ///   iteration finished
    pub fn search(
        &self,
        root: &G,
        config: &EngineConfig,
    ) -> Result<SearchReport<G::Move>, SearchError> {
        let clock = TimeControl::start(Some(config.time_limit_per_move));
        config.validate_randomized()?;

        let mut tree = SearchTree::new(root.clone());
        let root_moves = &tree.get(tree.root()).untried;
        match root_moves.as_slice() {
            [] => return Err(SearchError::NoLegalMoves),
            [only] => {
                trace!("single legal move, skipping search");
                return Ok(SearchReport {
                    best_move: *only,
                    iterations: 0,
                    tree_size: 1,
                    root_visits: 0,
                    elapsed: clock.elapsed(),
                });
            }
            _ => {}
        }

        let root_side = root.to_move();
        let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
        let mut iterations = 0u32;

        while !clock.expired() {
            let leaf = tree.select_leaf(config.exploration_weight);
            let expanded = self.expand(&mut tree, leaf, config, &mut rng);
            let result = rollout(
                &tree.get(expanded).position,
                root_side,
                self.evaluator.as_ref(),
                config,
                &mut rng,
            );
            tree.backpropagate(expanded, result);
            iterations += 1;
        }

        let best_move = tree
            .best_move()
            .ok_or(SearchError::InsufficientSearchBudget)?;
        let report = SearchReport {
            best_move,
            iterations,
            tree_size: tree.len(),
            root_visits: tree.get(tree.root()).visit_count,
            elapsed: clock.elapsed(),
        };

        debug!(
            iterations = report.iterations,
            tree_size = report.tree_size,
            elapsed_ms = report.elapsed.as_millis() as u64,
            best_move = ?report.best_move,
            "mcts search finished"
        );
        Ok(report)
    }

    /// Adds one child under `id` and returns it, or returns `id` itself when
    /// there is nothing to expand.
    fn expand<R: Rng>(
        &self,
        tree: &mut SearchTree<G>,
        id: NodeId,
        config: &EngineConfig,
        rng: &mut R,
    ) -> NodeId {
        let node = tree.get(id);
        if node.terminal || node.untried.is_empty() {
            return id;
        }

        let pick = match config.expansion {
            ExpansionPolicy::Random => rng.gen_range(0..node.untried.len()),
            ExpansionPolicy::Greedy => {
                greedy_pick(&node.position, &node.untried, self.evaluator.as_ref())
            }
        };

        let mv = tree.get_mut(id).untried.remove(pick);
        let position = tree.get(id).position.apply(mv);
        tree.add_child(id, mv, position)
    }
}

/// Index of the untried move whose result the mover likes best; the first
/// one wins ties.
fn greedy_pick<G: GameState>(
    position: &G,
    untried: &[G::Move],
    evaluator: &dyn Evaluator<G>,
) -> usize {
    let mover: Side = position.to_move();
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &mv) in untried.iter().enumerate() {
        let score = mover.sign() * evaluator.score(&position.apply(mv));
        if score > best.1 {
            best = (i, score);
        }
    }
    best.0
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
