//! Simulation phase: play a position out and score the result.

use rand::seq::SliceRandom;
use rand::Rng;

use game_core::{EngineConfig, Evaluator, GameState, RolloutPolicy, Side};

/// Plays `start` out with the configured rollout policy and returns the
/// result from `root_side`'s point of view, in `[-1, 1]`.
///
/// A finished game scores +1 / -1 / 0. A rollout cut off by
/// `rollout_depth_cap` scores `tanh(eval / rollout_score_scale)`, with the
/// evaluator's White-positive score turned towards `root_side`.
pub fn rollout<G, E, R>(
    start: &G,
    root_side: Side,
    evaluator: &E,
    config: &EngineConfig,
    rng: &mut R,
) -> f64
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
    R: Rng + ?Sized,
{
    let mut pos = start.clone();
    let mut plies = 0u32;

    loop {
        if let Some(outcome) = pos.outcome() {
            return outcome.score_for(root_side);
        }
        if config.rollout_depth_cap.is_some_and(|cap| plies >= cap) {
            let score = root_side.sign() * evaluator.score(&pos);
            return (score / config.rollout_score_scale).tanh();
        }

        let moves = pos.legal_moves();
        let Some(mv) = pick_move(&pos, &moves, config.rollout, rng) else {
            // No moves but no outcome either; nothing left to play.
            return 0.0;
        };
        pos = pos.apply(mv);
        plies += 1;
    }
}

fn pick_move<G, R>(pos: &G, moves: &[G::Move], policy: RolloutPolicy, rng: &mut R) -> Option<G::Move>
where
    G: GameState,
    R: Rng + ?Sized,
{
    match policy {
        RolloutPolicy::Uniform => moves.choose(rng).copied(),
        RolloutPolicy::Tactical => {
            let classes: Vec<_> = moves.iter().map(|&mv| pos.move_class(mv)).collect();
            let best = classes.iter().max()?;
            let candidates: Vec<G::Move> = moves
                .iter()
                .zip(&classes)
                .filter(|(_, class)| *class == best)
                .map(|(&mv, _)| mv)
                .collect();
            candidates.choose(rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::testing::{leaf, node, LeafValue, TreeGame};
    use game_core::FnEvaluator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn config(cap: Option<u32>) -> EngineConfig {
        EngineConfig::for_testing().with_rollout_depth_cap(cap)
    }

    #[test]
    fn test_terminal_start_scores_outcome() {
        let game = TreeGame::new(node(vec![leaf(1.0)])).apply(0);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let eval = LeafValue::new();

        assert_eq!(rollout(&game, Side::White, &eval, &config(None), &mut rng), 1.0);
        assert_eq!(rollout(&game, Side::Black, &eval, &config(None), &mut rng), -1.0);
        assert_eq!(eval.calls(), 0);
    }

    #[test]
    fn test_uncapped_rollout_reaches_leaf() {
        // Every leaf is a Black win
        let game = TreeGame::uniform(2, 3, &[-1.0; 8]);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let result = rollout(&game, Side::White, &LeafValue::new(), &config(None), &mut rng);
        assert_eq!(result, -1.0);
    }

    #[test]
    fn test_capped_rollout_squashes_evaluation() {
        let game = TreeGame::uniform(2, 3, &[1.0; 8]);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let eval = FnEvaluator(|_: &TreeGame| 5.0);
        let cfg = config(Some(0));

        let white = rollout(&game, Side::White, &eval, &cfg, &mut rng);
        let black = rollout(&game, Side::Black, &eval, &cfg, &mut rng);
        assert!((white - (5.0f64 / cfg.rollout_score_scale).tanh()).abs() < 1e-12);
        assert!((black + white).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_result() {
        let game = TreeGame::uniform(3, 3, &[
            1.0, -1.0, 0.0, -1.0, 1.0, 0.0, 0.0, 1.0, -1.0, //
            -1.0, 0.0, 1.0, 1.0, 1.0, -1.0, 0.0, 0.0, 1.0, //
            1.0, 0.0, -1.0, -1.0, -1.0, 1.0, 0.0, 1.0, 0.0,
        ]);
        let cfg = config(None);
        let results: Vec<f64> = (0..2)
            .map(|_| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                (0..20)
                    .map(|_| rollout(&game, Side::White, &LeafValue::new(), &cfg, &mut rng))
                    .sum()
            })
            .collect();
        assert_eq!(results[0], results[1]);
    }
}
