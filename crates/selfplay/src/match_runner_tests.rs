use super::*;
use chess_eval::{HeuristicEvaluator, MaterialEvaluator};
use game_core::Evaluator;
use std::time::Duration;
use uci_engine::StrategyKind;

fn player(name: &str, depth: u32, evaluator: Box<dyn Evaluator<ChessPosition>>) -> Player {
    Player::new(
        name,
        Strategy::build(StrategyKind::Alphabeta, evaluator),
        EngineConfig::for_testing()
            .with_max_depth(depth)
            .with_time_limit(Duration::from_secs(5)),
    )
}

fn alphabeta(name: &str, depth: u32) -> Player {
    player(name, depth, Box::new(MaterialEvaluator::new()))
}

fn from_fen(fen: &str) -> ChessPosition {
    ChessPosition::decode(fen).unwrap()
}

#[test]
fn test_self_play() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        max_moves: 20,
        ..Default::default()
    });
    let summary = runner.run_match(&alphabeta("first", 1), &alphabeta("second", 1));

    assert_eq!(summary.result.total_games(), 2);
    assert_eq!(summary.games.len(), 2);
    for game in &summary.games {
        assert!(game.moves.len() <= 20);
    }
}

#[test]
fn test_colors_alternate() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        max_moves: 4,
        ..Default::default()
    });
    let summary = runner.run_match(&alphabeta("first", 1), &alphabeta("second", 1));

    assert_eq!(summary.games[0].white, "first");
    assert_eq!(summary.games[1].white, "second");
}

#[test]
fn test_fixed_colors() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        max_moves: 2,
        alternate_colors: false,
        ..Default::default()
    });
    let summary = runner.run_match(&alphabeta("first", 1), &alphabeta("second", 1));

    assert!(summary.games.iter().all(|g| g.white == "first"));
}

#[test]
fn test_move_limit_is_draw() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 1,
        max_moves: 6,
        ..Default::default()
    });
    let game = runner.play_game(&alphabeta("white", 1), &alphabeta("black", 1));

    assert_eq!(game.termination, Termination::MoveLimit);
    assert_eq!(game.result, GameResult::Draw);
    assert_eq!(game.moves.len(), 6);
}

#[test]
fn test_checkmate_credits_winner() {
    // White mates with Qe8.
    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        max_moves: 10,
        alternate_colors: false,
        start_position: from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1"),
    });
    let summary = runner.run_match(
        &player("mater", 2, Box::new(HeuristicEvaluator::new())),
        &player("mated", 2, Box::new(HeuristicEvaluator::new())),
    );

    let game = &summary.games[0];
    assert_eq!(game.moves, vec!["e1e8".to_string()]);
    assert_eq!(game.termination, Termination::Checkmate);
    assert_eq!(game.result, GameResult::Win);
    assert_eq!(summary.result.wins, 2);
}

#[test]
fn test_finished_start_position() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 1,
        start_position: from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"),
        ..Default::default()
    });
    let game = runner.play_game(&alphabeta("white", 1), &alphabeta("black", 1));

    assert_eq!(game.termination, Termination::Stalemate);
    assert_eq!(game.result, GameResult::Draw);
    assert!(game.moves.is_empty());
    assert_eq!(game.final_position, "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
}

#[test]
fn test_insufficient_material() {
    // The white king takes the last black piece, leaving bare kings.
    let runner = MatchRunner::new(MatchConfig {
        num_games: 1,
        max_moves: 10,
        start_position: from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1"),
        ..Default::default()
    });
    let game = runner.play_game(&alphabeta("white", 1), &alphabeta("black", 1));

    assert_eq!(game.moves, vec!["e1d2".to_string()]);
    assert_eq!(game.termination, Termination::InsufficientMaterial);
    assert_eq!(game.result, GameResult::Draw);
}

#[test]
fn test_search_failure_forfeits() {
    let mut broken = alphabeta("broken", 1);
    broken.config.max_depth = 0;

    let runner = MatchRunner::new(MatchConfig {
        num_games: 1,
        ..Default::default()
    });
    let game = runner.play_game(&broken, &alphabeta("healthy", 1));

    assert_eq!(game.termination, Termination::SearchFailed);
    assert_eq!(game.result, GameResult::Loss);
    assert!(game.moves.is_empty());
}
