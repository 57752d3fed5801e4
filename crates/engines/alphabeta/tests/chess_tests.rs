//! Alpha-beta on real chess positions.

use std::time::Duration;

use alphabeta_engine::AlphaBetaEngine;
use chess_eval::{HeuristicEvaluator, MaterialEvaluator, WIN_SCORE};
use chess_rules::ChessPosition;
use game_core::{EngineConfig, GameState, Notation};

fn config(depth: u32) -> EngineConfig {
    EngineConfig::default()
        .with_max_depth(depth)
        .with_time_limit(Duration::from_secs(30))
}

#[test]
fn test_finds_back_rank_mate() {
    let pos = ChessPosition::decode("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let engine = AlphaBetaEngine::new(HeuristicEvaluator::new());

    let report = engine.search(&pos, &config(2)).unwrap();
    assert_eq!(pos.encode_move(report.best_move), "e1e8");
    assert_eq!(report.score, WIN_SCORE);
}

#[test]
fn test_black_finds_mate() {
    let pos = ChessPosition::decode("4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let engine = AlphaBetaEngine::new(HeuristicEvaluator::new());

    let mv = engine.select_move(&pos, &config(2)).unwrap();
    assert_eq!(pos.encode_move(mv), "e8e1");
}

#[test]
fn test_captures_hanging_queen() {
    let pos = ChessPosition::decode("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let engine = AlphaBetaEngine::new(MaterialEvaluator::new());

    let report = engine.search(&pos, &config(2)).unwrap();
    assert_eq!(pos.encode_move(report.best_move), "d1d5");
    assert_eq!(report.score, 5.0);
}

#[test]
fn test_startpos_depth_three() {
    let pos = ChessPosition::startpos();
    let engine = AlphaBetaEngine::new(MaterialEvaluator::new());

    let report = engine.search(&pos, &config(3)).unwrap();
    assert!(pos.legal_moves().contains(&report.best_move));
    assert_eq!(report.completed_root_moves, 20);
    assert!(report.nodes > 20);
}
