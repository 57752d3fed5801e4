use super::*;

fn game(white: &str, black: &str, result: GameResult) -> GameRecord {
    GameRecord {
        white: white.to_string(),
        black: black.to_string(),
        result,
        termination: Termination::MoveLimit,
        moves: vec!["e2e4".to_string(), "e7e5".to_string()],
        final_position: "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
            .to_string(),
    }
}

#[test]
fn test_flip() {
    assert_eq!(GameResult::Win.flip(), GameResult::Loss);
    assert_eq!(GameResult::Loss.flip(), GameResult::Win);
    assert_eq!(GameResult::Draw.flip(), GameResult::Draw);
}

#[test]
fn test_score() {
    assert_eq!(MatchResult::new().score(), 0.5);

    let result = MatchResult {
        wins: 3,
        losses: 1,
        draws: 2,
    };
    assert_eq!(result.total_games(), 6);
    assert!((result.score() - 4.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_add_game_credits_player1_by_colour() {
    let mut summary = MatchSummary::new("mcts", "alphabeta");
    // White won with player 1 as White, then White won again with player 1 as Black.
    summary.add_game(game("mcts", "alphabeta", GameResult::Win), true);
    summary.add_game(game("alphabeta", "mcts", GameResult::Win), false);
    summary.add_game(game("alphabeta", "mcts", GameResult::Draw), false);

    assert_eq!(
        summary.result,
        MatchResult {
            wins: 1,
            losses: 1,
            draws: 1
        }
    );
    assert_eq!(summary.games.len(), 3);
}

#[test]
fn test_json_field_names() {
    let mut summary = MatchSummary::new("a", "b");
    summary.add_game(game("a", "b", GameResult::Loss), true);

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["result"]["losses"], 1);
    assert_eq!(value["games"][0]["result"], "loss");
    assert_eq!(value["games"][0]["termination"], "move_limit");
    assert_eq!(value["games"][0]["moves"][1], "e7e5");
}

#[test]
fn test_save_and_load() {
    let mut summary = MatchSummary::new("a", "b");
    summary.add_game(game("a", "b", GameResult::Draw), true);

    let path = std::env::temp_dir().join(format!("selfplay_summary_{}.json", std::process::id()));
    summary.save(&path).unwrap();
    let loaded = MatchSummary::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, summary);
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("selfplay_missing_summary.json");
    assert!(matches!(MatchSummary::load(&path), Err(ResultsError::Io(_))));
}

#[test]
fn test_report_lists_games() {
    let mut summary = MatchSummary::new("a", "b");
    summary.add_game(game("a", "b", GameResult::Win), true);
    summary.add_game(game("b", "a", GameResult::Draw), false);

    let report = summary.report();
    assert!(report.starts_with("=== a vs b ==="));
    assert!(report.contains("1-0"));
    assert!(report.contains("1/2-1/2"));
    assert!(report.contains("Score: +1 -0 =1 (75.0%)"));
}
