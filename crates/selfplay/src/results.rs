//! Match results storage and reporting

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to access results file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of one game from a chosen player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// The same result seen by the opponent.
    pub fn flip(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }

    /// Score notation, read as White's result.
    pub fn notation(self) -> &'static str {
        match self {
            GameResult::Win => "1-0",
            GameResult::Loss => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    FiftyMoves,
    Repetition,
    InsufficientMaterial,
    /// The ply cap was reached; scored as a draw.
    MoveLimit,
    /// The side to move could not produce a move and forfeits.
    SearchFailed,
}

/// One finished game. `result` is from White's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub result: GameResult,
    pub termination: Termination,
    /// Moves in coordinate notation.
    pub moves: Vec<String>,
    pub final_position: String,
}

/// Win/loss/draw tally from the first player's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 per win and 0.5 per draw, divided by games played. An empty match
    /// scores 0.5.
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// A complete match: both players, the tally and every game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub player1: String,
    pub player2: String,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchSummary {
    pub fn new(player1: &str, player2: &str) -> Self {
        Self {
            player1: player1.to_string(),
            player2: player2.to_string(),
            result: MatchResult::new(),
            games: Vec::new(),
        }
    }

    /// Adds a game, crediting the tally to whichever side player 1 played.
    pub fn add_game(&mut self, game: GameRecord, player1_white: bool) {
        let for_player1 = if player1_white {
            game.result
        } else {
            game.result.flip()
        };
        self.result.record(for_player1);
        self.games.push(game);
    }

    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} vs {} ===", self.player1, self.player2);
        for (i, game) in self.games.iter().enumerate() {
            let _ = writeln!(
                out,
                "Game {:>3}: {} - {}  {:<7} {:?} after {} plies",
                i + 1,
                game.white,
                game.black,
                game.result.notation(),
                game.termination,
                game.moves.len()
            );
        }
        let _ = writeln!(
            out,
            "Score: +{} -{} ={} ({:.1}%)",
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        );
        out
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
