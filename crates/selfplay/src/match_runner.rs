//! Match runner for playing games between strategies

use tracing::{info, warn};

use chess_rules::ChessPosition;
use game_core::{EngineConfig, GameState, Notation, Side};
use uci_engine::Strategy;

use crate::results::{GameRecord, GameResult, MatchSummary, Termination};

/// A named strategy with the configuration it searches with.
pub struct Player {
    pub name: String,
    pub strategy: Strategy<ChessPosition>,
    pub config: EngineConfig,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Strategy<ChessPosition>, config: EngineConfig) -> Self {
        Self {
            name: name.into(),
            strategy,
            config,
        }
    }
}

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Plies per game before declaring a draw
    pub max_moves: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Position every game starts from
    pub start_position: ChessPosition,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_moves: 200,
            alternate_colors: true,
            start_position: ChessPosition::startpos(),
        }
    }
}

/// Runs matches between two players
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Plays the whole match. The tally is from `player1`'s perspective.
    pub fn run_match(&self, player1: &Player, player2: &Player) -> MatchSummary {
        let mut summary = MatchSummary::new(&player1.name, &player2.name);

        for game_num in 0..self.config.num_games {
            let player1_white = !self.config.alternate_colors || game_num % 2 == 0;
            let game = if player1_white {
                self.play_game(player1, player2)
            } else {
                self.play_game(player2, player1)
            };

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                white = %game.white,
                black = %game.black,
                result = game.result.notation(),
                termination = ?game.termination,
                plies = game.moves.len(),
                "game finished"
            );
            summary.add_game(game, player1_white);
        }

        info!(
            wins = summary.result.wins,
            losses = summary.result.losses,
            draws = summary.result.draws,
            "match finished"
        );
        summary
    }

    /// Plays one game. The recorded result is from White's perspective.
    pub fn play_game(&self, white: &Player, black: &Player) -> GameRecord {
        let mut pos = self.config.start_position.clone();
        let mut moves = Vec::new();

        let termination = loop {
            if let Some(termination) = termination_of(&pos) {
                break termination;
            }
            if moves.len() >= self.config.max_moves as usize {
                break Termination::MoveLimit;
            }

            let player = match pos.to_move() {
                Side::White => white,
                Side::Black => black,
            };
            match player.strategy.select_move(&pos, &player.config) {
                Ok(mv) => {
                    moves.push(pos.encode_move(mv));
                    pos = pos.apply(mv);
                }
                Err(e) => {
                    warn!(player = %player.name, error = %e, "search failed, forfeiting");
                    break Termination::SearchFailed;
                }
            }
        };

        // Checkmate and forfeits lose for the side to move; everything else is drawn.
        let result = match termination {
            Termination::Checkmate | Termination::SearchFailed => match pos.to_move() {
                Side::White => GameResult::Loss,
                Side::Black => GameResult::Win,
            },
            _ => GameResult::Draw,
        };

        GameRecord {
            white: white.name.clone(),
            black: black.name.clone(),
            result,
            termination,
            moves,
            final_position: pos.encode(),
        }
    }
}

/// Why `pos` ends the game, if it does.
fn termination_of(pos: &ChessPosition) -> Option<Termination> {
    if !pos.has_legal_moves() {
        return Some(if pos.in_check() {
            Termination::Checkmate
        } else {
            Termination::Stalemate
        });
    }
    if pos.is_fifty_move_draw() {
        Some(Termination::FiftyMoves)
    } else if pos.is_threefold_repetition() {
        Some(Termination::Repetition)
    } else if pos.is_insufficient_material() {
        Some(Termination::InsufficientMaterial)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
