//! Self-play matches between two search strategies.
//!
//! [`MatchRunner`] plays a series of games from a fixed start position,
//! alternating colours, and collects them into a [`MatchSummary`] that can be
//! written out as JSON.

mod match_runner;
mod results;

pub use match_runner::{MatchConfig, MatchRunner, Player};
pub use results::{GameRecord, GameResult, MatchResult, MatchSummary, ResultsError, Termination};
