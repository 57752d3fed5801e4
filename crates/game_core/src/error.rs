use thiserror::Error;

/// Errors returned by the search engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("no legal moves in the root position")]
    NoLegalMoves,

    #[error("time budget expired before a single search iteration completed")]
    InsufficientSearchBudget,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors from decoding position or move text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid position '{text}': {reason}")]
    InvalidPosition { text: String, reason: String },

    #[error("malformed move '{0}'")]
    InvalidMove(String),

    #[error("illegal move '{0}'")]
    IllegalMove(String),
}
