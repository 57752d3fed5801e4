use std::fmt::Debug;

use crate::error::NotationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// +1.0 for White, -1.0 for Black. Multiplying a White-positive score by
    /// this gives the score from this side's point of view.
    pub fn sign(self) -> f64 {
        match self {
            Side::White => 1.0,
            Side::Black => -1.0,
        }
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    /// +1 for a win of `side`, -1 for a loss, 0 for a draw.
    pub fn score_for(self, side: Side) -> f64 {
        match self {
            Outcome::Win(winner) if winner == side => 1.0,
            Outcome::Win(_) => -1.0,
            Outcome::Draw => 0.0,
        }
    }
}

/// Coarse tactical category of a move, used by rollout policies.
///
/// Ordered by rollout preference: captures first, then checks, then
/// promotions, then everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveClass {
    Quiet,
    Promotion,
    Check,
    Capture,
}

/// A position of a two-player, perfect-information, turn-based game.
///
/// This is the whole surface the search engines consume from a rules engine.
/// Positions are values: `apply` returns a new position and never mutates the
/// receiver, so sibling explorations never share state.
pub trait GameState: Clone {
    type Move: Copy + Eq + Debug;

    /// Legal moves in a deterministic order for a fixed position.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&self, mv: Self::Move) -> Self;

    fn is_terminal(&self) -> bool;

    /// `Some` exactly when the position is terminal.
    fn outcome(&self) -> Option<Outcome>;

    fn to_move(&self) -> Side;

    /// Tactical category of a legal move. Games without a notion of captures
    /// or checks can keep the default.
    fn move_class(&self, _mv: Self::Move) -> MoveClass {
        MoveClass::Quiet
    }
}

/// Textual encodings of positions and moves, as spoken by the protocol.
pub trait Notation: GameState + Sized {
    /// The standard starting position.
    fn initial() -> Self;

    fn encode(&self) -> String;

    fn decode(text: &str) -> Result<Self, NotationError>;

    fn encode_move(&self, mv: Self::Move) -> String;

    /// Parses a move in the context of this position. Fails with
    /// [`NotationError::IllegalMove`] if the text is well formed but the move
    /// is not legal here.
    fn decode_move(&self, text: &str) -> Result<Self::Move, NotationError>;
}
