//! Chess rules adapter.
//!
//! Legal move generation, move application and FEN parsing come from
//! `cozy-chess`. This crate wraps its `Board` in [`ChessPosition`], which
//! implements the workspace's [`game_core::GameState`] and
//! [`game_core::Notation`] traits and adds the draw rules a search needs
//! (fifty-move rule, threefold repetition, insufficient material).

mod notation;
mod position;

pub use position::ChessPosition;

// Re-export the rules engine types the evaluators work with.
pub use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_rook_moves, BitBoard, Board, Color,
    File, Move, Piece, Rank, Square,
};

use game_core::Side;

pub fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}
