//! Material-only evaluation.

use chess_rules::{Board, ChessPosition, Color, Piece};
use game_core::Evaluator;

/// Piece values in pawns, indexed by `Piece as usize`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [f64; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 0.0];

/// White material minus Black material, in pawns.
pub fn material_balance(board: &Board) -> f64 {
    Piece::ALL
        .iter()
        .map(|&piece| {
            let white = board.colored_pieces(Color::White, piece).len() as f64;
            let black = board.colored_pieces(Color::Black, piece).len() as f64;
            PIECE_VALUES[piece as usize] * (white - black)
        })
        .sum()
}

/// Scores a position by material balance alone. The king counts zero since
/// both sides always have one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<ChessPosition> for MaterialEvaluator {
    fn score(&self, pos: &ChessPosition) -> f64 {
        material_balance(pos.board())
    }
}
