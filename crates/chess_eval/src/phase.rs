use chess_rules::Board;

/// Coarse game phase, classified by the number of pieces left on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    /// More than 26 pieces (kings and pawns included) is the opening, 11 to 26
    /// the middlegame, 10 or fewer the endgame.
    pub fn classify(board: &Board) -> Self {
        match board.occupied().len() {
            n if n > 26 => GamePhase::Opening,
            n if n > 10 => GamePhase::Middlegame,
            _ => GamePhase::Endgame,
        }
    }
}
