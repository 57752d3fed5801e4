use cozy_chess::{Board, Color, Move, Piece};
use game_core::{GameState, MoveClass, Outcome, Side};

use crate::side_of;

/// A chess position plus the hashes needed for repetition detection.
#[derive(Clone, Debug)]
pub struct ChessPosition {
    board: Board,
    /// Hashes of earlier positions since the last capture or pawn move.
    /// Positions before an irreversible move can never repeat.
    history: Vec<u64>,
}

impl ChessPosition {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|moves| !moves.to.is_empty())
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let key = self.board.hash();
        self.history.iter().filter(|&&k| k == key).count() >= 2
    }

    /// Bare kings, or a single minor piece against a bare king.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let mating_material = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !mating_material.is_empty() {
            return false;
        }
        (b.pieces(Piece::Knight) | b.pieces(Piece::Bishop)).len() <= 1
    }

    pub fn is_en_passant(&self, mv: Move) -> bool {
        self.board.piece_on(mv.from) == Some(Piece::Pawn)
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        let enemy = opponent(self.board.side_to_move());
        self.board.color_on(mv.to) == Some(enemy) || self.is_en_passant(mv)
    }

    pub fn gives_check(&self, mv: Move) -> bool {
        let mut next = self.board.clone();
        next.play_unchecked(mv);
        !next.checkers().is_empty()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.is_legal(mv)
    }
}

fn opponent(color: Color) -> Color {
    match color {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self::startpos()
    }
}

impl PartialEq for ChessPosition {
    fn eq(&self, other: &Self) -> bool {
        self.board.hash() == other.board.hash()
            && self.board.halfmove_clock() == other.board.halfmove_clock()
            && self.board.fullmove_number() == other.board.fullmove_number()
    }
}

impl GameState for ChessPosition {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn apply(&self, mv: Move) -> Self {
        let mut board = self.board.clone();
        board.play_unchecked(mv);

        let history = if board.halfmove_clock() == 0 {
            Vec::new()
        } else {
            let mut h = Vec::with_capacity(self.history.len() + 1);
            h.extend_from_slice(&self.history);
            h.push(self.board.hash());
            h
        };

        Self { board, history }
    }

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                Outcome::Win(side_of(opponent(self.board.side_to_move())))
            } else {
                Outcome::Draw // Stalemate
            });
        }
        if self.is_fifty_move_draw() || self.is_threefold_repetition() || self.is_insufficient_material() {
            return Some(Outcome::Draw);
        }
        None
    }

    fn to_move(&self) -> Side {
        side_of(self.board.side_to_move())
    }

    fn move_class(&self, mv: Move) -> MoveClass {
        if self.is_capture(mv) {
            MoveClass::Capture
        } else if self.gives_check(mv) {
            MoveClass::Check
        } else if mv.promotion.is_some() {
            MoveClass::Promotion
        } else {
            MoveClass::Quiet
        }
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
