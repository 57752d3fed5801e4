//! FEN positions and UCI long algebraic moves.
//!
//! cozy-chess encodes castling as "king takes own rook" (`e1h1`), while UCI
//! GUIs send and expect the king's two-square move (`e1g1`). Conversion
//! happens here in both directions.

use cozy_chess::{Board, File, Move, Piece, Square};
use game_core::{Notation, NotationError};

use crate::ChessPosition;

impl Notation for ChessPosition {
    fn initial() -> Self {
        ChessPosition::startpos()
    }

    fn encode(&self) -> String {
        self.board().to_string()
    }

    fn decode(text: &str) -> Result<Self, NotationError> {
        let board = Board::from_fen(text.trim(), false).map_err(|e| NotationError::InvalidPosition {
            text: text.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(ChessPosition::from_board(board))
    }

    fn encode_move(&self, mv: Move) -> String {
        let board = self.board();
        let mut mv = mv;
        if board.piece_on(mv.from) == Some(Piece::King) && board.color_on(mv.to) == Some(board.side_to_move()) {
            let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
                File::G
            } else {
                File::C
            };
            mv.to = Square::new(file, mv.from.rank());
        }
        mv.to_string()
    }

    fn decode_move(&self, text: &str) -> Result<Move, NotationError> {
        let mut mv: Move = text
            .parse()
            .map_err(|_| NotationError::InvalidMove(text.to_string()))?;

        let board = self.board();
        if board.piece_on(mv.from) == Some(Piece::King)
            && mv.from.file() == File::E
            && mv.from.rank() == mv.to.rank()
        {
            let rook_file = match mv.to.file() {
                File::G => Some(File::H),
                File::C => Some(File::A),
                _ => None,
            };
            if let Some(rook_file) = rook_file {
                mv.to = Square::new(rook_file, mv.from.rank());
            }
        }

        if self.is_legal(mv) {
            Ok(mv)
        } else {
            Err(NotationError::IllegalMove(text.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
