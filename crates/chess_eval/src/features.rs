//! Board encoding for the learned evaluator.
//!
//! 774 binary inputs:
//! - 64 squares x 12 piece bits, a1 first. Per square: White P N B R Q K,
//!   then Black P N B R Q K.
//! - Castling rights: White queenside, White kingside, Black queenside,
//!   Black kingside.
//! - En passant capture available.
//! - White to move.

use chess_rules::{ChessPosition, Color, Piece, Square};

pub const NUM_INPUTS: usize = 774;

const BITS_PER_SQUARE: usize = 12;
const BOARD_BITS: usize = 64 * BITS_PER_SQUARE;

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Encodes a position as network inputs. The encoding is absolute (not
/// relative to the side to move); the last input carries the turn.
pub fn encode_board(pos: &ChessPosition) -> Vec<f32> {
    let board = pos.board();
    let mut inputs = vec![0.0f32; NUM_INPUTS];

    for &sq in &Square::ALL {
        let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else {
            continue;
        };
        let offset = match color {
            Color::White => 0,
            Color::Black => 6,
        };
        inputs[sq as usize * BITS_PER_SQUARE + offset + piece_bit(piece)] = 1.0;
    }

    let white = board.castle_rights(Color::White);
    let black = board.castle_rights(Color::Black);
    inputs[BOARD_BITS] = flag(white.long.is_some());
    inputs[BOARD_BITS + 1] = flag(white.short.is_some());
    inputs[BOARD_BITS + 2] = flag(black.long.is_some());
    inputs[BOARD_BITS + 3] = flag(black.short.is_some());
    inputs[BOARD_BITS + 4] = flag(board.en_passant().is_some());
    inputs[BOARD_BITS + 5] = flag(board.side_to_move() == Color::White);

    inputs
}

fn piece_bit(piece: Piece) -> usize {
    match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    }
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
