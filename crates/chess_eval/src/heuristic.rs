//! Multi-factor static evaluation.
//!
//! The score is a weighted sum of six sub-scores, each White-positive and in
//! pawn units. Weights depend on the [`GamePhase`]. Finished games short-cut
//! to `±WIN_SCORE` or zero.

use chess_rules::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_rook_moves, BitBoard, Board,
    ChessPosition, Color, Piece, Square,
};
use game_core::{Evaluator, GameState, Outcome, Side};

use crate::material::material_balance;
use crate::phase::GamePhase;
use crate::tables::piece_square;

/// Score of a decided game, far outside the range of any static evaluation.
pub const WIN_SCORE: f64 = 1000.0;

const MOBILITY_PER_SQUARE: f64 = 0.05;
const KNIGHT_ON_RIM: f64 = 0.15;
const BISHOP_BLOCKED_BY_PAWN: f64 = 0.05;

const SHIELD_PAWN: f64 = 0.15;
const ENEMY_NEAR_KING: f64 = 0.1;
const KING_ZONE_ATTACK: f64 = 0.05;

const DOUBLED_PAWN: f64 = 0.25;
const ISOLATED_PAWN: f64 = 0.2;
const PASSED_PAWN: f64 = 0.2;
const PASSED_PAWN_PER_RANK: f64 = 0.05;

const CENTER_OCCUPANT: f64 = 0.1;
const CENTER_ATTACK: f64 = 0.05;

/// One factor's weight in each game phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub opening: f64,
    pub middlegame: f64,
    pub endgame: f64,
}

impl FactorWeights {
    pub const fn new(opening: f64, middlegame: f64, endgame: f64) -> Self {
        Self {
            opening,
            middlegame,
            endgame,
        }
    }

    pub fn for_phase(&self, phase: GamePhase) -> f64 {
        match phase {
            GamePhase::Opening => self.opening,
            GamePhase::Middlegame => self.middlegame,
            GamePhase::Endgame => self.endgame,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicWeights {
    pub material: FactorWeights,
    pub mobility: FactorWeights,
    pub king_safety: FactorWeights,
    pub pawn_structure: FactorWeights,
    pub center_control: FactorWeights,
    pub piece_squares: FactorWeights,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            material: FactorWeights::new(0.8, 1.0, 0.8),
            mobility: FactorWeights::new(1.0, 1.0, 1.0),
            king_safety: FactorWeights::new(0.7, 0.9, 1.0),
            pawn_structure: FactorWeights::new(1.0, 1.0, 1.0),
            center_control: FactorWeights::new(1.0, 0.7, 0.5),
            piece_squares: FactorWeights::new(1.0, 1.0, 1.0),
        }
    }
}

/// Phase-weighted combination of material, mobility, king safety, pawn
/// structure, center control and piece-square bonuses.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Static score of a board, ignoring whether the game is over.
    pub fn static_score(&self, board: &Board) -> f64 {
        let phase = GamePhase::classify(board);
        let w = &self.weights;

        w.material.for_phase(phase) * material_balance(board)
            + w.mobility.for_phase(phase) * mobility(board)
            + w.king_safety.for_phase(phase) * king_safety(board)
            + w.pawn_structure.for_phase(phase) * pawn_structure(board)
            + w.center_control.for_phase(phase) * center_control(board)
            + w.piece_squares.for_phase(phase) * piece_squares(board)
    }
}

impl Evaluator<ChessPosition> for HeuristicEvaluator {
    fn score(&self, pos: &ChessPosition) -> f64 {
        match pos.outcome() {
            Some(Outcome::Win(Side::White)) => WIN_SCORE,
            Some(Outcome::Win(Side::Black)) => -WIN_SCORE,
            Some(Outcome::Draw) => 0.0,
            None => self.static_score(pos.board()),
        }
    }
}

fn white_minus_black(f: impl Fn(Color) -> f64) -> f64 {
    f(Color::White) - f(Color::Black)
}

fn file_of(sq: Square) -> i32 {
    sq.file() as i32
}

fn rank_of(sq: Square) -> i32 {
    sq.rank() as i32
}

/// Rank counted from `color`'s own back rank.
fn relative_rank(sq: Square, color: Color) -> i32 {
    match color {
        Color::White => rank_of(sq),
        Color::Black => 7 - rank_of(sq),
    }
}

fn is_light(sq: Square) -> bool {
    (file_of(sq) + rank_of(sq)) % 2 == 1
}

fn piece_attacks(piece: Piece, sq: Square, occupied: BitBoard) -> BitBoard {
    match piece {
        Piece::Knight => get_knight_moves(sq),
        Piece::Bishop => get_bishop_moves(sq, occupied),
        Piece::Rook => get_rook_moves(sq, occupied),
        Piece::Queen => get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied),
        Piece::King => get_king_moves(sq),
        // Pawn captures depend on color; see `pawn_attacks`.
        Piece::Pawn => BitBoard::EMPTY,
    }
}

fn opponent(color: Color) -> Color {
    match color {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

fn pawn_attacks(sq: Square, color: Color) -> BitBoard {
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let rank = rank_of(sq) + forward;
    let mut attacks = BitBoard::EMPTY;
    if !(0..8).contains(&rank) {
        return attacks;
    }
    for file in [file_of(sq) - 1, file_of(sq) + 1] {
        if (0..8).contains(&file) {
            attacks |= Square::index((rank * 8 + file) as usize).bitboard();
        }
    }
    attacks
}

/// Every square `color` attacks, pawns included.
fn attacked_by(board: &Board, color: Color) -> BitBoard {
    let occupied = board.occupied();
    let mut attacks = BitBoard::EMPTY;
    for sq in board.colored_pieces(color, Piece::Pawn) {
        attacks |= pawn_attacks(sq, color);
    }
    for piece in [
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ] {
        for sq in board.colored_pieces(color, piece) {
            attacks |= piece_attacks(piece, sq, occupied);
        }
    }
    attacks
}

/// Squares reachable by minor and major pieces, with penalties for knights on
/// the rim and bishops hemmed in by their own pawns.
fn mobility(board: &Board) -> f64 {
    white_minus_black(|color| {
        let own = board.colors(color);
        let occupied = board.occupied();
        let mut score = 0.0;

        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            for sq in board.colored_pieces(color, piece) {
                let reach = piece_attacks(piece, sq, occupied) & !own;
                score += MOBILITY_PER_SQUARE * reach.len() as f64;
            }
        }

        for sq in board.colored_pieces(color, Piece::Knight) {
            let (file, rank) = (file_of(sq), rank_of(sq));
            if file == 0 || file == 7 || rank == 0 || rank == 7 {
                score -= KNIGHT_ON_RIM;
            }
        }

        let pawns = board.colored_pieces(color, Piece::Pawn);
        for bishop in board.colored_pieces(color, Piece::Bishop) {
            let blockers = pawns
                .into_iter()
                .filter(|&pawn| is_light(pawn) == is_light(bishop))
                .count();
            score -= BISHOP_BLOCKED_BY_PAWN * blockers as f64;
        }

        score
    })
}

/// Pawn shield in front of the king, minus pressure from nearby enemy pieces
/// and attacks on the squares around it.
fn king_safety(board: &Board) -> f64 {
    white_minus_black(|color| {
        let king = board.king(color);
        let enemy = opponent(color);
        let forward = match color {
            Color::White => 1,
            Color::Black => -1,
        };

        let shield = board
            .colored_pieces(color, Piece::Pawn)
            .into_iter()
            .filter(|&pawn| {
                (file_of(pawn) - file_of(king)).abs() <= 1
                    && rank_of(pawn) == rank_of(king) + forward
            })
            .count();

        let mut proximity = 0.0;
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            for sq in board.colored_pieces(enemy, piece) {
                let distance = (file_of(sq) - file_of(king))
                    .abs()
                    .max((rank_of(sq) - rank_of(king)).abs());
                proximity += 1.0 / distance.max(1) as f64;
            }
        }

        let zone = get_king_moves(king) | king.bitboard();
        let zone_attacks = (attacked_by(board, enemy) & zone).len();

        SHIELD_PAWN * shield as f64
            - ENEMY_NEAR_KING * proximity
            - KING_ZONE_ATTACK * zone_attacks as f64
    })
}

/// Doubled and isolated pawns count against, passed pawns for, more so the
/// further they have advanced.
fn pawn_structure(board: &Board) -> f64 {
    white_minus_black(|color| {
        let own: Vec<Square> = board.colored_pieces(color, Piece::Pawn).into_iter().collect();
        let enemy: Vec<Square> = board
            .colored_pieces(opponent(color), Piece::Pawn)
            .into_iter()
            .collect();

        let mut per_file = [0u32; 8];
        for &pawn in &own {
            per_file[file_of(pawn) as usize] += 1;
        }

        let mut score = 0.0;
        for &count in &per_file {
            if count > 1 {
                score -= DOUBLED_PAWN * (count - 1) as f64;
            }
        }

        for &pawn in &own {
            let file = file_of(pawn);
            let neighbours = [file - 1, file + 1]
                .into_iter()
                .filter(|f| (0..8).contains(f))
                .map(|f| per_file[f as usize])
                .sum::<u32>();
            if neighbours == 0 {
                score -= ISOLATED_PAWN;
            }

            let advance = relative_rank(pawn, color);
            let blocked = enemy.iter().any(|&other| {
                (file_of(other) - file).abs() <= 1 && relative_rank(other, color) > advance
            });
            if !blocked {
                score += PASSED_PAWN + PASSED_PAWN_PER_RANK * advance as f64;
            }
        }

        score
    })
}

/// c4-f5 block.
fn center_squares() -> BitBoard {
    let mut center = BitBoard::EMPTY;
    for rank in 3..=4 {
        for file in 2..=5 {
            center |= Square::index(rank * 8 + file).bitboard();
        }
    }
    center
}

/// Pieces standing on the central squares, plus how many of them each side
/// attacks.
fn center_control(board: &Board) -> f64 {
    let center = center_squares();
    white_minus_black(|color| {
        let occupants = (board.colors(color) & center).len();
        let attacked = (attacked_by(board, color) & center).len();
        CENTER_OCCUPANT * occupants as f64 + CENTER_ATTACK * attacked as f64
    })
}

fn piece_squares(board: &Board) -> f64 {
    white_minus_black(|color| {
        let mut centipawns = 0;
        for &piece in &Piece::ALL {
            for sq in board.colored_pieces(color, piece) {
                let idx = match color {
                    Color::White => sq as usize,
                    Color::Black => sq as usize ^ 56,
                };
                centipawns += piece_square(piece, idx);
            }
        }
        centipawns as f64 / 100.0
    })
}

#[cfg(test)]
#[path = "heuristic_tests.rs"]
mod heuristic_tests;
