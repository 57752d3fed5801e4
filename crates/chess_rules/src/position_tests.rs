use super::*;
use game_core::Notation;

fn pos(fen: &str) -> ChessPosition {
    ChessPosition::decode(fen).expect("valid FEN")
}

fn play(pos: &ChessPosition, uci: &str) -> ChessPosition {
    let mv = pos.decode_move(uci).expect("legal move");
    pos.apply(mv)
}

#[test]
fn test_startpos_moves() {
    let pos = ChessPosition::startpos();
    // Starting position has 20 legal moves
    assert_eq!(pos.legal_moves().len(), 20);
    assert_eq!(pos.to_move(), Side::White);
    assert!(!pos.is_terminal());
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(pos.legal_moves().len(), 48);
}

#[test]
fn test_checkmate_outcome() {
    // Scholar's mate: black is checkmated
    let pos = pos("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    assert!(pos.legal_moves().is_empty());
    assert!(pos.is_terminal());
    assert_eq!(pos.outcome(), Some(Outcome::Win(Side::White)));
}

#[test]
fn test_stalemate_is_draw() {
    // Black king in corner, white queen stalemates
    let pos = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(pos.legal_moves().is_empty());
    assert_eq!(pos.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_fifty_move_rule() {
    let at_limit = pos("8/8/8/4k3/8/4K3/4P3/8 w - - 100 60");
    assert!(at_limit.is_fifty_move_draw());
    assert_eq!(at_limit.outcome(), Some(Outcome::Draw));

    let below = pos("8/8/8/4k3/8/4K3/4P3/8 w - - 99 60");
    assert!(!below.is_fifty_move_draw());
    assert_eq!(below.outcome(), None);
}

#[test]
fn test_insufficient_material() {
    assert!(pos("8/8/8/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
    assert!(pos("8/8/8/4k3/8/4KN2/8/8 w - - 0 1").is_insufficient_material());
    assert!(!pos("8/8/8/4k3/8/4KR2/8/8 w - - 0 1").is_insufficient_material());
    assert!(!pos("8/8/8/4k3/8/3BKN2/8/8 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut pos = ChessPosition::startpos();
    for _ in 0..2 {
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            assert!(!pos.is_threefold_repetition());
            pos = play(&pos, mv);
        }
    }
    // Start position has now occurred three times
    assert!(pos.is_threefold_repetition());
    assert_eq!(pos.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_pawn_move_clears_repetition_history() {
    let mut pos = ChessPosition::startpos();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"] {
        pos = play(&pos, mv);
    }
    assert!(pos.history.is_empty());
}

#[test]
fn test_apply_does_not_mutate_parent() {
    let parent = ChessPosition::startpos();
    let before = parent.encode();
    let _child = play(&parent, "e2e4");
    assert_eq!(parent.encode(), before);
}

#[test]
fn test_move_classes() {
    // White: Qd1, pawn e5 with black pawn d5 just pushed (ep available), pawn b7 about to promote
    let pos = pos("4k3/1P6/8/3pP3/8/8/8/3QK3 w - d6 0 1");

    let ep = pos.decode_move("e5d6").unwrap();
    assert_eq!(pos.move_class(ep), MoveClass::Capture);

    let capture = pos.decode_move("d1d5").unwrap();
    assert_eq!(pos.move_class(capture), MoveClass::Capture);

    let check = pos.decode_move("d1a4").unwrap();
    assert_eq!(pos.move_class(check), MoveClass::Check);

    let promo = pos.decode_move("b7b8n").unwrap();
    assert_eq!(pos.move_class(promo), MoveClass::Promotion);

    let quiet = pos.decode_move("e1f1").unwrap();
    assert_eq!(pos.move_class(quiet), MoveClass::Quiet);
}
