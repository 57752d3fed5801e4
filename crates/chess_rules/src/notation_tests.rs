use super::*;
use game_core::GameState;

const FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    "8/8/8/4k3/8/4K3/4P3/8 b - - 37 60",
];

#[test]
fn test_fen_round_trip() {
    for fen in FENS {
        let pos = ChessPosition::decode(fen).expect("valid FEN");
        let encoded = pos.encode();
        assert_eq!(&encoded, fen);
        assert_eq!(ChessPosition::decode(&encoded).unwrap(), pos);
    }
}

#[test]
fn test_initial_is_startpos() {
    assert_eq!(ChessPosition::initial().encode(), FENS[0]);
}

#[test]
fn test_invalid_fen_is_rejected() {
    assert!(matches!(
        ChessPosition::decode("not a fen"),
        Err(NotationError::InvalidPosition { .. })
    ));
    assert!(ChessPosition::decode("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
}

#[test]
fn test_move_round_trip_for_all_legal_moves() {
    for fen in FENS {
        let pos = ChessPosition::decode(fen).unwrap();
        for mv in pos.legal_moves() {
            let text = pos.encode_move(mv);
            assert_eq!(pos.decode_move(&text), Ok(mv), "{fen}: {text}");
        }
    }
}

#[test]
fn test_castling_uses_king_destination() {
    let pos = ChessPosition::decode(FENS[1]).unwrap();

    let short = pos.decode_move("e1g1").unwrap();
    assert_eq!(short.to, Square::H1);
    assert_eq!(pos.encode_move(short), "e1g1");

    let long = pos.decode_move("e1c1").unwrap();
    assert_eq!(long.to, Square::A1);
    assert_eq!(pos.encode_move(long), "e1c1");
}

#[test]
fn test_promotion_text() {
    let pos = ChessPosition::decode("8/1P2k3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mv = pos.decode_move("b7b8q").unwrap();
    assert_eq!(mv.promotion, Some(Piece::Queen));
    assert_eq!(pos.encode_move(mv), "b7b8q");
}

#[test]
fn test_illegal_and_malformed_moves() {
    let pos = ChessPosition::startpos();
    assert!(matches!(pos.decode_move("e2e5"), Err(NotationError::IllegalMove(_))));
    assert!(matches!(pos.decode_move("zz"), Err(NotationError::InvalidMove(_))));

    let after = pos.apply(pos.decode_move("e2e4").unwrap());
    // Same text is illegal now: e2 is empty
    assert!(matches!(after.decode_move("e2e4"), Err(NotationError::IllegalMove(_))));
}
