//! Edge case tests for special chess positions and moves.

use crate::board::{Board, Color, Move, MoveError, Piece, Square};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_stalemate_position() {
    let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!board.is_checkmate());
    assert!(board.is_stalemate());
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_back_rank_mate() {
    let board = Board::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert!(board.is_checkmate());
}

#[test]
fn test_underpromotions_are_available() {
    let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let moves = board.legal_moves();
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        let mv = Move::promotion(sq("a7"), sq("a8"), piece);
        assert!(moves.contains(mv), "{piece:?} promotion should be available");
    }

    let next = board.apply_move(Move::promotion(sq("a7"), sq("a8"), Piece::Knight)).unwrap();
    assert_eq!(next.piece_at(sq("a8")), Some((Color::White, Piece::Knight)));
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // Both pawns leave the fifth rank, opening it for the rook.
    let board = Board::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert_eq!(
        board.validate_move(Move::en_passant(sq("e5"), sq("d6"))).unwrap(),
        MoveError::MoveLeavesKingInCheck
    );
}

#[test]
fn test_en_passant_can_answer_check() {
    // The d5 pawn gives check; taking it en passant removes the checker.
    let checked = Board::from_fen("8/8/8/3pP3/2K5/8/8/7k w - d6 0 1");
    assert!(checked.is_in_check(Color::White));
    assert_eq!(
        checked.validate_move(Move::en_passant(sq("e5"), sq("d6"))).unwrap(),
        MoveError::NoneSet
    );
}

#[test]
fn test_stale_en_passant_target_is_ignored_everywhere() {
    // The target is advertised but the pawn on d5 was never there.
    let board = Board::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1");
    let ep = Move::en_passant(sq("e5"), sq("d6"));

    assert!(!board.pseudo_legal_destinations(sq("e5")).contains(sq("d6")));
    assert!(!board.pseudo_legal_moves().contains(ep));
    assert_eq!(board.validate_move(ep).unwrap(), MoveError::BadDestination);
    assert!(board.apply_move(ep).is_err());
    assert!(board.attackers_of(sq("d5"), Color::White).is_empty());
}

#[test]
fn test_castling_rights_without_rook_generate_nothing() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1");
    assert!(!board.legal_moves().iter().any(|mv| mv.is_castle()));
}

#[test]
fn test_king_cannot_capture_defended_piece() {
    let board = Board::from_fen("4k3/8/8/8/8/2n5/4q3/4K3 w - - 0 1");
    assert_eq!(
        board.validate_move(Move::normal(Square::E1, sq("e2"))).unwrap(),
        MoveError::MoveLeavesKingInCheck
    );
}

#[test]
fn test_double_check_only_king_moves() {
    let board = Board::from_fen("4k3/8/8/8/1b6/8/4r3/R3K3 w Q - 0 1");
    assert!(board.is_in_check(Color::White));
    for mv in board.legal_moves() {
        assert_eq!(mv.source(), Square::E1, "{mv} is not a king move");
    }
}

#[test]
fn test_halfmove_clock_above_fifty_is_kept() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 75 120");
    assert_eq!(board.halfmove_clock(), 75);
    let next = board.apply_move(Move::normal(Square::A1, sq("a2"))).unwrap();
    assert_eq!(next.halfmove_clock(), 76);
}

#[test]
fn test_kings_never_adjacent() {
    let board = Board::from_fen("8/8/8/3k4/8/3K4/8/8 w - - 0 1");
    for mv in board.legal_moves() {
        assert_ne!(mv.destination().rank(), 3, "{mv} walks next to the enemy king");
    }
}
