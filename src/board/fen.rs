use std::str::FromStr;

use super::error::{FenError, InvalidMoveReason, MoveParseError};
use super::{Board, CastleSide, CastlingRights, Color, Move, MoveError, MoveType, Piece, Square};

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The placement, side to move, castling and en passant fields are
    /// required. A missing halfmove clock reads as 0 and a missing fullmove
    /// number as 1. The halfmove clock is stored as written.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += run as usize;
                    continue;
                }
                let (color, piece) =
                    Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let sq = Square::new(rank, file as u8).ok_or(FenError::BadRankLength {
                    rank: rank_idx,
                    files: file + 1,
                })?;
                board.set_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut rights = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, side) = match c {
                    'K' => (Color::White, CastleSide::KingSide),
                    'Q' => (Color::White, CastleSide::QueenSide),
                    'k' => (Color::Black, CastleSide::KingSide),
                    'q' => (Color::Black, CastleSide::QueenSide),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                };
                rights.set(color, side);
            }
        }
        board.castling_rights = rights;

        board.en_passant = match parts[3] {
            "-" => None,
            text => match text.parse::<Square>() {
                Ok(sq) if sq.rank() == board.side_to_move.en_passant_rank() => Some(sq),
                _ => {
                    return Err(FenError::InvalidEnPassant {
                        found: text.to_string(),
                    })
                }
            },
        };

        if let Some(text) = parts.get(4) {
            board.halfmove_clock = text.parse().map_err(|_| FenError::InvalidHalfmoveClock {
                found: (*text).to_string(),
            })?;
        }
        if let Some(text) = parts.get(5) {
            board.fullmove_number = text.parse().map_err(|_| FenError::InvalidFullmoveNumber {
                found: (*text).to_string(),
            })?;
        }

        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(err) => panic!("Invalid FEN string: {err}"),
        }
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                let piece = Square::new(rank, file).and_then(|sq| self.piece_at(sq));
                if let Some((color, piece)) = piece {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights.to_fen_field(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in long algebraic notation (e.g., "e2e4", "e7e8q", "e1g1").
    ///
    /// The move type is inferred from the position: a king stepping two files
    /// is a castle and a pawn moving diagonally onto the en passant target is
    /// an en passant capture. The result is checked by the validator.
    ///
    /// # Example
    /// ```
    /// use chess_rules::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: text.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(Piece::Pawn | Piece::King) | None => {
                    return Err(MoveParseError::InvalidPromotion { char: c })
                }
                piece => piece,
            },
            None => None,
        };

        let mv = Move::new(from, to, promotion, self.infer_move_type(from, to, promotion));
        let illegal = |reason| MoveParseError::IllegalMove {
            notation: text.to_string(),
            reason,
        };
        match self.validate_move(mv)? {
            MoveError::NoneSet => Ok(mv),
            reason => Err(illegal(reason)),
        }
    }

    fn infer_move_type(&self, from: Square, to: Square, promotion: Option<Piece>) -> MoveType {
        if promotion.is_some() {
            return MoveType::Promotion;
        }
        match self.piece_at(from) {
            Some((_, Piece::King)) if from.file().abs_diff(to.file()) == 2 => MoveType::Castle,
            Some((color, Piece::Pawn)) if self.is_en_passant_capture(color, from, to) => {
                MoveType::EnPassant
            }
            _ => MoveType::Normal,
        }
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_fen_round_trip() {
        let board = Board::try_from_fen(START).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(board.to_fen(), START);
    }

    #[test]
    fn test_fen_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant(), Some("e3".parse().unwrap()));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn test_fen_error_too_few_parts() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewParts { found: 2 })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_rank_shape() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::WrongRankCount { found: 7 })));
        let result = Board::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::BadRankLength { rank: 1, files: 7 })));
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: '9' })));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { char: 'X' })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_en_passant_rank_must_match_side_to_move() {
        let result = Board::try_from_fen("4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result = Board::try_from_fen("4k3/3p4/8/8/8/8/8/4K3 b - e6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        assert!(Board::try_from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").is_ok());
    }

    #[test]
    fn test_fen_error_bad_counters() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - x 1");
        assert!(matches!(result, Err(FenError::InvalidHalfmoveClock { .. })));
        let result = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 0 -3");
        assert!(matches!(result, Err(FenError::InvalidFullmoveNumber { .. })));
    }

    #[test]
    fn test_fen_partial_castling() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1").unwrap();
        let rights = board.castling_rights();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn test_counters_are_stored_literally() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 87 61").unwrap();
        assert_eq!(board.halfmove_clock(), 87);
        assert_eq!(board.fullmove_number(), 61);
        assert!(board.to_fen().ends_with(" 87 61"));
    }

    #[test]
    fn test_missing_counters_default() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 b - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn test_parse_move_e2e4() {
        let board = Board::new();
        let mv = board.parse_move("e2e4").unwrap();
        assert_eq!(mv, Move::normal("e2".parse().unwrap(), "e4".parse().unwrap()));
    }

    #[test]
    fn test_parse_move_promotion() {
        let board = Board::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let mv = board.parse_move("a7a8q").unwrap();
        assert_eq!(mv.promotion_piece(), Some(Piece::Queen));
    }

    #[test]
    fn test_parse_move_infers_castle_and_en_passant() {
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(board.parse_move("e1g1").unwrap().is_castle());
        let board = Board::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert!(board.parse_move("e5d6").unwrap().is_en_passant());
    }

    #[test]
    fn test_parse_move_error_invalid_length() {
        let result = Board::new().parse_move("e2");
        assert!(matches!(result, Err(MoveParseError::InvalidLength { len: 2 })));
    }

    #[test]
    fn test_parse_move_error_invalid_square() {
        let result = Board::new().parse_move("z9z9");
        assert!(matches!(result, Err(MoveParseError::InvalidSquare { .. })));
    }

    #[test]
    fn test_parse_move_error_illegal() {
        let result = Board::new().parse_move("e2e5");
        assert!(matches!(
            result,
            Err(MoveParseError::IllegalMove {
                reason: MoveError::BadDestination,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_move_null_move_is_malformed() {
        let result = Board::new().parse_move("e2e2");
        match result {
            Err(MoveParseError::Malformed(err)) => {
                assert_eq!(err.reason, InvalidMoveReason::NullMove);
                assert_eq!(err.active_color, Color::White);
            }
            other => panic!("expected a malformed move error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_move_no_en_passant_without_victim() {
        // d6 is advertised but nothing stands on d5.
        let board = Board::try_from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert!(matches!(
            board.parse_move("e5d6"),
            Err(MoveParseError::IllegalMove {
                reason: MoveError::BadDestination,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_move_error_invalid_promotion() {
        let board = Board::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let result = board.parse_move("a7a8p");
        assert!(matches!(result, Err(MoveParseError::InvalidPromotion { char: 'p' })));
    }

    #[test]
    fn test_from_str_trait() {
        let board: Board = START.parse().unwrap();
        assert_eq!(board.side_to_move(), Color::White);
    }
}
