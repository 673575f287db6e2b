//! Chess board representation and move legality.
//!
//! Uses bitboards with magic-hashed sliding attacks for move generation.
//! Supports full chess rules including castling, en passant, and promotions.
//!
//! # Example
//! ```
//! use chess_rules::board::{Board, Move, MoveError};
//!
//! let board = Board::new();
//! let moves = board.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//!
//! let mv = board.parse_move("g1f3").unwrap();
//! assert_eq!(board.validate_move(mv).unwrap(), MoveError::NoneSet);
//! let next = board.apply_move(mv).unwrap();
//! assert_eq!(next.to_fen(), "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1");
//! ```

pub mod attack_tables;
mod apply;
mod builder;
mod error;
mod fen;
mod movegen;
mod state;
mod types;
pub mod validate;

#[cfg(test)]
mod tests;

pub use attack_tables::{AttackTables, MagicSearchConfig, Slider};
pub use builder::BoardBuilder;
pub use error::{
    FenError, InvalidMoveError, InvalidMoveReason, MagicSearchError, MoveError, MoveParseError,
    SquareError,
};
pub use state::Board;
pub use types::{
    Bitboard, BitboardIter, CastlePath, CastleSide, CastlingRights, Color, Move, MoveList,
    MoveListIntoIter, MoveType, Piece, Square, PROMOTION_PIECES,
};
pub use validate::{MoveValidator, Rule};
