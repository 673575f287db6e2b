//! Core chess types.
//!
//! This module contains the fundamental value types used throughout the crate:
//! - `Piece` and `Color` - chess piece kinds and colors
//! - `Square` - compact board square index (u8)
//! - `Bitboard` - 64-bit board set with directional shifts
//! - `Move` and `MoveList` - packed 16-bit move representation
//! - `CastlingRights`, `CastleSide`, `CastlePath` - castling state and geometry

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::{CastlePath, CastleSide, CastlingRights};
pub use moves::{Move, MoveList, MoveListIntoIter, MoveType, PROMOTION_PIECES};
pub use piece::{Color, Piece};
pub use square::Square;
