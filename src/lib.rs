pub mod board;

pub use board::{AttackTables, Board, Color, Move, MoveError, MoveValidator, Piece, Square};
