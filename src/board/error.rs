//! Error types for chess board operations.
//!
//! Expected illegality of a move is not an error in the `Result` sense: it is
//! reported as a [`MoveError`] value. The `Err` types here are for malformed
//! input (bad text, null moves, missing pieces) and for table construction.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::attack_tables::Slider;
use super::{Color, Move, Square};

/// Verdict of the move validator. `NoneSet` means the move is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveError {
    /// No rule objected
    NoneSet,
    /// The source square is empty or holds an opponent piece
    NoActivePieceAtSource,
    /// The destination holds a piece of the side to move
    ActiveColorPieceAtDestination,
    /// The destination is not reachable by the moving piece
    BadDestination,
    /// Move type and promotion bits disagree with the piece and squares
    PromotionMismatch,
    /// The mover's king would be attacked after the move
    MoveLeavesKingInCheck,
    /// The castling right is gone, or king/rook are not on their home squares
    CastleUnavailable,
    /// A square between king and rook is occupied
    CastleOccupancyBetween,
    /// The king starts on, crosses, or lands on an attacked square
    CastleThroughCheck,
    /// A castle whose destination is not the c- or g-file of the back rank
    CastleBadDestinationSquare,
}

impl MoveError {
    /// True for the legal verdict
    #[inline]
    #[must_use]
    pub const fn is_none_set(self) -> bool {
        matches!(self, MoveError::NoneSet)
    }

    /// `Ok(())` for `NoneSet`, `Err(self)` otherwise
    #[inline]
    pub fn into_result(self) -> Result<(), MoveError> {
        if self.is_none_set() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveError::NoneSet => "no error",
            MoveError::NoActivePieceAtSource => "no piece of the side to move on the source square",
            MoveError::ActiveColorPieceAtDestination => {
                "destination is occupied by a piece of the side to move"
            }
            MoveError::BadDestination => "piece cannot reach the destination",
            MoveError::PromotionMismatch => "promotion does not match the move",
            MoveError::MoveLeavesKingInCheck => "move leaves king in check",
            MoveError::CastleUnavailable => "castling is not available",
            MoveError::CastleOccupancyBetween => "squares between king and rook are occupied",
            MoveError::CastleThroughCheck => "king would castle out of, through, or into check",
            MoveError::CastleBadDestinationSquare => "castling destination is not a castling square",
        };
        f.write_str(text)
    }
}

impl std::error::Error for MoveError {}

/// Why a move could not even be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// Source and destination are the same square
    NullMove,
    /// Application found no piece on the source square
    EmptySource,
    /// Castle application found no rook on the home corner
    MissingCastleRook,
    /// En passant application found no enemy pawn behind the target
    MissingEnPassantVictim,
}

/// A move that is malformed rather than merely illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMoveError {
    pub mv: Move,
    pub active_color: Color,
    pub reason: InvalidMoveReason,
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            InvalidMoveReason::NullMove => "null move",
            InvalidMoveReason::EmptySource => "source square is empty",
            InvalidMoveReason::MissingCastleRook => "no rook on the castling corner",
            InvalidMoveReason::MissingEnPassantVictim => "no pawn to capture en passant",
        };
        write!(
            f,
            "Invalid move {} ({:#06x}) with {} to move: {reason}",
            self.mv,
            self.mv.as_u16(),
            self.active_color
        )
    }
}

impl std::error::Error for InvalidMoveError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Placement field does not have exactly eight ranks
    WrongRankCount { found: usize },
    /// A rank does not describe exactly eight files
    BadRankLength { rank: usize, files: usize },
    /// Halfmove clock is not a non-negative integer
    InvalidHalfmoveClock { found: String },
    /// Fullmove number is not a positive integer
    InvalidFullmoveNumber { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::BadRankLength { rank, files } => {
                write!(f, "Rank {rank} of FEN placement covers {files} files, expected 8")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "Invalid halfmove clock '{found}'")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "Invalid fullmove number '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String, reason: MoveError },
    /// Move could not be judged at all, such as a null move
    Malformed(InvalidMoveError),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation, reason } => {
                write!(f, "Illegal move '{notation}': {reason}")
            }
            MoveParseError::Malformed(err) => write!(f, "Malformed move: {err}"),
        }
    }
}

impl std::error::Error for MoveParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveParseError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidMoveError> for MoveParseError {
    fn from(err: InvalidMoveError) -> Self {
        MoveParseError::Malformed(err)
    }
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Index out of bounds (must be 0-63)
    IndexOutOfBounds { index: u8 },
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: u8 },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: u8 },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::IndexOutOfBounds { index } => {
                write!(f, "Square index {index} out of bounds (must be 0-63)")
            }
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// The magic number search gave up on a square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicSearchError {
    pub slider: Slider,
    pub square: Square,
    pub attempts: u64,
}

impl fmt::Display for MagicSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No {} magic found for {} after {} attempts",
            self.slider, self.square, self.attempts
        )
    }
}

impl std::error::Error for MagicSearchError {}
