//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const DESTINATION_MASK: u16 = 0x003F;
const SOURCE_SHIFT: u16 = 6;
const SOURCE_MASK: u16 = 0x0FC0;
const PROMOTION_SHIFT: u16 = 12;
const PROMOTION_MASK: u16 = 0x3000;
const TYPE_SHIFT: u16 = 14;

/// Kind of move, stored in bits 14-15.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveType {
    Normal,
    Promotion,
    EnPassant,
    Castle,
}

impl MoveType {
    #[inline]
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            MoveType::Normal => 0,
            MoveType::Promotion => 1,
            MoveType::EnPassant => 2,
            MoveType::Castle => 3,
        }
    }

    #[inline]
    const fn from_code(code: u16) -> MoveType {
        match code & 0b11 {
            0 => MoveType::Normal,
            1 => MoveType::Promotion,
            2 => MoveType::EnPassant,
            _ => MoveType::Castle,
        }
    }
}

/// Promotion piece code stored in bits 12-13: Knight 0, Bishop 1, Rook 2, Queen 3.
#[inline]
const fn promotion_code(piece: Piece) -> Option<u16> {
    match piece {
        Piece::Knight => Some(0),
        Piece::Bishop => Some(1),
        Piece::Rook => Some(2),
        Piece::Queen => Some(3),
        Piece::Pawn | Piece::King => None,
    }
}

#[inline]
const fn promotion_piece(code: u16) -> Piece {
    match code & 0b11 {
        0 => Piece::Knight,
        1 => Piece::Bishop,
        2 => Piece::Rook,
        _ => Piece::Queen,
    }
}

/// Promotion targets, queen first
pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-5:   destination square (0-63)
/// - bits 6-11:  source square (0-63)
/// - bits 12-13: promotion piece code (knight, bishop, rook, queen)
/// - bits 14-15: move type (normal, promotion, en passant, castle)
///
/// Equality is equality of the packed value, so two promotion-less moves that
/// differ only in the unused promotion bits compare unequal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    /// The all-zero value (a1a1); never a playable move
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    /// Pack a move from its parts. Pawn and King are not promotion pieces and
    /// leave the promotion bits clear.
    #[inline]
    #[must_use]
    pub const fn new(
        source: Square,
        destination: Square,
        promotion: Option<Piece>,
        move_type: MoveType,
    ) -> Self {
        let promo = match promotion {
            Some(piece) => match promotion_code(piece) {
                Some(code) => code,
                None => 0,
            },
            None => 0,
        };
        Move(
            destination.index() as u16
                | ((source.index() as u16) << SOURCE_SHIFT)
                | (promo << PROMOTION_SHIFT)
                | (move_type.code() << TYPE_SHIFT),
        )
    }

    /// Create a plain move or capture
    #[inline]
    #[must_use]
    pub const fn normal(source: Square, destination: Square) -> Self {
        Move::new(source, destination, None, MoveType::Normal)
    }

    /// Create a promotion move (with or without capture)
    #[inline]
    #[must_use]
    pub const fn promotion(source: Square, destination: Square, piece: Piece) -> Self {
        Move::new(source, destination, Some(piece), MoveType::Promotion)
    }

    /// Create an en passant capture; `destination` is the en passant target square
    #[inline]
    #[must_use]
    pub const fn en_passant(source: Square, destination: Square) -> Self {
        Move::new(source, destination, None, MoveType::EnPassant)
    }

    /// Create a castle, encoded as the king's move
    #[inline]
    #[must_use]
    pub const fn castle(king_from: Square, king_to: Square) -> Self {
        Move::new(king_from, king_to, None, MoveType::Castle)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn destination(self) -> Square {
        Square::from_index_unchecked((self.0 & DESTINATION_MASK) as u8)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn source(self) -> Square {
        Square::from_index_unchecked(((self.0 & SOURCE_MASK) >> SOURCE_SHIFT) as u8)
    }

    /// Raw promotion code (bits 12-13)
    #[inline]
    #[must_use]
    pub const fn promotion_code(self) -> u16 {
        (self.0 & PROMOTION_MASK) >> PROMOTION_SHIFT
    }

    /// Get the move type
    #[inline]
    #[must_use]
    pub const fn move_type(self) -> MoveType {
        MoveType::from_code(self.0 >> TYPE_SHIFT)
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self.move_type() {
            MoveType::Promotion => Some(promotion_piece(self.promotion_code())),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(self.move_type(), MoveType::Castle)
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.move_type(), MoveType::EnPassant)
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        matches!(self.move_type(), MoveType::Promotion)
    }

    /// True when source and destination coincide (includes `Move::null()`)
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.source().index() == self.destination().index()
    }

    /// Get the raw 16-bit value
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Create from raw 16-bit value; every value decodes
    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.source(), self.destination())?;
        match self.move_type() {
            MoveType::Normal => {}
            MoveType::Promotion => {
                if let Some(promo) = self.promotion_piece() {
                    write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
                }
            }
            MoveType::EnPassant => write!(f, " ep")?,
            MoveType::Castle => write!(f, " castle")?,
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.destination())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [Move::null(); MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}
