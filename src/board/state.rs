use super::{Bitboard, CastlingRights, Color, Piece, Square};

/// A chess position.
///
/// Boards are values: applying a move returns a new `Board` and leaves the
/// original untouched, so a `Board` can be shared freely.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, piece) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let (Some(home), Some(pawn_sq)) = (Square::new(back, file), Square::new(pawns, file)) {
                    board.set_piece(home, color, *piece);
                    board.set_piece(pawn_sq, color, Piece::Pawn);
                }
            }
        }
        board.castling_rights = CastlingRights::all();
        board
    }

    /// A board with no pieces, White to move, no rights.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// En passant target square (the square a capturing pawn lands on)
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// All occupied squares
    #[inline]
    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        self.all_occupied
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces_of(color, *piece).contains(sq))
            .map(|piece| (color, piece))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        !self.all_occupied.contains(sq)
    }

    /// Square of `color`'s king, if it has one
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color, Piece::King).lsb()
    }

    /// Place a piece, replacing whatever stood on the square.
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.clear_square(sq);
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()] = self.pieces[c_idx][piece.index()].with(sq);
        self.occupied[c_idx] = self.occupied[c_idx].with(sq);
        self.all_occupied = self.all_occupied.with(sq);
    }

    /// Empty a square, returning what stood there.
    pub(crate) fn clear_square(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let found = self.piece_at(sq)?;
        let (color, piece) = found;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()] = self.pieces[c_idx][piece.index()].without(sq);
        self.occupied[c_idx] = self.occupied[c_idx].without(sq);
        self.all_occupied = self.all_occupied.without(sq);
        Some(found)
    }

    /// Checks the bitboard invariants: no square in two piece boards, and the
    /// per-color and total occupancy equal the OR of the piece boards.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let bb = self.pieces_of(color, piece);
                if !(seen & bb).is_empty() {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.occupied_by(color) {
                return false;
            }
        }
        seen == self.all_occupied
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_layout() {
        let board = Board::new();
        assert_eq!(board.occupancy().popcount(), 32);
        assert_eq!(board.piece_at(Square::E1), Some((Color::White, Piece::King)));
        assert_eq!(board.piece_at(Square::D8), Some((Color::Black, Piece::Queen)));
        assert_eq!(board.pieces_of(Color::White, Piece::Pawn), Bitboard::RANK_2);
        assert_eq!(board.pieces_of(Color::Black, Piece::Pawn), Bitboard::RANK_7);
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(board.castling_rights(), CastlingRights::all());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_set_piece_replaces_occupant() {
        let mut board = Board::new();
        board.set_piece(Square::E1, Color::Black, Piece::Rook);
        assert_eq!(board.piece_at(Square::E1), Some((Color::Black, Piece::Rook)));
        assert!(board.pieces_of(Color::White, Piece::King).is_empty());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_clear_square() {
        let mut board = Board::new();
        assert_eq!(board.clear_square(Square::A1), Some((Color::White, Piece::Rook)));
        assert_eq!(board.clear_square(Square::A1), None);
        assert!(board.is_empty(Square::A1));
        assert!(board.is_consistent());
    }
}
