//! Check and attack queries.

use super::super::attack_tables::AttackTables;
use super::super::{Bitboard, Board, Color, Piece, Square};

impl Board {
    /// Every `by` piece that attacks `sq` given `occupancy`.
    ///
    /// Pawns are found with the reverse trick: a `by` pawn attacks `sq` iff it
    /// stands on a square that an opposite-colored pawn on `sq` would attack.
    /// When `sq` holds the pawn that just double-pushed, pawns of the side to
    /// move that attack the en passant target also count.
    #[must_use]
    pub fn attackers_of_with(
        &self,
        tables: &AttackTables,
        sq: Square,
        by: Color,
        occupancy: Bitboard,
    ) -> Bitboard {
        let pawns = self.pieces_of(by, Piece::Pawn);
        let queens = self.pieces_of(by, Piece::Queen);
        let rook_like = self.pieces_of(by, Piece::Rook) | queens;
        let bishop_like = self.pieces_of(by, Piece::Bishop) | queens;

        let mut attackers = (tables.pawn_attacks(by.opponent(), sq) & pawns)
            | (tables.knight_moves(sq) & self.pieces_of(by, Piece::Knight))
            | (tables.king_moves(sq) & self.pieces_of(by, Piece::King))
            | (tables.rook_moves(sq, occupancy) & rook_like)
            | (tables.bishop_moves(sq, occupancy) & bishop_like);

        if let Some((target, victim)) = self.en_passant_capture(by) {
            if victim == sq {
                attackers |= tables.pawn_attacks(by.opponent(), target) & pawns;
            }
        }
        attackers
    }

    /// `(target, victim)` when `by` may capture en passant this turn.
    ///
    /// The target must be empty with an opponent pawn directly behind it.
    pub(crate) fn en_passant_capture(&self, by: Color) -> Option<(Square, Square)> {
        if by != self.side_to_move {
            return None;
        }
        let target = self.en_passant?;
        if !self.is_empty(target) {
            return None;
        }
        let victim = target.offset(by.opponent().pawn_direction(), 0)?;
        match self.piece_at(victim) {
            Some((color, Piece::Pawn)) if color != by => Some((target, victim)),
            _ => None,
        }
    }

    #[must_use]
    pub fn attackers_of(&self, sq: Square, by: Color) -> Bitboard {
        self.attackers_of_with(AttackTables::global(), sq, by, self.all_occupied)
    }

    #[inline]
    #[must_use]
    pub fn is_square_attacked_by_with(&self, tables: &AttackTables, sq: Square, by: Color) -> bool {
        !self
            .attackers_of_with(tables, sq, by, self.all_occupied)
            .is_empty()
    }

    /// True if any `by` piece attacks `sq` on the current occupancy.
    #[must_use]
    pub fn is_square_attacked_by(&self, sq: Square, by: Color) -> bool {
        self.is_square_attacked_by_with(AttackTables::global(), sq, by)
    }

    /// A side without a king is never in check.
    #[must_use]
    pub fn is_in_check_with(&self, tables: &AttackTables, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked_by_with(tables, king, color.opponent()))
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_in_check_with(AttackTables::global(), color)
    }
}
