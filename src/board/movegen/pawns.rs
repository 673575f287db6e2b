use super::super::attack_tables::AttackTables;
use super::super::{Bitboard, Board, Color, Move, MoveList, Square, PROMOTION_PIECES};

impl Board {
    /// Pawn pushes onto empty squares plus diagonal captures.
    ///
    /// The double push needs both squares ahead empty. The en passant target
    /// counts as a capture square only for the side to move, and only while
    /// the double-pushed pawn still stands behind it.
    pub(crate) fn pawn_destinations(&self, tables: &AttackTables, from: Square, color: Color) -> Bitboard {
        let occ = self.all_occupied;
        let mut quiet = tables.pawn_pushes(color, from) & !occ;
        if let Some(ahead) = from.offset(color.pawn_direction(), 0) {
            if occ.contains(ahead) {
                quiet = Bitboard::EMPTY;
            }
        }

        let mut capturable = self.occupied_by(color.opponent());
        if let Some((target, _)) = self.en_passant_capture(color) {
            capturable = capturable.with(target);
        }
        quiet | (tables.pawn_attacks(color, from) & capturable)
    }

    /// Encode pawn moves to `targets`, expanding promotions and tagging en passant.
    pub(crate) fn push_pawn_moves(&self, from: Square, color: Color, targets: Bitboard, moves: &mut MoveList) {
        for to in targets.iter() {
            if to.rank() == color.pawn_promotion_rank() {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::promotion(from, to, promo));
                }
            } else if self.is_en_passant_capture(color, from, to) {
                moves.push(Move::en_passant(from, to));
            } else {
                moves.push(Move::normal(from, to));
            }
        }
    }

    /// True if the `color` pawn on `from` moving to `to` captures en passant.
    pub(crate) fn is_en_passant_capture(&self, color: Color, from: Square, to: Square) -> bool {
        to.file() != from.file()
            && self
                .en_passant_capture(color)
                .is_some_and(|(target, _)| target == to)
    }
}
