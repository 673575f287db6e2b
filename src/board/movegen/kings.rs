use super::super::attack_tables::AttackTables;
use super::super::{Bitboard, Board, CastlePath, CastleSide, Color, Move, MoveList, Piece, Square};

impl Board {
    /// One-step king targets. Castling is not a destination here.
    pub(crate) fn king_destinations(&self, tables: &AttackTables, from: Square, color: Color) -> Bitboard {
        tables.king_moves(from) & !self.occupied_by(color)
    }

    /// Castle moves for every right still held with the king on its home
    /// square. Path checks are left to the validator.
    pub(crate) fn push_castle_candidates(&self, color: Color, moves: &mut MoveList) {
        for side in CastleSide::BOTH {
            if !self.castling_rights.has(color, side) {
                continue;
            }
            let path = CastlePath::for_side(color, side);
            if self.piece_at(path.king_from) == Some((color, Piece::King)) {
                moves.push(Move::castle(path.king_from, path.king_to));
            }
        }
    }
}
