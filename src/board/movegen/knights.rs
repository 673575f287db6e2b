use super::super::attack_tables::AttackTables;
use super::super::{Bitboard, Board, Color, Square};

impl Board {
    pub(crate) fn knight_destinations(&self, tables: &AttackTables, from: Square, color: Color) -> Bitboard {
        tables.knight_moves(from) & !self.occupied_by(color)
    }
}
