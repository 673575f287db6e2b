use super::super::attack_tables::AttackTables;
use super::super::{Bitboard, Board, Color, Piece, Square};

impl Board {
    /// Bishop, rook or queen targets from `from`, excluding own pieces.
    pub(crate) fn slider_destinations(
        &self,
        tables: &AttackTables,
        from: Square,
        piece: Piece,
        color: Color,
    ) -> Bitboard {
        let occ = self.all_occupied;
        let targets = match piece {
            Piece::Bishop => tables.bishop_moves(from, occ),
            Piece::Rook => tables.rook_moves(from, occ),
            Piece::Queen => tables.queen_moves(from, occ),
            _ => Bitboard::EMPTY,
        };
        targets & !self.occupied_by(color)
    }
}
