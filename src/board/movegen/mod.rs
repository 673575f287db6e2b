//! Move generation.
//!
//! Pseudo-legal generation follows piece movement only; whether the king is
//! left in check, and every castling condition past "right held, king home",
//! is the validator's job. Legal generation filters pseudo-legal moves
//! through it.

mod attacks;
mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::AttackTables;
use super::validate::MoveValidator;
use super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    /// Squares the piece on `sq` can reach, ignoring check and castling.
    ///
    /// Empty squares yield an empty set. Own pieces are never targets.
    #[must_use]
    pub fn pseudo_legal_destinations_with(&self, tables: &AttackTables, sq: Square) -> Bitboard {
        match self.piece_at(sq) {
            Some((color, piece)) => self.destinations_for(tables, sq, color, piece),
            None => Bitboard::EMPTY,
        }
    }

    #[must_use]
    pub fn pseudo_legal_destinations(&self, sq: Square) -> Bitboard {
        self.pseudo_legal_destinations_with(AttackTables::global(), sq)
    }

    fn destinations_for(&self, tables: &AttackTables, from: Square, color: Color, piece: Piece) -> Bitboard {
        match piece {
            Piece::Pawn => self.pawn_destinations(tables, from, color),
            Piece::Knight => self.knight_destinations(tables, from, color),
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                self.slider_destinations(tables, from, piece, color)
            }
            Piece::King => self.king_destinations(tables, from, color),
        }
    }

    /// Every encodable move for the side to move, castles included.
    #[must_use]
    pub fn pseudo_legal_moves_with(&self, tables: &AttackTables) -> MoveList {
        let color = self.side_to_move;
        let mut moves = MoveList::new();
        for piece in Piece::ALL {
            for from in self.pieces_of(color, piece).iter() {
                let targets = self.destinations_for(tables, from, color, piece);
                if piece == Piece::Pawn {
                    self.push_pawn_moves(from, color, targets, &mut moves);
                } else {
                    for to in targets.iter() {
                        moves.push(Move::normal(from, to));
                    }
                }
            }
        }
        self.push_castle_candidates(color, &mut moves);
        moves
    }

    #[must_use]
    pub fn pseudo_legal_moves(&self) -> MoveList {
        self.pseudo_legal_moves_with(AttackTables::global())
    }

    /// Pseudo-legal moves that pass the full validator chain.
    #[must_use]
    pub fn legal_moves_with(&self, tables: &AttackTables) -> MoveList {
        let validator = MoveValidator::new(tables);
        let mut legal = MoveList::new();
        for mv in self.pseudo_legal_moves_with(tables) {
            if validator.is_legal(self, mv) {
                legal.push(mv);
            }
        }
        legal
    }

    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_with(AttackTables::global())
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Leaf count of the legal move tree to `depth`.
    #[must_use]
    pub fn perft_with(&self, tables: &AttackTables, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves_with(tables);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            // Legal moves always apply.
            if let Ok(next) = self.apply_move(mv) {
                nodes += next.perft_with(tables, depth - 1);
            }
        }
        nodes
    }

    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        self.perft_with(AttackTables::global(), depth)
    }
}
