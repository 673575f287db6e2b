//! Move application.
//!
//! `apply_move` is copy-make: it clones the position, plays the move on the
//! clone and returns it. Legality is not checked here; the validator decides
//! that, and uses the returned board for its self-check test.

use super::error::{InvalidMoveError, InvalidMoveReason};
use super::{Board, CastlePath, CastleSide, Color, Move, MoveType, Piece};

impl Board {
    /// Play `mv` on a copy of this board.
    ///
    /// The source square must hold a piece, a castle must find its rook on the
    /// home corner, and an en passant capture must find the enemy pawn behind
    /// its target. Everything else is applied as encoded.
    pub fn apply_move(&self, mv: Move) -> Result<Board, InvalidMoveError> {
        let invalid = |reason| InvalidMoveError {
            mv,
            active_color: self.side_to_move,
            reason,
        };
        if mv.is_null() {
            return Err(invalid(InvalidMoveReason::NullMove));
        }

        let from = mv.source();
        let to = mv.destination();
        let (mover, piece) = self
            .piece_at(from)
            .ok_or_else(|| invalid(InvalidMoveReason::EmptySource))?;

        let mut next = self.clone();
        let mut captured = false;

        if let Some((victim, _)) = next.clear_square(to) {
            captured = victim != mover;
        }

        match mv.move_type() {
            MoveType::EnPassant => {
                // The captured pawn sits beside the mover, one rank behind the target.
                let victim_sq = to.offset(-mover.pawn_direction(), 0);
                match victim_sq.and_then(|sq| next.piece_at(sq).map(|found| (sq, found))) {
                    Some((sq, (victim, Piece::Pawn))) if victim != mover => {
                        next.clear_square(sq);
                        captured = true;
                    }
                    _ => return Err(invalid(InvalidMoveReason::MissingEnPassantVictim)),
                }
            }
            MoveType::Castle => {
                if let Some(side) = CastleSide::from_king_destination_file(to.file()) {
                    let path = CastlePath::for_side(mover, side);
                    match next.piece_at(path.rook_from) {
                        Some((color, Piece::Rook)) if color == mover => {
                            next.clear_square(path.rook_from);
                            next.set_piece(path.rook_to, mover, Piece::Rook);
                        }
                        _ => return Err(invalid(InvalidMoveReason::MissingCastleRook)),
                    }
                }
            }
            MoveType::Normal | MoveType::Promotion => {}
        }

        next.clear_square(from);
        let placed = mv.promotion_piece().unwrap_or(piece);
        next.set_piece(to, mover, placed);

        next.update_castling_rights(mover, piece, mv);

        next.en_passant = if piece == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            from.offset(mover.pawn_direction(), 0)
        } else {
            None
        };

        next.halfmove_clock = if piece == Piece::Pawn || captured {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if self.side_to_move == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        next.side_to_move = self.side_to_move.opponent();

        Ok(next)
    }

    /// Drop rights whose king moved, or whose rook left or was taken on its corner.
    fn update_castling_rights(&mut self, mover: Color, piece: Piece, mv: Move) {
        if piece == Piece::King {
            self.castling_rights.remove_color(mover);
        }
        for color in Color::BOTH {
            for side in CastleSide::BOTH {
                let corner = CastlePath::for_side(color, side).rook_from;
                if mv.source() == corner || mv.destination() == corner {
                    self.castling_rights.remove(color, side);
                }
            }
        }
    }
}
