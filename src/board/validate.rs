//! Move validator pipeline.
//!
//! A move is checked by a fixed chain of [`Rule`]s. Each rule returns
//! [`MoveError::NoneSet`] when it has no objection (or does not apply to the
//! move's type); the chain stops at the first rule that objects and reports
//! that verdict. The order of the chain only picks which reason is reported
//! for a move that breaks several rules.
//!
//! Null moves are malformed rather than illegal and come back as
//! [`InvalidMoveError`] instead of a verdict.

use std::borrow::Cow;

use log::trace;

use super::attack_tables::AttackTables;
use super::error::{InvalidMoveError, InvalidMoveReason, MoveError};
use super::{Board, CastlePath, CastleSide, Color, Move, MoveType, Piece, Square};

/// One legality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Source holds a piece of the side to move
    ActiveColor,
    /// Destination is pseudo-legal and not an own piece (non-castles)
    Destination,
    /// Promotion and en passant tagging agree with the pawn and squares (non-castles)
    MoveKind,
    /// Castle lands on the c- or g-file of the mover's back rank
    CastleDestination,
    /// Castling right held with king and rook on their home squares
    CastleRights,
    /// Squares strictly between king and rook are empty
    CastleOccupancy,
    /// King's start, transit and destination squares are not attacked
    CastleSafety,
    /// Mover's king is not attacked after the move
    SelfCheck,
}

impl Rule {
    /// The rules in the order they run.
    pub const CHAIN: [Rule; 8] = [
        Rule::ActiveColor,
        Rule::Destination,
        Rule::MoveKind,
        Rule::CastleDestination,
        Rule::CastleRights,
        Rule::CastleOccupancy,
        Rule::CastleSafety,
        Rule::SelfCheck,
    ];

    /// Apply this rule alone.
    #[must_use]
    pub fn check(self, ctx: &ValidationContext<'_>) -> MoveError {
        match self {
            Rule::ActiveColor => check_active_color(ctx),
            Rule::Destination => check_destination(ctx),
            Rule::MoveKind => check_move_kind(ctx),
            Rule::CastleDestination => check_castle_destination(ctx),
            Rule::CastleRights => check_castle_rights(ctx),
            Rule::CastleOccupancy => check_castle_occupancy(ctx),
            Rule::CastleSafety => check_castle_safety(ctx),
            Rule::SelfCheck => check_self(ctx),
        }
    }
}

/// Inputs shared by every rule for one validation call.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    tables: &'a AttackTables,
    board: &'a Board,
    after: Option<&'a Board>,
    mv: Move,
}

impl<'a> ValidationContext<'a> {
    /// `after` is the position with `mv` applied, if the caller has it.
    #[must_use]
    pub fn new(tables: &'a AttackTables, board: &'a Board, after: Option<&'a Board>, mv: Move) -> Self {
        ValidationContext {
            tables,
            board,
            after,
            mv,
        }
    }

    #[inline]
    fn mover(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    fn moving_piece(&self) -> Option<Piece> {
        self.board.piece_at(self.mv.source()).map(|(_, piece)| piece)
    }

    /// Castle geometry named by the destination, if it is a castling square.
    fn castle_path(&self) -> Option<CastlePath> {
        let to = self.mv.destination();
        let side = CastleSide::from_king_destination_file(to.file())?;
        let path = CastlePath::for_side(self.mover(), side);
        (path.king_to == to).then_some(path)
    }

    fn castle_side(&self) -> Option<CastleSide> {
        CastleSide::from_king_destination_file(self.mv.destination().file())
    }

    fn post_move_board(&self) -> Result<Cow<'a, Board>, InvalidMoveError> {
        match self.after {
            Some(after) => Ok(Cow::Borrowed(after)),
            None => self.board.apply_move(self.mv).map(Cow::Owned),
        }
    }
}

fn check_active_color(ctx: &ValidationContext<'_>) -> MoveError {
    match ctx.board.piece_at(ctx.mv.source()) {
        Some((color, _)) if color == ctx.mover() => MoveError::NoneSet,
        _ => MoveError::NoActivePieceAtSource,
    }
}

fn check_destination(ctx: &ValidationContext<'_>) -> MoveError {
    if ctx.mv.is_castle() {
        return MoveError::NoneSet;
    }
    let to = ctx.mv.destination();
    if ctx.board.occupied_by(ctx.mover()).contains(to) {
        return MoveError::ActiveColorPieceAtDestination;
    }
    if !ctx
        .board
        .pseudo_legal_destinations_with(ctx.tables, ctx.mv.source())
        .contains(to)
    {
        return MoveError::BadDestination;
    }
    MoveError::NoneSet
}

fn check_move_kind(ctx: &ValidationContext<'_>) -> MoveError {
    let mv = ctx.mv;
    if mv.is_castle() {
        return MoveError::NoneSet;
    }
    let (from, to) = (mv.source(), mv.destination());
    let is_pawn = ctx.moving_piece() == Some(Piece::Pawn);
    let reaches_last_rank = is_pawn && to.rank() == ctx.mover().pawn_promotion_rank();
    let takes_en_passant = is_pawn && ctx.board.is_en_passant_capture(ctx.mover(), from, to);

    match mv.move_type() {
        MoveType::Promotion if !reaches_last_rank => MoveError::PromotionMismatch,
        MoveType::Normal | MoveType::EnPassant if reaches_last_rank => MoveError::PromotionMismatch,
        MoveType::EnPassant if !takes_en_passant => MoveError::BadDestination,
        MoveType::Normal if takes_en_passant => MoveError::BadDestination,
        _ => MoveError::NoneSet,
    }
}

fn check_castle_destination(ctx: &ValidationContext<'_>) -> MoveError {
    if !ctx.mv.is_castle() || ctx.castle_path().is_some() {
        return MoveError::NoneSet;
    }
    MoveError::CastleBadDestinationSquare
}

fn check_castle_rights(ctx: &ValidationContext<'_>) -> MoveError {
    if !ctx.mv.is_castle() {
        return MoveError::NoneSet;
    }
    let (Some(path), Some(side)) = (ctx.castle_path(), ctx.castle_side()) else {
        return MoveError::CastleBadDestinationSquare;
    };
    let color = ctx.mover();
    let available = ctx.board.castling_rights().has(color, side)
        && ctx.mv.source() == path.king_from
        && ctx.board.piece_at(path.king_from) == Some((color, Piece::King))
        && ctx.board.piece_at(path.rook_from) == Some((color, Piece::Rook));
    if available {
        MoveError::NoneSet
    } else {
        MoveError::CastleUnavailable
    }
}

fn check_castle_occupancy(ctx: &ValidationContext<'_>) -> MoveError {
    if !ctx.mv.is_castle() {
        return MoveError::NoneSet;
    }
    match ctx.castle_path() {
        Some(path) if path.between().any(|sq| !ctx.board.is_empty(sq)) => {
            MoveError::CastleOccupancyBetween
        }
        _ => MoveError::NoneSet,
    }
}

fn check_castle_safety(ctx: &ValidationContext<'_>) -> MoveError {
    if !ctx.mv.is_castle() {
        return MoveError::NoneSet;
    }
    let enemy = ctx.mover().opponent();
    let attacked =
        |sq: Square| ctx.board.is_square_attacked_by_with(ctx.tables, sq, enemy);
    match ctx.castle_path() {
        Some(path) if path.king_path().any(attacked) => MoveError::CastleThroughCheck,
        _ => MoveError::NoneSet,
    }
}

fn check_self(ctx: &ValidationContext<'_>) -> MoveError {
    let after = match ctx.post_move_board() {
        Ok(after) => after,
        // Earlier rules reject every move that application refuses.
        Err(err) => {
            return match err.reason {
                InvalidMoveReason::MissingCastleRook => MoveError::CastleUnavailable,
                InvalidMoveReason::MissingEnPassantVictim => MoveError::BadDestination,
                InvalidMoveReason::NullMove | InvalidMoveReason::EmptySource => {
                    MoveError::NoActivePieceAtSource
                }
            }
        }
    };
    if after.is_in_check_with(ctx.tables, ctx.mover()) {
        MoveError::MoveLeavesKingInCheck
    } else {
        MoveError::NoneSet
    }
}

/// Runs the rule chain against a set of attack tables.
#[derive(Debug, Clone, Copy)]
pub struct MoveValidator<'a> {
    tables: &'a AttackTables,
}

impl<'a> MoveValidator<'a> {
    #[must_use]
    pub fn new(tables: &'a AttackTables) -> Self {
        MoveValidator { tables }
    }

    /// Verdict for `mv` on `board`. The post-move board is derived as needed.
    pub fn validate(&self, board: &Board, mv: Move) -> Result<MoveError, InvalidMoveError> {
        self.validate_with(board, None, mv)
    }

    /// Verdict for `mv` on `board`, using `after` as the position once `mv`
    /// is played when the caller already has it.
    pub fn validate_with(
        &self,
        board: &Board,
        after: Option<&Board>,
        mv: Move,
    ) -> Result<MoveError, InvalidMoveError> {
        if mv.is_null() {
            return Err(InvalidMoveError {
                mv,
                active_color: board.side_to_move(),
                reason: InvalidMoveReason::NullMove,
            });
        }

        let ctx = ValidationContext::new(self.tables, board, after, mv);
        for rule in Rule::CHAIN {
            let verdict = rule.check(&ctx);
            if !verdict.is_none_set() {
                trace!("{mv} rejected for {} by {rule:?}: {verdict}", board.side_to_move());
                return Ok(verdict);
            }
        }
        Ok(MoveError::NoneSet)
    }

    /// True iff the chain accepts `mv`. Malformed moves are not legal.
    #[must_use]
    pub fn is_legal(&self, board: &Board, mv: Move) -> bool {
        matches!(self.validate(board, mv), Ok(MoveError::NoneSet))
    }
}

impl Default for MoveValidator<'static> {
    fn default() -> Self {
        MoveValidator::new(AttackTables::global())
    }
}

impl Board {
    /// Validate `mv` against this position with the shared attack tables.
    ///
    /// # Example
    /// ```
    /// use chess_rules::board::{Board, Move, MoveError};
    ///
    /// let board = Board::new();
    /// let mv = Move::normal("e2".parse().unwrap(), "e4".parse().unwrap());
    /// assert_eq!(board.validate_move(mv).unwrap(), MoveError::NoneSet);
    /// ```
    pub fn validate_move(&self, mv: Move) -> Result<MoveError, InvalidMoveError> {
        MoveValidator::default().validate(self, mv)
    }

    #[must_use]
    pub fn is_legal_move(&self, mv: Move) -> bool {
        MoveValidator::default().is_legal(self, mv)
    }
}
