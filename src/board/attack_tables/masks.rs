//! Blocker-independent reach masks for every square.
//!
//! Leaper masks (king, knight, pawn) are complete move sets. Slider masks are
//! unobstructed rays to the board edge, plus the edge-trimmed "relevant
//! occupancy" variant used as the magic hash key.

use super::super::{Bitboard, Color, Square};
use super::Slider;

const KNIGHT_DELTAS: [i8; 8] = [17, 15, 10, 6, -6, -10, -15, -17];
const KING_DELTAS: [i8; 8] = [9, 8, 7, 1, -1, -7, -8, -9];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares reached by adding each index delta to `sq`.
///
/// A raw index delta can wrap from the h-file to the a-file of the next rank,
/// so any target whose file is further than `max_file_step` from the origin is
/// discarded.
fn leaper_mask(sq: Square, deltas: &[i8], max_file_step: u8) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &delta in deltas {
        let target = sq.index() as i16 + i16::from(delta);
        if !(0..64).contains(&target) {
            continue;
        }
        let target = Square::from_index_unchecked(target as u8);
        if target.file().abs_diff(sq.file()) <= max_file_step {
            mask = mask.with(target);
        }
    }
    mask
}

fn pawn_push_mask(sq: Square, color: Color) -> Bitboard {
    let dir = color.pawn_direction();
    let Some(one) = sq.offset(dir, 0) else {
        return Bitboard::EMPTY;
    };
    let mut mask = Bitboard::from_square(one);
    if sq.rank() == color.pawn_start_rank() {
        if let Some(two) = sq.offset(2 * dir, 0) {
            mask = mask.with(two);
        }
    }
    mask
}

fn pawn_attack_mask(sq: Square, color: Color) -> Bitboard {
    let bb = Bitboard::from_square(sq);
    match color {
        Color::White => bb.shift_north_east() | bb.shift_north_west(),
        Color::Black => bb.shift_south_east() | bb.shift_south_west(),
    }
}

/// Ray-cast from `sq` in each direction until the board edge. When
/// `stop_before_edge` is set, the final square of each ray is dropped, since a
/// piece on the edge never shortens the ray.
pub(crate) fn ray_mask(sq: Square, directions: &[(i8, i8)], stop_before_edge: bool) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &(d_rank, d_file) in directions {
        let mut current = sq;
        while let Some(next) = current.offset(d_rank, d_file) {
            if stop_before_edge && next.offset(d_rank, d_file).is_none() {
                break;
            }
            mask = mask.with(next);
            current = next;
        }
    }
    mask
}

/// Precomputed per-square masks.
#[derive(Clone, Debug)]
pub struct AttackMasks {
    pub(crate) king: [Bitboard; 64],
    pub(crate) knight: [Bitboard; 64],
    pub(crate) pawn_pushes: [[Bitboard; 64]; 2],
    pub(crate) pawn_attacks: [[Bitboard; 64]; 2],
    pub(crate) rook_rays: [Bitboard; 64],
    pub(crate) bishop_rays: [Bitboard; 64],
    pub(crate) rook_relevant: [Bitboard; 64],
    pub(crate) bishop_relevant: [Bitboard; 64],
}

impl AttackMasks {
    #[must_use]
    pub fn new() -> Self {
        let mut masks = AttackMasks {
            king: [Bitboard::EMPTY; 64],
            knight: [Bitboard::EMPTY; 64],
            pawn_pushes: [[Bitboard::EMPTY; 64]; 2],
            pawn_attacks: [[Bitboard::EMPTY; 64]; 2],
            rook_rays: [Bitboard::EMPTY; 64],
            bishop_rays: [Bitboard::EMPTY; 64],
            rook_relevant: [Bitboard::EMPTY; 64],
            bishop_relevant: [Bitboard::EMPTY; 64],
        };
        for sq in Square::all() {
            let i = sq.as_usize();
            masks.king[i] = leaper_mask(sq, &KING_DELTAS, 1);
            masks.knight[i] = leaper_mask(sq, &KNIGHT_DELTAS, 2);
            for color in Color::BOTH {
                masks.pawn_pushes[color.index()][i] = pawn_push_mask(sq, color);
                masks.pawn_attacks[color.index()][i] = pawn_attack_mask(sq, color);
            }
            masks.rook_rays[i] = ray_mask(sq, &ROOK_DIRECTIONS, false);
            masks.bishop_rays[i] = ray_mask(sq, &BISHOP_DIRECTIONS, false);
            masks.rook_relevant[i] = ray_mask(sq, &ROOK_DIRECTIONS, true);
            masks.bishop_relevant[i] = ray_mask(sq, &BISHOP_DIRECTIONS, true);
        }
        masks
    }

    #[inline]
    #[must_use]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.as_usize()]
    }

    #[inline]
    #[must_use]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.as_usize()]
    }

    /// Forward advances (one square, two from the start rank) ignoring occupancy
    #[inline]
    #[must_use]
    pub fn pawn_pushes(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn_pushes[color.index()][sq.as_usize()]
    }

    /// Diagonal capture squares
    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn_attacks[color.index()][sq.as_usize()]
    }

    /// Rays to the board edge on an empty board
    #[inline]
    #[must_use]
    pub fn rays(&self, slider: Slider, sq: Square) -> Bitboard {
        match slider {
            Slider::Rook => self.rook_rays[sq.as_usize()],
            Slider::Bishop => self.bishop_rays[sq.as_usize()],
        }
    }

    /// Rays with the final edge square of each direction removed
    #[inline]
    #[must_use]
    pub fn relevant_occupancy(&self, slider: Slider, sq: Square) -> Bitboard {
        match slider {
            Slider::Rook => self.rook_relevant[sq.as_usize()],
            Slider::Bishop => self.bishop_relevant[sq.as_usize()],
        }
    }
}

impl Default for AttackMasks {
    fn default() -> Self {
        AttackMasks::new()
    }
}
