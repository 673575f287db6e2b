//! Blocker permutation enumeration.
//!
//! For a slider on a square with relevant mask of `k` bits, every one of the
//! `2^k` occupancy subsets is paired with its ray-cast move set. The magic
//! search uses these pairs as ground truth.

use super::super::{Bitboard, Square};
use super::masks::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::Slider;

/// One occupancy subset and the moves it allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockerPermutation {
    pub occupancy: Bitboard,
    pub moves: Bitboard,
}

impl Slider {
    pub(crate) const fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Rook => &ROOK_DIRECTIONS,
            Slider::Bishop => &BISHOP_DIRECTIONS,
        }
    }
}

/// Slow reference move set: walk each ray, stopping at and including the
/// first occupied square.
#[must_use]
pub fn ray_cast(slider: Slider, sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut moves = Bitboard::EMPTY;
    for &(d_rank, d_file) in slider.directions() {
        let mut current = sq;
        while let Some(next) = current.offset(d_rank, d_file) {
            moves = moves.with(next);
            if occupancy.contains(next) {
                break;
            }
            current = next;
        }
    }
    moves
}

/// Iterator over every subset of a mask, starting with the empty set.
///
/// Uses the carry-rippler step `next = (subset - mask) & mask`.
#[derive(Clone, Debug)]
pub struct Subsets {
    mask: u64,
    next: Option<u64>,
}

impl Subsets {
    #[must_use]
    pub fn of(mask: Bitboard) -> Self {
        Subsets {
            mask: mask.0,
            next: Some(0),
        }
    }
}

impl Iterator for Subsets {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let following = current.wrapping_sub(self.mask) & self.mask;
        self.next = if following == 0 { None } else { Some(following) };
        Some(Bitboard(current))
    }
}

/// All `(occupancy, moves)` pairs for the relevant mask of `slider` on `sq`.
#[must_use]
pub fn enumerate_blockers(slider: Slider, sq: Square, relevant: Bitboard) -> Vec<BlockerPermutation> {
    let mut out = Vec::with_capacity(1usize << relevant.popcount());
    for occupancy in Subsets::of(relevant) {
        out.push(BlockerPermutation {
            occupancy,
            moves: ray_cast(slider, sq, occupancy),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::masks::AttackMasks;
    use super::*;
    use std::collections::HashSet;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_subsets_cover_power_set_exactly_once() {
        let mask = Bitboard(0b1011_0000_0101);
        let all: Vec<Bitboard> = Subsets::of(mask).collect();
        assert_eq!(all.len(), 1 << 5);
        let unique: HashSet<u64> = all.iter().map(|b| b.0).collect();
        assert_eq!(unique.len(), all.len());
        assert!(all.iter().all(|b| b.0 & !mask.0 == 0));
        assert_eq!(all[0], Bitboard::EMPTY);
    }

    #[test]
    fn test_subsets_of_empty_mask() {
        let all: Vec<Bitboard> = Subsets::of(Bitboard::EMPTY).collect();
        assert_eq!(all, vec![Bitboard::EMPTY]);
    }

    #[test]
    fn test_enumerate_blockers_count() {
        let masks = AttackMasks::new();
        let relevant = masks.relevant_occupancy(Slider::Rook, Square::A1);
        let perms = enumerate_blockers(Slider::Rook, Square::A1, relevant);
        assert_eq!(perms.len(), 4096);
    }

    #[test]
    fn test_ray_cast_stops_at_blocker_inclusive() {
        let blockers = Bitboard::from_square(sq("e6")) | Bitboard::from_square(sq("c4"));
        let moves = ray_cast(Slider::Rook, sq("e4"), blockers);
        assert!(moves.contains(sq("e6")));
        assert!(!moves.contains(sq("e7")));
        assert!(moves.contains(sq("c4")));
        assert!(!moves.contains(sq("b4")));
        assert!(moves.contains(sq("h4")));
        assert!(moves.contains(sq("e1")));
        assert_eq!(moves.popcount(), 2 + 2 + 3 + 3);
    }

    #[test]
    fn test_ray_cast_bishop_empty_board_matches_rays() {
        let masks = AttackMasks::new();
        for s in Square::all() {
            assert_eq!(ray_cast(Slider::Bishop, s, Bitboard::EMPTY), masks.rays(Slider::Bishop, s));
            assert_eq!(ray_cast(Slider::Rook, s, Bitboard::EMPTY), masks.rays(Slider::Rook, s));
        }
    }

    #[test]
    fn test_edge_blockers_do_not_change_moves() {
        let masks = AttackMasks::new();
        let s = sq("d4");
        let relevant = masks.relevant_occupancy(Slider::Rook, s);
        let edges = masks.rays(Slider::Rook, s) & !relevant;
        for perm in enumerate_blockers(Slider::Rook, s, relevant).iter().take(64) {
            assert_eq!(ray_cast(Slider::Rook, s, perm.occupancy | edges), perm.moves);
        }
    }
}
