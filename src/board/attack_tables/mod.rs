//! Attack tables for move generation.
//!
//! Leaper pieces use per-square masks. Sliding pieces (bishop, rook, queen)
//! use magic bitboards: the relevant occupancy is hashed with a per-square
//! multiplier into a dense table of precomputed move sets.
//!
//! Tables are built once and then only read. [`AttackTables::global`] builds a
//! process-wide instance on first access; [`AttackTables::generate`] builds an
//! independent one from a caller-supplied random source.

mod blockers;
mod magic;
mod masks;
mod storage;

pub use blockers::{enumerate_blockers, ray_cast, BlockerPermutation, Subsets};
pub use magic::{find_magic, MagicSearchConfig};
pub use masks::AttackMasks;
pub use storage::{magic_index, MagicEntry, SlidingTable};

use std::time::Instant;

use log::debug;
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::MagicSearchError;
use super::{Bitboard, Color, Square};

/// Which sliding piece a magic table belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Rook,
    Bishop,
}

impl std::fmt::Display for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slider::Rook => write!(f, "rook"),
            Slider::Bishop => write!(f, "bishop"),
        }
    }
}

static GLOBAL_TABLES: OnceCell<AttackTables> = OnceCell::new();

/// Leaper masks plus magic tables for both sliders.
#[derive(Clone, Debug)]
pub struct AttackTables {
    masks: AttackMasks,
    rook: SlidingTable,
    bishop: SlidingTable,
}

impl AttackTables {
    /// Shared tables, built on first call from OS entropy.
    ///
    /// Concurrent first calls block until the single construction finishes.
    ///
    /// # Panics
    /// Panics if the magic search exhausts its default budget, which does not
    /// happen for the standard board.
    pub fn global() -> &'static AttackTables {
        GLOBAL_TABLES.get_or_init(|| {
            let mut rng = StdRng::from_entropy();
            match AttackTables::generate(&MagicSearchConfig::default(), &mut rng) {
                Ok(tables) => tables,
                Err(err) => panic!("attack table construction failed: {err}"),
            }
        })
    }

    /// Build a fresh set of tables using `rng` for the magic search.
    pub fn generate<R: Rng + ?Sized>(
        config: &MagicSearchConfig,
        rng: &mut R,
    ) -> Result<AttackTables, MagicSearchError> {
        let masks = AttackMasks::new();
        let rook = build_sliding_table(&masks, Slider::Rook, config, rng)?;
        let bishop = build_sliding_table(&masks, Slider::Bishop, config, rng)?;
        Ok(AttackTables {
            masks,
            rook,
            bishop,
        })
    }

    /// Deterministic tables for a fixed seed.
    pub fn with_seed(seed: u64) -> Result<AttackTables, MagicSearchError> {
        AttackTables::generate(&MagicSearchConfig::default(), &mut StdRng::seed_from_u64(seed))
    }

    #[inline]
    #[must_use]
    pub fn masks(&self) -> &AttackMasks {
        &self.masks
    }

    #[inline]
    #[must_use]
    pub fn sliding_table(&self, slider: Slider) -> &SlidingTable {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    #[inline]
    #[must_use]
    pub fn rook_moves(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook.moves(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn bishop_moves(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop.moves(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn queen_moves(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook_moves(sq, occupancy) | self.bishop_moves(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn knight_moves(&self, sq: Square) -> Bitboard {
        self.masks.knight(sq)
    }

    #[inline]
    #[must_use]
    pub fn king_moves(&self, sq: Square) -> Bitboard {
        self.masks.king(sq)
    }

    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.masks.pawn_attacks(color, sq)
    }

    #[inline]
    #[must_use]
    pub fn pawn_pushes(&self, color: Color, sq: Square) -> Bitboard {
        self.masks.pawn_pushes(color, sq)
    }
}

fn build_sliding_table<R: Rng + ?Sized>(
    masks: &AttackMasks,
    slider: Slider,
    config: &MagicSearchConfig,
    rng: &mut R,
) -> Result<SlidingTable, MagicSearchError> {
    let started = Instant::now();
    let mut total_attempts = 0u64;
    let mut entries = Vec::with_capacity(64);
    for sq in Square::all() {
        let mask = masks.relevant_occupancy(slider, sq);
        let (entry, attempts) = find_magic(slider, sq, mask, config, rng)?;
        total_attempts += attempts;
        entries.push(entry);
    }
    let table = SlidingTable::from_entries(slider, entries);
    debug!(
        "built {slider} magic table: {} slots, {total_attempts} candidates, {:?}",
        table.total_slots(),
        started.elapsed()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_every_permutation_matches_ray_cast() {
        let tables = AttackTables::with_seed(0x5EED).unwrap();
        for slider in [Slider::Rook, Slider::Bishop] {
            let table = tables.sliding_table(slider);
            for s in Square::all() {
                let mask = tables.masks().relevant_occupancy(slider, s);
                for perm in enumerate_blockers(slider, s, mask) {
                    assert_eq!(
                        table.moves(s, perm.occupancy),
                        perm.moves,
                        "{slider} on {s} with occupancy {:#x}",
                        perm.occupancy.0
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_ignores_squares_outside_mask() {
        let tables = AttackTables::global();
        let s = sq("e4");
        let occ = Bitboard::from_square(sq("e6")) | Bitboard::from_square(sq("c4"));
        let noisy = occ | Bitboard::EDGES | Bitboard::from_square(sq("a2"));
        assert_eq!(tables.rook_moves(s, occ), tables.rook_moves(s, noisy));
        assert_eq!(tables.rook_moves(s, occ), ray_cast(Slider::Rook, s, occ));
    }

    #[test]
    fn test_rook_attacks_empty_board() {
        let tables = AttackTables::global();
        let attacks = tables.rook_moves(sq("e4"), Bitboard::EMPTY);
        let expected = (Bitboard::rank_mask(3) | Bitboard::file_mask(4)).without(sq("e4"));
        assert_eq!(attacks, expected);
    }

    #[test]
    fn test_bishop_attacks_with_blockers() {
        let tables = AttackTables::global();
        let attacks = tables.bishop_moves(sq("e4"), Bitboard::from_square(sq("g6")));
        assert!(attacks.contains(sq("g6")));
        assert!(!attacks.contains(sq("h7")));
        assert!(attacks.contains(sq("a8")));
        assert!(attacks.contains(sq("h1")));
    }

    #[test]
    fn test_queen_is_union_of_rook_and_bishop() {
        let tables = AttackTables::global();
        let occ = Bitboard(0x00FF_0000_0000_FF00);
        for s in Square::all() {
            assert_eq!(
                tables.queen_moves(s, occ),
                ray_cast(Slider::Rook, s, occ) | ray_cast(Slider::Bishop, s, occ)
            );
        }
    }

    #[test]
    fn test_global_is_built_once() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| AttackTables::global() as *const AttackTables as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(addrs[0], AttackTables::global() as *const AttackTables as usize);
    }

    #[test]
    fn test_table_sizes_follow_mask_bits() {
        let tables = AttackTables::global();
        let rook = tables.sliding_table(Slider::Rook);
        assert_eq!(rook.entry(Square::A1).table_len(), 4096);
        assert_eq!(rook.entry(sq("e4")).table_len(), 1024);
        assert_eq!(tables.sliding_table(Slider::Bishop).entry(sq("e4")).table_len(), 512);
    }
}
