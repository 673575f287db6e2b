//! Magic number search.
//!
//! For each square, draw random sparse 64-bit candidates until one maps every
//! blocker permutation to a slot without a destructive collision. Two
//! permutations may share a slot only when their move sets are identical.

use log::{trace, warn};
use rand::Rng;

use super::super::error::MagicSearchError;
use super::super::{Bitboard, Square};
use super::blockers::{enumerate_blockers, BlockerPermutation};
use super::storage::{magic_index, MagicEntry};
use super::Slider;

const HIGH_BYTE: u64 = 0xFF00_0000_0000_0000;

/// Search limits.
#[derive(Clone, Debug)]
pub struct MagicSearchConfig {
    /// Candidates tried per square before giving up
    pub max_attempts_per_square: u64,
    /// Candidates whose product with the mask has fewer set bits than this in
    /// the top byte are skipped without a trial fill
    pub min_high_bits: u32,
}

impl Default for MagicSearchConfig {
    fn default() -> Self {
        MagicSearchConfig {
            max_attempts_per_square: 100_000_000,
            min_high_bits: 6,
        }
    }
}

/// Random number with roughly one bit in eight set.
fn sparse_random<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>()
}

/// Try to fill `scratch` using `magic`. Returns false on the first slot that
/// already holds a different move set.
pub(crate) fn try_fill(
    perms: &[BlockerPermutation],
    mask: Bitboard,
    magic: u64,
    shift: u8,
    scratch: &mut [Option<Bitboard>],
) -> bool {
    scratch.fill(None);
    for perm in perms {
        let slot = &mut scratch[magic_index(perm.occupancy, mask, magic, shift)];
        let current = *slot;
        match current {
            None => *slot = Some(perm.moves),
            Some(existing) if existing == perm.moves => {}
            Some(_) => return false,
        }
    }
    true
}

/// Find a collision-free magic for one square.
///
/// Returns the finished entry and the number of candidates drawn.
pub fn find_magic<R: Rng + ?Sized>(
    slider: Slider,
    sq: Square,
    mask: Bitboard,
    config: &MagicSearchConfig,
    rng: &mut R,
) -> Result<(MagicEntry, u64), MagicSearchError> {
    let perms = enumerate_blockers(slider, sq, mask);
    let bits = mask.popcount() as u8;
    let shift = 64 - bits;
    let mut scratch: Vec<Option<Bitboard>> = vec![None; 1usize << bits];

    for attempt in 1..=config.max_attempts_per_square {
        let magic = sparse_random(rng);
        if (mask.0.wrapping_mul(magic) & HIGH_BYTE).count_ones() < config.min_high_bits {
            continue;
        }
        if try_fill(&perms, mask, magic, shift, &mut scratch) {
            trace!("{slider} magic for {sq}: {magic:#018x} after {attempt} attempts");
            // Unreached slots are never indexed by a masked occupancy.
            let table = scratch
                .iter()
                .map(|slot| slot.unwrap_or(Bitboard::EMPTY))
                .collect();
            let entry = MagicEntry {
                mask,
                magic,
                shift,
                table,
            };
            return Ok((entry, attempt));
        }
    }

    warn!(
        "{slider} magic search for {sq} exhausted {} attempts",
        config.max_attempts_per_square
    );
    Err(MagicSearchError {
        slider,
        square: sq,
        attempts: config.max_attempts_per_square,
    })
}
