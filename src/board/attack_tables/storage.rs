//! Move pattern storage: the accepted magic and dense table for each square.

use super::super::{Bitboard, Square};
use super::Slider;

/// Magic hash parameters plus the table they index.
#[derive(Clone, Debug)]
pub struct MagicEntry {
    /// Relevant occupancy mask (edge squares excluded)
    pub mask: Bitboard,
    /// Multiplier found by the search
    pub magic: u64,
    /// `64 - table_bits`
    pub shift: u8,
    pub(crate) table: Box<[Bitboard]>,
}

/// `((occupancy & mask) * magic) >> shift`
#[inline]
#[must_use]
pub fn magic_index(occupancy: Bitboard, mask: Bitboard, magic: u64, shift: u8) -> usize {
    ((occupancy.0 & mask.0).wrapping_mul(magic) >> shift) as usize
}

impl MagicEntry {
    /// Move set for any full-board occupancy; squares outside the mask are ignored.
    #[inline]
    #[must_use]
    pub fn moves(&self, occupancy: Bitboard) -> Bitboard {
        self.table[magic_index(occupancy, self.mask, self.magic, self.shift)]
    }

    /// Number of index bits used by this square's table
    #[inline]
    #[must_use]
    pub fn table_bits(&self) -> u8 {
        64 - self.shift
    }

    #[inline]
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }
}

/// Magic entries for all 64 squares of one slider kind.
#[derive(Clone, Debug)]
pub struct SlidingTable {
    slider: Slider,
    entries: Vec<MagicEntry>,
}

impl SlidingTable {
    pub(crate) fn from_entries(slider: Slider, entries: Vec<MagicEntry>) -> Self {
        assert_eq!(entries.len(), 64, "sliding table needs one entry per square");
        SlidingTable { slider, entries }
    }

    #[inline]
    #[must_use]
    pub fn slider(&self) -> Slider {
        self.slider
    }

    #[inline]
    #[must_use]
    pub fn entry(&self, sq: Square) -> &MagicEntry {
        &self.entries[sq.as_usize()]
    }

    /// O(1) move lookup for a slider on `sq` given full-board `occupancy`.
    #[inline]
    #[must_use]
    pub fn moves(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.entries[sq.as_usize()].moves(occupancy)
    }

    /// Total table slots across all squares
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.entries.iter().map(MagicEntry::table_len).sum()
    }
}
