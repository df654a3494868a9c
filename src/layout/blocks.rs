// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Block layouts: the "choose `c` of `b` blocks" permutation.

use super::{combination_count, unrank_combination, Layout};
use crate::config::{mask, ConfigError};

/// Where one block sits before and after the permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockMove {
    from_shift: u32,
    to_shift: u32,
    mask: u64,
}

/// Cuts 64 bits into `block_count` contiguous blocks and moves the chosen
/// ones to the most significant end.
///
/// Block 0 holds the most significant bits. Blocks are `64 / block_count`
/// bits wide; the first `64 % block_count` blocks get one extra bit. After
/// permuting, the chosen blocks come first (in block order), then the rest
/// (also in block order).
///
/// ```ignore
/// // 4 blocks of 16 bits, combination 2 picks block 2
/// let layout = BlockLayout::new(4, 1, 2)?;
/// assert_eq!(layout.permute(0x0000_0000_FFFF_0000), 0xFFFF_0000_0000_0000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    block_count: u32,
    combination: u64,
    chosen: Vec<u32>,
    widths: Vec<u32>,
    moves: Vec<BlockMove>,
    splitter_bits: u32,
}

impl BlockLayout {
    pub fn new(block_count: u32, chosen_blocks: u32, combination: u64) -> Result<Self, ConfigError> {
        if block_count == 0 || block_count > 64 || chosen_blocks == 0 || chosen_blocks > block_count {
            return Err(ConfigError::InvalidBlocks {
                blocks: block_count,
                chosen: chosen_blocks,
            });
        }
        let chosen = unrank_combination(block_count, chosen_blocks, combination).ok_or(
            ConfigError::CombinationOutOfRange {
                id: combination,
                count: combination_count(block_count, chosen_blocks),
            },
        )?;

        let base = 64 / block_count;
        let wider = 64 % block_count;
        let widths: Vec<u32> = (0..block_count)
            .map(|i| if i < wider { base + 1 } else { base })
            .collect();

        // Shift of each block's lowest bit in the original word
        let mut from_shifts = Vec::with_capacity(block_count as usize);
        let mut top = 64u32;
        for &w in &widths {
            top -= w;
            from_shifts.push(top);
        }

        let order = chosen
            .iter()
            .copied()
            .chain((0..block_count).filter(|b| !chosen.contains(b)));

        let mut moves = Vec::with_capacity(block_count as usize);
        let mut top = 64u32;
        for block in order {
            let width = widths[block as usize];
            top -= width;
            moves.push(BlockMove {
                from_shift: from_shifts[block as usize],
                to_shift: top,
                mask: mask(width),
            });
        }

        let splitter_bits = chosen.iter().map(|&b| widths[b as usize]).sum();

        Ok(Self {
            block_count,
            combination,
            chosen,
            widths,
            moves,
            splitter_bits,
        })
    }

    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    pub fn combination(&self) -> u64 {
        self.combination
    }

    /// Indices of the blocks forming the splitter region.
    pub fn chosen(&self) -> &[u32] {
        &self.chosen
    }

    /// Width of every block, most significant first.
    pub fn block_widths(&self) -> &[u32] {
        &self.widths
    }
}

impl Layout for BlockLayout {
    #[inline]
    fn permute(&self, x: u64) -> u64 {
        self.moves
            .iter()
            .fold(0, |acc, m| acc | (((x >> m.from_shift) & m.mask) << m.to_shift))
    }

    #[inline]
    fn inverse(&self, x: u64) -> u64 {
        self.moves
            .iter()
            .fold(0, |acc, m| acc | (((x >> m.to_shift) & m.mask) << m.from_shift))
    }

    fn splitter_bits(&self) -> u32 {
        self.splitter_bits
    }
}

/// No permutation: the top `splitter_bits` of the raw value are the bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityLayout {
    splitter_bits: u32,
}

impl IdentityLayout {
    pub fn new(splitter_bits: u32) -> Self {
        Self {
            splitter_bits: splitter_bits.min(64),
        }
    }
}

impl Layout for IdentityLayout {
    #[inline]
    fn permute(&self, x: u64) -> u64 {
        x
    }

    #[inline]
    fn inverse(&self, x: u64) -> u64 {
        x
    }

    fn splitter_bits(&self) -> u32 {
        self.splitter_bits
    }
}
