// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index configuration and the bit-width split derived from it.
//!
//! A fingerprint is cut into three parts once it has been permuted:
//!
//! ```text
//!  63                                                         0
//! ┌──────────────┬──────────────────────┬──────────────────────┐
//! │ splitter (S) │       mid (M)        │       low (L)        │
//! └──────────────┴──────────────────────┴──────────────────────┘
//!   bucket key     packed, M bits/entry   packed, L bits/entry
//! ```
//!
//! `S` comes from the layout (the widths of the chosen blocks), `L` and the
//! signature width come from the config, and `M` is whatever is left. All of
//! it is checked here, once, so nothing downstream has to worry about a
//! negative width or a shift by 64.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{combination_count, BlockLayout, Layout};

/// Widest low part accepted. The low part is the cheap pre-filter, so it is
/// kept at or under one 32-bit word.
pub const MAX_LOW_WIDTH: u32 = 32;

/// Widest secondary signature accepted.
pub const MAX_XOR_LEN: u32 = 16;

/// Upper bound on `splitter_bits + xor_len`. Construction allocates one
/// counter per combined key and stores keys as `u32`.
pub const MAX_KEY_BITS: u32 = 32;

/// Configuration errors. All of them are detected before construction starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("splitter bits {splitter} plus low bits {low} exceed 64")]
    SplitterOverflow { splitter: u32, low: u32 },

    #[error("low width {0} must be in 1..=32")]
    InvalidLowWidth(u32),

    #[error("signature width {0} must be in 1..=16")]
    InvalidXorLen(u32),

    #[error("combined key of {bits} bits exceeds 32")]
    KeyUniverseTooLarge { bits: u32 },

    #[error("cannot choose {chosen} of {blocks} blocks")]
    InvalidBlocks { blocks: u32, chosen: u32 },

    #[error("combination {id} out of range ({count} combinations)")]
    CombinationOutOfRange { id: u64, count: u64 },
}

/// Configuration of one index copy.
///
/// Deserializes from JSON with every field optional:
///
/// ```ignore
/// let config: IndexConfig = serde_json::from_str(r#"{"block_count": 8, "combination": 3}"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Number of blocks the fingerprint is cut into.
    pub block_count: u32,
    /// Blocks that form the splitter region (`block_count - errors`).
    pub chosen_blocks: u32,
    /// Which `chosen_blocks`-subset this copy uses.
    pub combination: u64,
    /// Width of the low part.
    pub low_width: u32,
    /// Width of the secondary xor signature.
    pub xor_len: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            block_count: 4,
            chosen_blocks: 1,
            combination: 0,
            low_width: 32,
            xor_len: 6,
        }
    }
}

impl IndexConfig {
    /// Error budget the ensemble of copies is built for.
    pub fn default_errors(&self) -> u32 {
        self.block_count.saturating_sub(self.chosen_blocks)
    }

    /// Number of copies needed to cover every error pattern.
    pub fn copies(&self) -> u64 {
        combination_count(self.block_count, self.chosen_blocks)
    }

    /// Same configuration, different combination id.
    pub fn with_combination(mut self, combination: u64) -> Self {
        self.combination = combination;
        self
    }

    /// Build the block layout this config describes.
    pub fn layout(&self) -> Result<BlockLayout, ConfigError> {
        BlockLayout::new(self.block_count, self.chosen_blocks, self.combination)
    }

    /// Validate everything and return the derived widths.
    pub fn validate(&self) -> Result<Widths, ConfigError> {
        let layout = self.layout()?;
        Widths::new(layout.splitter_bits(), self.low_width, self.xor_len)
    }
}

/// Derived bit widths. `splitter + mid + low == 64` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widths {
    splitter: u32,
    mid: u32,
    low: u32,
    xor_len: u32,
}

impl Widths {
    pub fn new(splitter: u32, low: u32, xor_len: u32) -> Result<Self, ConfigError> {
        if low == 0 || low > MAX_LOW_WIDTH {
            return Err(ConfigError::InvalidLowWidth(low));
        }
        if xor_len == 0 || xor_len > MAX_XOR_LEN {
            return Err(ConfigError::InvalidXorLen(xor_len));
        }
        let mid = 64u32
            .checked_sub(splitter)
            .and_then(|rest| rest.checked_sub(low))
            .ok_or(ConfigError::SplitterOverflow { splitter, low })?;
        if splitter + xor_len > MAX_KEY_BITS {
            return Err(ConfigError::KeyUniverseTooLarge {
                bits: splitter + xor_len,
            });
        }

        Ok(Self {
            splitter,
            mid,
            low,
            xor_len,
        })
    }

    pub fn splitter(&self) -> u32 {
        self.splitter
    }

    pub fn mid(&self) -> u32 {
        self.mid
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn xor_len(&self) -> u32 {
        self.xor_len
    }

    /// Number of bucket ids, `2^S`.
    pub fn bucket_count(&self) -> u64 {
        1u64 << self.splitter
    }

    /// Number of combined keys, `2^(S + xor_len)`.
    pub fn key_count(&self) -> u64 {
        1u64 << (self.splitter + self.xor_len)
    }

    pub fn low_mask(&self) -> u64 {
        mask(self.low)
    }

    pub fn mid_mask(&self) -> u64 {
        mask(self.mid)
    }

    pub fn xor_mask(&self) -> u64 {
        mask(self.xor_len)
    }

    /// Keep only the splitter bits of a permuted value.
    pub fn high_part(&self, permuted: u64) -> u64 {
        permuted & !mask(64 - self.splitter)
    }

    pub fn mid_part(&self, permuted: u64) -> u64 {
        permuted.checked_shr(self.low).unwrap_or(0) & self.mid_mask()
    }

    pub fn low_part(&self, permuted: u64) -> u64 {
        permuted & self.low_mask()
    }

    /// Reassemble a permuted value from its three parts.
    pub fn join(&self, high: u64, mid: u64, low: u64) -> u64 {
        high | mid.checked_shl(self.low).unwrap_or(0) | low
    }
}

/// Mask with the low `width` bits set. `width` may be 64.
#[inline]
pub fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
