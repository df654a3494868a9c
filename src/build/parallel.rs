// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Data-parallel key computation.
//!
//! Pass 1 of construction permutes and folds every entry independently, so
//! it splits cleanly across threads. The counting and placement passes that
//! follow depend on each other through the prefix-sum table and stay
//! sequential.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::layout::Layout;
use crate::signature::combined_key;

/// Below this many entries the thread handoff costs more than it saves.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Combined key of every entry, in input order.
///
/// Keys fit in `u32`: configuration caps `splitter_bits + xor_len` at 32.
pub(crate) fn compute_keys<L: Layout>(layout: &L, xor_len: u32, entries: &[u64]) -> Vec<u32> {
    #[cfg(feature = "parallel")]
    {
        if entries.len() >= PARALLEL_THRESHOLD {
            return entries
                .par_iter()
                .map(|&x| combined_key(layout, x, xor_len) as u32)
                .collect();
        }
    }

    entries
        .iter()
        .map(|&x| combined_key(layout, x, xor_len) as u32)
        .collect()
}
