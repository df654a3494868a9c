// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Batch construction: counting sort by combined key, compact layout, and
//! the boundary walk.
//!
//! Four passes over the input:
//!
//! 1. **Keys**: `(bucket << xor_len) | signature` for every entry, tallied
//!    into one counter per key plus a sentinel.
//! 2. **Offsets**: exclusive prefix sums, each cell bumped by its own key
//!    index. Slot `k` then holds `start(k) + k`, which is strictly increasing
//!    even across empty keys; subtracting `k` back gives the output position.
//! 3. **Placement**: each entry's mid and low bits go to its key's next
//!    position; the key that landed there is remembered.
//! 4. **Boundary walk**: the remembered keys are now in key order. Walk them
//!    once, emitting one group record and one group bit per (bucket,
//!    signature) change, and one delimiter per bucket.
//!
//! Inside a group, entries keep their input order. Nothing else is sorted.

mod parallel;

use tracing::debug;

use crate::config::Widths;
use crate::error::InvariantError;
use crate::layout::Layout;
use crate::succinct::{BitVector, Boundaries, PackedArray};

pub(crate) use parallel::compute_keys;

/// Width of a first-level record.
pub(crate) const FIRST_LEVEL_WIDTH: u32 = 64;

/// Output of the construction pipeline.
#[derive(Debug)]
pub(crate) struct Built {
    pub low: PackedArray,
    pub mid: PackedArray,
    pub first_level: PackedArray,
    pub boundaries: Boundaries,
}

/// Run all four passes over `entries`.
pub(crate) fn build<L: Layout>(
    layout: &L,
    widths: &Widths,
    entries: &[u64],
) -> Result<Built, InvariantError> {
    let keys = compute_keys(layout, widths.xor_len(), entries);
    let mut offsets = key_offsets(&keys, widths.key_count());

    let n = entries.len();
    let mut low = PackedArray::new(n, widths.low());
    let mut mid = PackedArray::new(n, widths.mid());
    let mut placed = vec![0u32; n];

    for (&x, &key) in entries.iter().zip(&keys) {
        let slot = &mut offsets[key as usize];
        // `- key` undoes the +i bump from the prefix pass
        let pos = (*slot - u64::from(key)) as usize;
        let permuted = layout.permute(x);
        mid.set(pos, widths.mid_part(permuted));
        low.set(pos, widths.low_part(permuted));
        placed[pos] = key;
        *slot += 1;
    }
    drop(offsets);

    let (records, bits) = walk_boundaries(&placed, widths)?;
    let first_level = PackedArray::from_values(&records, FIRST_LEVEL_WIDTH);
    let boundaries = Boundaries::from_bits(bits);

    debug!(
        splitter_bits = widths.splitter(),
        mid_bits = widths.mid(),
        entries = n,
        groups = boundaries.group_count(),
        boundary_bits = boundaries.bits().len(),
        "built xor-bucket index"
    );

    Ok(Built {
        low,
        mid,
        first_level,
        boundaries,
    })
}

/// Per-key counts turned into strictly increasing start offsets.
///
/// Cell `k` ends up as `(entries with key < k) + k`. The table has one extra
/// sentinel cell at the end.
fn key_offsets(keys: &[u32], key_count: u64) -> Vec<u64> {
    let mut table = vec![0u64; key_count as usize + 1];
    for &key in keys {
        table[key as usize] += 1;
    }

    let mut sum = table[0];
    table[0] = 0;
    for i in 1..table.len() {
        let count = table[i];
        table[i] = sum + i as u64;
        sum += count;
    }
    table
}

/// Walk keys in storage order and emit the first-level records and the
/// boundary bits.
///
/// Records are `(position << xor_len) | signature`, one per group, then one
/// sentinel holding the total entry count. Bits are `groups(b)` zeros and a
/// one for every bucket id in `0..2^S`.
pub(crate) fn walk_boundaries(
    keys: &[u32],
    widths: &Widths,
) -> Result<(Vec<u64>, BitVector), InvariantError> {
    let xor_len = widths.xor_len();
    let sig_mask = widths.xor_mask();
    let bucket_count = widths.bucket_count();

    let mut records = Vec::new();
    let mut bits = BitVector::with_capacity(bucket_count + keys.len() as u64);

    let mut closed = 0u64;
    if let Some(&first) = keys.first() {
        let mut prev_bucket = u64::from(first) >> xor_len;
        let mut prev_sig = u64::from(first) & sig_mask;
        bits.push_run(true, prev_bucket);
        bits.push(false);
        records.push(prev_sig);

        for (pos, &key) in keys.iter().enumerate() {
            let bucket = u64::from(key) >> xor_len;
            let sig = u64::from(key) & sig_mask;

            if bucket != prev_bucket {
                if bucket < prev_bucket {
                    return Err(InvariantError::UnorderedBucket {
                        previous: prev_bucket,
                        current: bucket,
                        position: pos,
                    });
                }
                // Close the previous bucket and every empty one in between
                bits.push_run(true, bucket - prev_bucket);
                bits.push(false);
                records.push(((pos as u64) << xor_len) | sig);
                prev_bucket = bucket;
                prev_sig = sig;
            } else if sig != prev_sig {
                if sig < prev_sig {
                    return Err(InvariantError::UnorderedSignature {
                        bucket,
                        previous: prev_sig,
                        current: sig,
                        position: pos,
                    });
                }
                bits.push(false);
                records.push(((pos as u64) << xor_len) | sig);
                prev_sig = sig;
            }
        }

        bits.push(true);
        closed = prev_bucket + 1;
    }

    // Buckets above the last occupied one still need their delimiter
    bits.push_run(true, bucket_count - closed);
    records.push((keys.len() as u64) << xor_len);

    Ok((records, bits))
}
