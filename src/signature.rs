// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bucket ids, xor signatures, and the combined sort key.
//!
//! All pure functions. The bucket id is the top `S` bits of the permuted
//! fingerprint. The xor signature folds the *raw* fingerprint into
//! `xor_len`-bit chunks and xors them together.
//!
//! # Why the signature filter never drops a match
//!
//! Folding is linear over xor: `fold(a) ^ fold(b) == fold(a ^ b)`. Each bit of
//! `fold(d)` is the parity of a handful of bits of `d`, and a parity can only
//! be 1 if at least one of those bits is 1. So
//! `popcount(fold(a) ^ fold(b)) <= popcount(a ^ b)`, and rejecting a group
//! whose signature is more than `errors` bits away never rejects an entry
//! within `errors` bits. The same argument holds for the low-part filter,
//! which is just a projection.

use crate::config::mask;
use crate::layout::Layout;

/// Hamming distance between two 64-bit values.
#[inline]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Fold `x` into `xor_len`-bit chunks (the last one zero-padded) and xor them.
///
/// The result is in `[0, 2^xor_len)`. A zero-width signature is always 0;
/// widths of 64 and up return `x` unchanged.
#[inline]
pub fn xor_signature(x: u64, xor_len: u32) -> u64 {
    if xor_len == 0 {
        return 0;
    }
    let m = mask(xor_len);
    let mut sig = 0;
    let mut shift = 0;
    while shift < 64 {
        sig ^= (x >> shift) & m;
        shift += xor_len;
    }
    sig
}

/// Top `splitter_bits` bits of an already permuted value.
#[inline]
pub fn bucket_of_permuted(permuted: u64, splitter_bits: u32) -> u64 {
    permuted.checked_shr(64 - splitter_bits).unwrap_or(0)
}

/// Bucket id of a raw fingerprint under `layout`.
#[inline]
pub fn bucket_id<L: Layout>(layout: &L, x: u64) -> u64 {
    bucket_of_permuted(layout.permute(x), layout.splitter_bits())
}

/// `(bucket_id << xor_len) | xor_signature`: the construction sort key.
#[inline]
pub fn combined_key<L: Layout>(layout: &L, x: u64, xor_len: u32) -> u64 {
    (bucket_id(layout, x) << xor_len) | xor_signature(x, xor_len)
}
