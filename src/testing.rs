// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::signature::hamming_distance;

/// Every entry within `errors` bits of `query`, sorted ascending.
///
/// This is the canonical linear-scan oracle the index is checked against.
pub fn brute_force(entries: &[u64], query: u64, errors: u32) -> Vec<u64> {
    let mut hits: Vec<u64> = entries
        .iter()
        .copied()
        .filter(|&x| hamming_distance(x, query) <= errors)
        .collect();
    hits.sort_unstable();
    hits
}

/// `x` with each listed bit position flipped once.
pub fn flip_bits(x: u64, positions: &[u32]) -> u64 {
    positions.iter().fold(x, |acc, &p| acc ^ (1u64 << (p % 64)))
}

/// Deterministic pseudo-random fingerprints (splitmix64).
pub fn random_fingerprints(seed: u64, count: usize) -> Vec<u64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        })
        .collect()
}
