// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query results against a linear scan, on fuzzer-chosen data.
//!
//! The fuzzer picks the fingerprints, the configuration, and the query. The
//! index must return exactly the entries a linear scan finds inside the
//! query's bucket: nothing more (soundness), nothing less (the signature and
//! low-part filters never drop a true match).

#![no_main]

use arbitrary::Arbitrary;
use hamsplit::{bucket_id, IndexConfig, XorSplitIndex};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    entries: Vec<u64>,
    query: u64,
    errors: u8,
    combination: u8,
    xor_len: u8,
    low_width: u8,
}

fuzz_target!(|input: Input| {
    let config = IndexConfig {
        block_count: 8,
        chosen_blocks: 1,
        combination: u64::from(input.combination % 8),
        low_width: u32::from(input.low_width % 32) + 1,
        xor_len: u32::from(input.xor_len % 8) + 1,
    };
    let errors = u32::from(input.errors % 65);

    let index = match XorSplitIndex::new(&config, &input.entries) {
        Ok(index) => index,
        Err(_) => return,
    };

    let result = index.query(input.query, errors, false);
    let mut got = result.matches;
    got.sort_unstable();

    let bucket = bucket_id(index.layout(), input.query);
    let in_bucket: Vec<u64> = input
        .entries
        .iter()
        .copied()
        .filter(|&x| bucket_id(index.layout(), x) == bucket)
        .collect();
    let mut expected: Vec<u64> = in_bucket
        .iter()
        .copied()
        .filter(|&x| (x ^ input.query).count_ones() <= errors)
        .collect();
    expected.sort_unstable();

    assert_eq!(got, expected);
    assert_eq!(result.candidates, in_bucket.len() as u64);
    assert_eq!(index.count_candidates(input.query), result.candidates);
});
