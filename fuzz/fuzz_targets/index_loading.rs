// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index loading under adversarial input.
//!
//! A stored copy is just five length-prefixed fields. Lengths can lie, widths
//! can disagree with the config, the select samples can describe some other
//! bit vector, and first-level positions can run backwards. Every one of
//! those should come back as an error, never a panic or a huge allocation.

#![no_main]

use hamsplit::{IndexConfig, XorSplitIndex};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = IndexConfig {
        block_count: 8,
        chosen_blocks: 1,
        ..IndexConfig::default()
    };

    let mut index = match XorSplitIndex::new(&config, &[0x0F, 0x1F, 0xFF]) {
        Ok(index) => index,
        Err(_) => return,
    };

    match index.load(&mut &data[..]) {
        Ok(()) => {
            // A stream that loads must answer queries without panicking,
            // and every answer must still be sound
            for q in [0u64, u64::MAX, 0x0F, 0x8000_0000_0000_0000] {
                let result = index.query(q, 8, false);
                assert!(result.matches.len() as u64 <= result.candidates);
                for m in result.matches {
                    assert!((m ^ q).count_ones() <= 8);
                }
            }

            // And it must serialize back to the same bytes it came from
            let bytes = index.to_bytes().expect("serialize to memory");
            assert_eq!(&bytes[..], &data[..bytes.len()]);
        }
        Err(_) => {
            // Failed loads keep the previous contents
            assert_eq!(index.size(), 3);
            assert_eq!(index.query(0x0F, 0, false).matches, vec![0x0F]);
        }
    }
});
