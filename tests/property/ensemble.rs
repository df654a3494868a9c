//! All copies together find everything within `b - c` bits.
//!
//! With `b` blocks and `c` chosen, two fingerprints at distance `<= b - c`
//! agree on at least `c` whole blocks, so at least one combination puts
//! them in the same bucket.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::common::{brute_force, build, flip_bits, four_block_config, random_fingerprints};
use hamsplit::{IndexConfig, XorSplitIndex};

fn all_copies(config: &IndexConfig, entries: &[u64]) -> Vec<XorSplitIndex> {
    (0..config.copies())
        .map(|id| build(&config.with_combination(id), entries))
        .collect()
}

fn union_of(copies: &[XorSplitIndex], q: u64, errors: u32) -> Vec<u64> {
    let found: BTreeSet<u64> = copies
        .iter()
        .flat_map(|index| index.query(q, errors, false).matches)
        .collect();
    found.into_iter().collect()
}

fn distinct(mut entries: Vec<u64>) -> Vec<u64> {
    entries.sort_unstable();
    entries.dedup();
    entries
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_eight_copies_cover_seven_errors(
        seed in any::<u64>(),
        near in prop::collection::vec(prop::collection::vec(0u32..64, 0..9), 1..40),
        flips in prop::collection::vec(0u32..64, 0..4),
        errors in 0u32..=7,
    ) {
        let config = IndexConfig {
            block_count: 8,
            chosen_blocks: 1,
            ..IndexConfig::default()
        };
        prop_assert_eq!(config.copies(), 8);
        prop_assert_eq!(config.default_errors(), 7);

        let centre = random_fingerprints(seed, 1)[0];
        let mut entries: Vec<u64> = near.iter().map(|f| flip_bits(centre, f)).collect();
        entries.extend(random_fingerprints(seed ^ 1, 200));
        let entries = distinct(entries);

        let copies = all_copies(&config, &entries);
        let q = flip_bits(centre, &flips);
        prop_assert_eq!(union_of(&copies, q, errors), brute_force(&entries, q, errors));
    }

    #[test]
    fn prop_four_copies_cover_three_errors(
        seed in any::<u64>(),
        near in prop::collection::vec(prop::collection::vec(0u32..64, 0..5), 1..40),
        flips in prop::collection::vec(0u32..64, 0..3),
    ) {
        let config = four_block_config();
        let centre = random_fingerprints(seed, 1)[0];
        let entries = distinct(near.iter().map(|f| flip_bits(centre, f)).collect());

        let copies = all_copies(&config, &entries);
        let q = flip_bits(centre, &flips);
        let errors = config.default_errors();
        prop_assert_eq!(union_of(&copies, q, errors), brute_force(&entries, q, errors));
    }
}

#[test]
fn test_single_copy_misses_splitter_errors() {
    // Differs only inside block 0: invisible to copy 0, found by copy 1
    let config = IndexConfig {
        block_count: 8,
        chosen_blocks: 1,
        ..IndexConfig::default()
    };
    let x = 0x8000_0000_0000_0000u64;
    let copies = all_copies(&config, &[x]);
    assert!(copies[0].query(0, 1, false).matches.is_empty());
    assert_eq!(copies[1].query(0, 1, false).matches, vec![x]);
}
