//! Soundness and completeness of a single copy.
//!
//! 1. **Soundness**: every match is within the error budget.
//! 2. **Completeness**: every entry in the query's bucket within the budget
//!    is returned, as many times as it was indexed.
//! 3. **Exact retrieval**: with zero errors, an indexed entry finds itself
//!    and only bit-identical copies.

use proptest::prelude::*;

use crate::common::{bucket_oracle, build, flip_bits, sorted_matches};
use hamsplit::{hamming_distance, IndexConfig};

// ============================================================================
// STRATEGIES
// ============================================================================

/// A copy of an 8-block or 16-block layout, or odd widths.
fn config_strategy() -> impl Strategy<Value = IndexConfig> {
    prop_oneof![
        (0u64..8).prop_map(|c| IndexConfig {
            block_count: 8,
            chosen_blocks: 1,
            combination: c,
            ..IndexConfig::default()
        }),
        (0u64..560).prop_map(|c| IndexConfig {
            block_count: 16,
            chosen_blocks: 3,
            combination: c,
            ..IndexConfig::default()
        }),
        (1u32..=4, 1u32..=32).prop_map(|(xor_len, low_width)| IndexConfig {
            block_count: 8,
            chosen_blocks: 2,
            combination: 11,
            low_width,
            xor_len,
        }),
    ]
}

/// Fingerprints clustered around a few centres, so buckets are crowded and
/// distances are small enough to matter.
fn clustered_entries() -> impl Strategy<Value = (Vec<u64>, u64)> {
    (
        prop::collection::vec(any::<u64>(), 1..4),
        prop::collection::vec((0usize..4, prop::collection::vec(0u32..64, 0..6)), 1..120),
    )
        .prop_map(|(centres, offsets)| {
            let entries: Vec<u64> = offsets
                .iter()
                .map(|(c, flips)| flip_bits(centres[c % centres.len()], flips))
                .collect();
            (entries, centres[0])
        })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sound(
        config in config_strategy(),
        (entries, centre) in clustered_entries(),
        flips in prop::collection::vec(0u32..64, 0..4),
        errors in 0u32..10,
    ) {
        let index = build(&config, &entries);
        let q = flip_bits(centre, &flips);
        for m in index.query(q, errors, false).matches {
            prop_assert!(hamming_distance(m, q) <= errors);
            prop_assert!(entries.contains(&m));
        }
    }

    #[test]
    fn prop_complete_within_bucket(
        config in config_strategy(),
        (entries, centre) in clustered_entries(),
        flips in prop::collection::vec(0u32..64, 0..4),
        errors in 0u32..10,
    ) {
        let index = build(&config, &entries);
        let q = flip_bits(centre, &flips);
        prop_assert_eq!(
            sorted_matches(&index, q, errors),
            bucket_oracle(&index, &entries, q, errors)
        );
    }

    #[test]
    fn prop_exact_match_finds_itself(
        config in config_strategy(),
        (entries, _) in clustered_entries(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = build(&config, &entries);
        let x = entries[pick.index(entries.len())];
        let copies = entries.iter().filter(|&&e| e == x).count();
        let matches = index.query(x, 0, false).matches;
        prop_assert_eq!(matches.len(), copies);
        prop_assert!(matches.iter().all(|&m| m == x));
    }
}
