//! Tests for block layouts and combination ranking.

use hamsplit::{combination_count, BlockLayout, ConfigError, IndexConfig, Layout};

#[test]
fn test_uneven_blocks_put_extra_bits_first() {
    // 64 = 6 * 10 + 4: blocks 0..4 are 11 bits, 4..6 are 10
    let layout = BlockLayout::new(6, 2, 0).unwrap();
    assert_eq!(layout.block_widths(), &[11, 11, 11, 11, 10, 10]);
    assert_eq!(layout.block_widths().iter().sum::<u32>(), 64);
    assert_eq!(layout.splitter_bits(), 22);
}

#[test]
fn test_chosen_blocks_move_to_top() {
    // 4 blocks of 16 bits; combination 5 of C(4, 2) is {2, 3}
    let layout = BlockLayout::new(4, 2, 5).unwrap();
    assert_eq!(layout.chosen(), &[2, 3]);
    assert_eq!(layout.permute(0xAAAA_BBBB_CCCC_DDDD), 0xCCCC_DDDD_AAAA_BBBB);
    assert_eq!(layout.inverse(0xCCCC_DDDD_AAAA_BBBB), 0xAAAA_BBBB_CCCC_DDDD);
}

#[test]
fn test_every_combination_is_a_permutation() {
    let config = IndexConfig {
        block_count: 5,
        chosen_blocks: 2,
        ..IndexConfig::default()
    };
    assert_eq!(config.copies(), 10);

    let probes = [0u64, u64::MAX, 0x0123_4567_89AB_CDEF, 1, 1 << 63];
    for id in 0..config.copies() {
        let layout = config.with_combination(id).layout().unwrap();
        assert_eq!(layout.combination(), id);
        for &x in &probes {
            let p = layout.permute(x);
            assert_eq!(p.count_ones(), x.count_ones());
            assert_eq!(layout.inverse(p), x);
        }
    }
}

#[test]
fn test_combination_past_end_rejected() {
    let err = BlockLayout::new(4, 2, 6).unwrap_err();
    assert_eq!(err, ConfigError::CombinationOutOfRange { id: 6, count: 6 });
}

#[test]
fn test_invalid_block_counts_rejected() {
    for (blocks, chosen) in [(0, 0), (4, 0), (4, 5), (65, 1)] {
        assert_eq!(
            BlockLayout::new(blocks, chosen, 0).unwrap_err(),
            ConfigError::InvalidBlocks { blocks, chosen }
        );
    }
}

#[test]
fn test_single_bit_blocks() {
    assert_eq!(combination_count(64, 1), 64);
    let layout = BlockLayout::new(64, 1, 63).unwrap();
    assert_eq!(layout.splitter_bits(), 1);
    // Block 63 is bit 0; it becomes bit 63
    assert_eq!(layout.permute(1), 1 << 63);
}
