//! Tests for bucket ids and xor signatures.

use hamsplit::{bucket_id, combined_key, xor_signature, BlockLayout, IdentityLayout};

#[test]
fn test_signature_width_bounds() {
    for xor_len in 1..=16 {
        for &x in &[0u64, u64::MAX, 0xDEAD_BEEF_CAFE_F00D] {
            assert!(xor_signature(x, xor_len) < 1 << xor_len);
        }
    }
}

#[test]
fn test_signature_is_linear() {
    let a = 0x0123_4567_89AB_CDEFu64;
    let b = 0xFEDC_BA98_7654_3210u64;
    for xor_len in [3, 6, 8, 13] {
        assert_eq!(
            xor_signature(a, xor_len) ^ xor_signature(b, xor_len),
            xor_signature(a ^ b, xor_len)
        );
    }
}

#[test]
fn test_bucket_id_is_top_bits_of_permuted() {
    let layout = BlockLayout::new(4, 1, 3).unwrap();
    // Block 3 is the low 16 bits
    assert_eq!(bucket_id(&layout, 0x0000_0000_0000_BEEF), 0xBEEF);
    assert_eq!(bucket_id(&layout, 0xFFFF_FFFF_FFFF_0000), 0);
}

#[test]
fn test_zero_splitter_bits_single_bucket() {
    let layout = IdentityLayout::new(0);
    assert_eq!(bucket_id(&layout, u64::MAX), 0);
    assert_eq!(combined_key(&layout, 0x3F, 6), 0x3F);
}

#[test]
fn test_combined_key_orders_bucket_first() {
    let layout = IdentityLayout::new(8);
    let low_bucket = combined_key(&layout, 0x01FF_FFFF_FFFF_FFFF, 6);
    let high_bucket = combined_key(&layout, 0x0200_0000_0000_0000, 6);
    assert!(low_bucket < high_bucket);
    assert_eq!(low_bucket >> 6, 1);
    assert_eq!(high_bucket >> 6, 2);
}
