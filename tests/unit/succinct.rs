//! Tests for the bitvector, select, and packed array primitives.

use hamsplit::succinct::{BitVector, Boundaries, PackedArray, Select1};

/// Naive select: position of the k-th one, by scanning.
fn naive_select(bools: &[bool], k: u64) -> Option<u64> {
    bools
        .iter()
        .enumerate()
        .filter(|(_, &b)| b)
        .nth(k as usize)
        .map(|(i, _)| i as u64)
}

#[test]
fn test_select_agrees_with_scan_on_mixed_density() {
    // Dense runs, sparse stretches, and word-boundary crossings
    let bools: Vec<bool> = (0..5_000u64)
        .map(|i| match i {
            0..=999 => i % 3 == 0,
            1000..=2999 => i % 97 == 0,
            _ => i % 2 == 1,
        })
        .collect();
    let bits = BitVector::from_bools(&bools);
    let select = Select1::new(&bits);

    assert_eq!(select.ones(), bools.iter().filter(|&&b| b).count() as u64);
    for k in 0..select.ones() + 2 {
        assert_eq!(select.select1(&bits, k), naive_select(&bools, k), "k = {}", k);
    }
}

#[test]
fn test_select_on_all_ones() {
    let mut bits = BitVector::new();
    bits.push_run(true, 300);
    let select = Select1::new(&bits);
    for k in 0..300 {
        assert_eq!(select.select1(&bits, k), Some(k));
    }
    assert_eq!(select.select1(&bits, 300), None);
}

#[test]
fn test_select_on_empty_vector() {
    let bits = BitVector::new();
    let select = Select1::new(&bits);
    assert_eq!(select.ones(), 0);
    assert_eq!(select.select1(&bits, 0), None);
}

#[test]
fn test_select_load_rejects_mismatched_vector() {
    let bits = BitVector::from_bools(&[true, false, true, true]);
    let select = Select1::new(&bits);
    let mut buf = Vec::new();
    select.serialize(&mut buf).unwrap();

    let other = BitVector::from_bools(&[false, true, true, true]);
    assert!(Select1::load(&mut buf.as_slice(), &other).is_err());
    assert_eq!(Select1::load(&mut buf.as_slice(), &bits).unwrap(), select);
}

#[test]
fn test_packed_array_straddles_words() {
    let values: Vec<u64> = (0..200u64).map(|i| (i * 0x1F3) & ((1 << 27) - 1)).collect();
    let packed = PackedArray::from_values(&values, 27);
    assert_eq!(packed.len(), 200);
    assert_eq!(packed.iter().collect::<Vec<_>>(), values);
}

#[test]
fn test_packed_array_full_width() {
    let values = [u64::MAX, 0, 0x8000_0000_0000_0001];
    let packed = PackedArray::from_values(&values, 64);
    assert_eq!(packed.iter().collect::<Vec<_>>(), values);
}

#[test]
fn test_packed_array_load_reports_field() {
    let packed = PackedArray::from_values(&[1, 2, 3], 40);
    let mut buf = Vec::new();
    packed.serialize(&mut buf).unwrap();
    buf.pop();

    let err = PackedArray::load(&mut buf.as_slice(), "mid entries").unwrap_err();
    assert!(err.to_string().contains("mid entries"), "{}", err);
}

#[test]
fn test_boundaries_bucket_ranges() {
    // bucket 0: 2 groups, bucket 1: none, bucket 2: 1 group, bucket 3: none
    let bits = BitVector::from_bools(&[false, false, true, true, false, true, true]);
    let boundaries = Boundaries::from_bits(bits);
    assert_eq!(boundaries.bucket_count(), 4);
    assert_eq!(boundaries.group_count(), 3);
    assert_eq!(boundaries.bucket_range(0), 0..2);
    assert_eq!(boundaries.bucket_range(1), 2..2);
    assert_eq!(boundaries.bucket_range(2), 2..3);
    assert_eq!(boundaries.bucket_range(3), 3..3);
}

#[test]
fn test_boundaries_serialized_size() {
    let mut bits = BitVector::new();
    for _ in 0..100 {
        bits.push(false);
        bits.push(true);
    }
    let boundaries = Boundaries::from_bits(bits);
    let (bit_bytes, select_bytes) = boundaries.size_in_bytes();
    let mut buf = Vec::new();
    let written = boundaries.serialize(&mut buf).unwrap();
    assert_eq!(written, bit_bytes + select_bytes);
    assert_eq!(buf.len() as u64, written);
}
