// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for hamsplit bit primitives.
//!
//! This standalone crate extracts the functions the query filters depend on
//! and proves the properties that make those filters lossless.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Fold bound**: `popcount(sig(a) ^ sig(b)) <= popcount(a ^ b)` for every
//!    pair and every signature width
//! 2. **Split**: the splitter, mid, and low parts reassemble to the original
//! 3. **Low bound**: the low-part distance never exceeds the full distance
//! 4. **In-word select**: returns the position of the k-th set bit

// ============================================================================
// PRIMITIVES (copied from src/signature.rs, src/config.rs, src/succinct/select.rs)
// ============================================================================

/// Mask with the low `width` bits set. `width` may be 64.
pub fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Fold `x` into `xor_len`-bit chunks and xor them.
pub fn xor_signature(x: u64, xor_len: u32) -> u64 {
    let m = mask(xor_len);
    let mut sig = 0;
    let mut shift = 0;
    while shift < 64 {
        sig ^= (x >> shift) & m;
        shift += xor_len;
    }
    sig
}

/// Split a permuted value into (high, mid, low) with `splitter + mid + low == 64`.
pub fn split(x: u64, splitter: u32, low: u32) -> (u64, u64, u64) {
    let mid = 64 - splitter - low;
    let high = x & !mask(64 - splitter);
    let mid_part = x.checked_shr(low).unwrap_or(0) & mask(mid);
    (high, mid_part, x & mask(low))
}

/// Reassemble the three parts.
pub fn join(high: u64, mid: u64, low_part: u64, low: u32) -> u64 {
    high | mid.checked_shl(low).unwrap_or(0) | low_part
}

/// Position of the `k`-th set bit of `word` (0-based).
pub fn select_in_word(mut word: u64, k: u32) -> u32 {
    for _ in 0..k {
        word &= word - 1;
    }
    word.trailing_zeros()
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Folding never increases Hamming distance.
    #[kani::proof]
    #[kani::unwind(65)]
    fn verify_fold_distance_bounded() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let xor_len: u32 = kani::any_where(|&w| (1..=16).contains(&w));

        let folded = (xor_signature(a, xor_len) ^ xor_signature(b, xor_len)).count_ones();
        kani::assert(
            folded <= (a ^ b).count_ones(),
            "signature distance must not exceed full distance",
        );
    }

    /// Folding is linear over xor.
    #[kani::proof]
    #[kani::unwind(65)]
    fn verify_fold_linear() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let xor_len: u32 = kani::any_where(|&w| (1..=16).contains(&w));
        kani::assert(
            xor_signature(a, xor_len) ^ xor_signature(b, xor_len) == xor_signature(a ^ b, xor_len),
            "fold(a) ^ fold(b) == fold(a ^ b)",
        );
    }

    /// Split then join is the identity for every valid width split.
    #[kani::proof]
    fn verify_split_join_roundtrip() {
        let x: u64 = kani::any();
        let splitter: u32 = kani::any_where(|&s| s <= 32);
        let low: u32 = kani::any_where(|&l| (1..=32).contains(&l));
        let (high, mid, low_part) = split(x, splitter, low);
        kani::assert(join(high, mid, low_part, low) == x, "parts must reassemble");
    }

    /// The low-part filter only under-estimates distance.
    #[kani::proof]
    fn verify_low_distance_bounded() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let low: u32 = kani::any_where(|&l| (1..=32).contains(&l));
        let m = mask(low);
        kani::assert(
            ((a & m) ^ (b & m)).count_ones() <= (a ^ b).count_ones(),
            "low distance must not exceed full distance",
        );
    }

    /// In-word select finds a set bit with exactly k set bits below it.
    #[kani::proof]
    #[kani::unwind(65)]
    fn verify_select_in_word() {
        let word: u64 = kani::any();
        let k: u32 = kani::any();
        kani::assume(k < word.count_ones());

        let pos = select_in_word(word, k);
        kani::assert(pos < 64, "position must be inside the word");
        kani::assert((word >> pos) & 1 == 1, "selected bit must be set");
        kani::assert(
            (word & mask(pos)).count_ones() == k,
            "exactly k set bits below the selected one",
        );
    }
}
