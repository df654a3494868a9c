// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bit layouts: which bits of a fingerprint become the bucket key.
//!
//! Multi-index hashing cuts a fingerprint into `b` blocks. If two fingerprints
//! differ in at most `k` bits, at least `b - k` blocks are identical. Each
//! index copy picks one `(b - k)`-subset of blocks, moves them to the top of
//! the word, and uses those bits as an exact-match bucket key. Run every
//! subset and you cover every error pattern; run one and you get a copy.
//!
//! The index only needs three things from a layout: a bit permutation, its
//! exact inverse, and how many top bits the chosen blocks occupy. That is the
//! [`Layout`] trait. [`BlockLayout`] is the standard "choose k of b blocks"
//! scheme; anything else that satisfies the contract plugs in the same way.

mod blocks;

pub use blocks::{BlockLayout, IdentityLayout};

/// A bit permutation of a 64-bit word plus the width of its splitter region.
///
/// # Contract
///
/// - `inverse(permute(x)) == x` for every `x`.
/// - `permute` moves bits, it never creates or destroys them, so
///   `(permute(a) ^ permute(b)).count_ones() == (a ^ b).count_ones()`.
/// - `splitter_bits() <= 64`.
///
/// Layouts are shared read-only between query threads, hence `Send + Sync`.
pub trait Layout: Send + Sync {
    /// Forward permutation.
    fn permute(&self, x: u64) -> u64;

    /// Exact inverse of [`permute`](Self::permute).
    fn inverse(&self, x: u64) -> u64;

    /// Number of most-significant permuted bits used as the bucket key.
    fn splitter_bits(&self) -> u32;
}

impl<T: Layout + ?Sized> Layout for &T {
    fn permute(&self, x: u64) -> u64 {
        (**self).permute(x)
    }

    fn inverse(&self, x: u64) -> u64 {
        (**self).inverse(x)
    }

    fn splitter_bits(&self) -> u32 {
        (**self).splitter_bits()
    }
}

/// Binomial coefficient `C(n, k)`, saturating at `u64::MAX`.
///
/// Every `n <= 64` fits: the largest, `C(64, 32)`, is about 1.8e18.
pub fn combination_count(n: u32, k: u32) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    u64::try_from(result).unwrap_or(u64::MAX)
}

/// The `rank`-th `k`-subset of `0..n` in lexicographic order.
///
/// Returns `None` when `rank >= C(n, k)`.
pub fn unrank_combination(n: u32, k: u32, mut rank: u64) -> Option<Vec<u32>> {
    if rank >= combination_count(n, k) {
        return None;
    }
    let mut chosen = Vec::with_capacity(k as usize);
    let mut next = 0u32;
    while (chosen.len() as u32) < k {
        let remaining = k - chosen.len() as u32;
        // Subsets that take `next` as their next element
        let with_next = combination_count(n - next - 1, remaining - 1);
        if rank < with_next {
            chosen.push(next);
        } else {
            rank -= with_next;
        }
        next += 1;
    }
    Some(chosen)
}
