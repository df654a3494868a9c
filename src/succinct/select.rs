// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sampled select-1 index over a [`BitVector`].
//!
//! Stores the position of every 64th 1-bit. A query jumps to the nearest
//! sample at or before the target and scans forward word by word with
//! popcount, finishing with an in-word select.
//!
//! The index is a *view*: it owns no bits and takes the vector as an argument
//! on every query. That means clone and move are free of fix-ups, but it also
//! means the index must be rebuilt or re-verified whenever it is paired with
//! a different vector. [`Select1::load`] does the verification.
//!
//! # Space
//!
//! One `u64` per 64 ones: at most 1 bit of overhead per 1-bit.

use std::io::{self, Read, Write};

use super::BitVector;
use crate::binary::{read_u64, read_words, write_u64, write_words};
use crate::error::{Error, Result};

/// One sample every `SAMPLE_RATE` ones.
const SAMPLE_RATE: u64 = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select1 {
    len: u64,
    ones: u64,
    /// `samples[i]` = position of the `(i * SAMPLE_RATE)`-th 1-bit.
    samples: Vec<u64>,
}

impl Select1 {
    pub fn new(bits: &BitVector) -> Self {
        let mut samples = Vec::new();
        let mut ones = 0u64;
        let mut next_sample = 0u64;

        for (i, &word) in bits.words().iter().enumerate() {
            let in_word = u64::from(word.count_ones());
            while next_sample < ones + in_word {
                let bit = select_in_word(word, (next_sample - ones) as u32);
                samples.push(i as u64 * 64 + u64::from(bit));
                next_sample += SAMPLE_RATE;
            }
            ones += in_word;
        }

        Self {
            len: bits.len(),
            ones,
            samples,
        }
    }

    /// Number of 1-bits in the vector this index was built over.
    pub fn ones(&self) -> u64 {
        self.ones
    }

    /// Position of the `k`-th 1-bit (0-based), or `None` past the last one.
    pub fn select1(&self, bits: &BitVector, k: u64) -> Option<u64> {
        debug_assert_eq!(bits.len(), self.len, "select index bound to another vector");
        if k >= self.ones {
            return None;
        }

        let start = self.samples[(k / SAMPLE_RATE) as usize];
        let mut remaining = k % SAMPLE_RATE;
        let mut i = (start / 64) as usize;
        let mut word = bits.word(i) & (u64::MAX << (start % 64));
        let last_word = bits.words().len();

        loop {
            let in_word = u64::from(word.count_ones());
            if remaining < in_word {
                return Some(i as u64 * 64 + u64::from(select_in_word(word, remaining as u32)));
            }
            remaining -= in_word;
            i += 1;
            if i >= last_word {
                return None;
            }
            word = bits.word(i);
        }
    }

    pub fn size_in_bytes(&self) -> u64 {
        24 + self.samples.len() as u64 * 8
    }

    pub fn serialize<W: Write>(&self, w: &mut W) -> io::Result<u64> {
        Ok(write_u64(w, self.len)?
            + write_u64(w, self.ones)?
            + write_u64(w, self.samples.len() as u64)?
            + write_words(w, &self.samples)?)
    }

    /// Read an index and re-bind it to `bits`, the vector it was written with.
    ///
    /// The stored samples must equal the ones `bits` produces; an index that
    /// disagrees with its vector would answer queries about some other vector.
    pub fn load<R: Read>(r: &mut R, bits: &BitVector) -> Result<Self> {
        let len = read_u64(r, "select length")?;
        let ones = read_u64(r, "select ones")?;
        let count = read_u64(r, "select sample count")?;
        let samples = read_words(r, count, "select samples")?;
        let loaded = Self { len, ones, samples };

        let rebuilt = Self::new(bits);
        if loaded != rebuilt {
            return Err(Error::format(format!(
                "select index (len {}, ones {}) does not match boundary vector (len {}, ones {})",
                loaded.len, loaded.ones, rebuilt.len, rebuilt.ones
            )));
        }
        Ok(loaded)
    }
}

/// Position of the `k`-th set bit of `word` (0-based). `k < word.count_ones()`.
#[inline]
fn select_in_word(mut word: u64, k: u32) -> u32 {
    debug_assert!(k < word.count_ones());
    for _ in 0..k {
        word &= word - 1;
    }
    word.trailing_zeros()
}
