// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Append-only bit sequence backed by 64-bit words.

use std::io::{self, Read, Write};

use crate::binary::{read_u64, read_words, words_for_bits, write_u64, write_words};
use crate::error::{Error, Result};

/// Bit sequence, least significant bit of word 0 first.
///
/// Bits past `len` in the last word are always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    len: u64,
}

impl BitVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: u64) -> Self {
        Self {
            words: Vec::with_capacity(words_for_bits(bits) as usize),
            len: 0,
        }
    }

    pub fn from_bools(bools: &[bool]) -> Self {
        let mut bv = Self::with_capacity(bools.len() as u64);
        for &b in bools {
            bv.push(b);
        }
        bv
    }

    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 64;
        if offset == 0 {
            self.words.push(0);
        }
        if bit {
            if let Some(last) = self.words.last_mut() {
                *last |= 1u64 << offset;
            }
        }
        self.len += 1;
    }

    /// Append `count` copies of `bit`.
    pub fn push_run(&mut self, bit: bool, count: u64) {
        for _ in 0..count {
            self.push(bit);
        }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: u64) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.words[(index / 64) as usize] >> (index % 64)) & 1 == 1)
    }

    /// Raw word `i`; zero past the end.
    #[inline]
    pub fn word(&self, i: usize) -> u64 {
        self.words.get(i).copied().unwrap_or(0)
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    pub fn count_zeros(&self) -> u64 {
        self.len - self.count_ones()
    }

    pub fn size_in_bytes(&self) -> u64 {
        8 + self.words.len() as u64 * 8
    }

    pub fn serialize<W: Write>(&self, w: &mut W) -> io::Result<u64> {
        Ok(write_u64(w, self.len)? + write_words(w, &self.words)?)
    }

    pub fn load<R: Read>(r: &mut R) -> Result<Self> {
        let len = read_u64(r, "bit vector length")?;
        let words = read_words(r, words_for_bits(len), "bit vector words")?;
        let tail = len % 64;
        if tail != 0 {
            let last = words.last().copied().unwrap_or(0);
            if last >> tail != 0 {
                return Err(Error::format("bit vector has bits set past its length"));
            }
        }
        Ok(Self { words, len })
    }
}
