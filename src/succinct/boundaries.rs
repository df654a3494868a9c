// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Unary-coded group counts: the bucket → group-range map.
//!
//! Bucket `b` with `g` groups is written as `g` zeros followed by a one:
//!
//! ```text
//! bucket:   0      1    2   3
//! groups:   2      0    3   1
//! bits:    0 0 1   1  0 0 0 1  0 1
//!              ^   ^        ^    ^   delimiters (one per bucket)
//! ```
//!
//! The `b`-th delimiter sits after `b` earlier delimiters and after every
//! group of buckets `0..=b`, so `select1(b) - b` is the number of groups in
//! buckets `0..=b`. Two selects give a bucket's half-open group range without
//! a counter per bucket: `2^S + groups` bits instead of `2^S` integers.

use std::io::{self, Read, Write};
use std::ops::Range;

use super::{BitVector, Select1};
use crate::error::{Error, Result};

/// The boundary bit sequence together with the select index bound to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundaries {
    bits: BitVector,
    select: Select1,
}

impl Boundaries {
    pub fn from_bits(bits: BitVector) -> Self {
        let select = Select1::new(&bits);
        Self { bits, select }
    }

    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    /// Number of buckets (delimiters).
    pub fn bucket_count(&self) -> u64 {
        self.select.ones()
    }

    /// Number of groups across all buckets.
    pub fn group_count(&self) -> u64 {
        self.bits.len() - self.select.ones()
    }

    /// Groups in buckets `0..bucket`.
    #[inline]
    fn groups_before(&self, bucket: u64) -> u64 {
        if bucket == 0 {
            return 0;
        }
        self.groups_through(bucket - 1)
    }

    /// Groups in buckets `0..=bucket`.
    #[inline]
    fn groups_through(&self, bucket: u64) -> u64 {
        match self.select.select1(&self.bits, bucket) {
            Some(pos) => pos - bucket,
            None => self.group_count(),
        }
    }

    /// Half-open range of group indices belonging to `bucket`.
    ///
    /// Bucket ids past the last delimiter get an empty range at the end.
    #[inline]
    pub fn bucket_range(&self, bucket: u64) -> Range<u64> {
        self.groups_before(bucket)..self.groups_through(bucket)
    }

    pub fn size_in_bytes(&self) -> (u64, u64) {
        (self.bits.size_in_bytes(), self.select.size_in_bytes())
    }

    pub fn serialize<W: Write>(&self, w: &mut W) -> io::Result<u64> {
        Ok(self.bits.serialize(w)? + self.select.serialize(w)?)
    }

    /// Load the bit sequence, then the select index re-bound to it.
    pub fn load<R: Read>(r: &mut R) -> Result<Self> {
        let bits = BitVector::load(r)?;
        let select = Select1::load(r, &bits)?;
        Ok(Self { bits, select })
    }

    /// Check the sequence has exactly `buckets` delimiters and ends with one.
    pub(crate) fn check_shape(&self, buckets: u64) -> Result<()> {
        if self.bucket_count() != buckets {
            return Err(Error::format(format!(
                "boundary sequence has {} delimiters, expected {}",
                self.bucket_count(),
                buckets
            )));
        }
        if buckets > 0 && self.bits.get(self.bits.len() - 1) != Some(true) {
            return Err(Error::format("boundary sequence does not end with a delimiter"));
        }
        Ok(())
    }
}
