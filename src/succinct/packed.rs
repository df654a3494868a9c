// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width packed integer array.
//!
//! Values of `width` bits (0 to 64) laid end to end in 64-bit words. A value
//! may straddle two words. Width 0 stores nothing and reads back zeros.

use std::io::{self, Read, Write};

use crate::binary::{read_u64, read_u8, read_words, write_u64, write_u8, write_words};
use crate::config::mask;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedArray {
    words: Vec<u64>,
    len: usize,
    width: u32,
}

impl PackedArray {
    /// Zero-filled array of `len` values, `width` bits each.
    pub fn new(len: usize, width: u32) -> Self {
        assert!(width <= 64, "packed width {} exceeds 64", width);
        let bits = len as u64 * u64::from(width);
        Self {
            words: vec![0; bits.div_ceil(64) as usize],
            len,
            width,
        }
    }

    /// Pack `values`, truncating each to `width` bits.
    pub fn from_values(values: &[u64], width: u32) -> Self {
        let mut packed = Self::new(values.len(), width);
        for (i, &v) in values.iter().enumerate() {
            packed.set(i, v);
        }
        packed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn get(&self, index: usize) -> u64 {
        debug_assert!(index < self.len, "index {} out of bounds ({})", index, self.len);
        if self.width == 0 {
            return 0;
        }
        let bit = index as u64 * u64::from(self.width);
        let word = (bit / 64) as usize;
        let offset = (bit % 64) as u32;

        let mut value = self.words[word] >> offset;
        if offset + self.width > 64 {
            value |= self.words[word + 1] << (64 - offset);
        }
        value & mask(self.width)
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: u64) {
        debug_assert!(index < self.len, "index {} out of bounds ({})", index, self.len);
        if self.width == 0 {
            return;
        }
        let m = mask(self.width);
        let value = value & m;
        let bit = index as u64 * u64::from(self.width);
        let word = (bit / 64) as usize;
        let offset = (bit % 64) as u32;

        self.words[word] = (self.words[word] & !(m << offset)) | (value << offset);
        if offset + self.width > 64 {
            let spill = 64 - offset;
            self.words[word + 1] = (self.words[word + 1] & !(m >> spill)) | (value >> spill);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    pub fn size_in_bytes(&self) -> u64 {
        9 + self.words.len() as u64 * 8
    }

    pub fn serialize<W: Write>(&self, w: &mut W) -> io::Result<u64> {
        Ok(write_u64(w, self.len as u64)?
            + write_u8(w, self.width as u8)?
            + write_words(w, &self.words)?)
    }

    pub fn load<R: Read>(r: &mut R, field: &'static str) -> Result<Self> {
        let len = read_u64(r, field)?;
        let width = u32::from(read_u8(r, field)?);
        if width > 64 {
            return Err(Error::format(format!("{} width {} exceeds 64", field, width)));
        }
        let bits = len
            .checked_mul(u64::from(width))
            .ok_or_else(|| Error::format(format!("{} length {} overflows", field, len)))?;
        let len = usize::try_from(len)
            .map_err(|_| Error::format(format!("{} length {} overflows usize", field, len)))?;
        let words = read_words(r, bits.div_ceil(64), field)?;
        Ok(Self { words, len, width })
    }
}
