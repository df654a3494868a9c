// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width little-endian field codec.
//!
//! Every field is either a `u8` or a `u64`, written little-endian. Readers
//! take the field name so a short stream says *which* field came up short.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Words read per allocation step. A corrupted length can't make us
/// allocate gigabytes before the stream runs dry.
const READ_CHUNK_WORDS: usize = 1 << 16;

/// Write a `u64`, returning the bytes written.
pub fn write_u64<W: Write>(w: &mut W, value: u64) -> io::Result<u64> {
    w.write_all(&value.to_le_bytes())?;
    Ok(8)
}

/// Write a `u8`, returning the bytes written.
pub fn write_u8<W: Write>(w: &mut W, value: u8) -> io::Result<u64> {
    w.write_all(&[value])?;
    Ok(1)
}

/// Write a run of words, returning the bytes written.
pub fn write_words<W: Write>(w: &mut W, words: &[u64]) -> io::Result<u64> {
    for &word in words {
        w.write_all(&word.to_le_bytes())?;
    }
    Ok(words.len() as u64 * 8)
}

fn read_exact<R: Read>(r: &mut R, buf: &mut [u8], field: &'static str) -> Result<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::Truncated { field },
        _ => Error::Io(e),
    })
}

pub fn read_u64<R: Read>(r: &mut R, field: &'static str) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_exact(r, &mut buf, field)?;
    Ok(u64::from_le_bytes(buf))
}

pub fn read_u8<R: Read>(r: &mut R, field: &'static str) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(r, &mut buf, field)?;
    Ok(buf[0])
}

/// Read `count` words.
pub fn read_words<R: Read>(r: &mut R, count: u64, field: &'static str) -> Result<Vec<u64>> {
    let count = usize::try_from(count)
        .map_err(|_| Error::format(format!("{} word count {} overflows usize", field, count)))?;
    let mut words = Vec::with_capacity(count.min(READ_CHUNK_WORDS));
    let mut buf = [0u8; 8];
    for _ in 0..count {
        read_exact(r, &mut buf, field)?;
        words.push(u64::from_le_bytes(buf));
    }
    Ok(words)
}

/// Number of 64-bit words needed to hold `bits` bits.
pub fn words_for_bits(bits: u64) -> u64 {
    bits.div_ceil(64)
}
