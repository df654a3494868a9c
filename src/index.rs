// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One copy of a multi-index Hamming structure over 64-bit fingerprints.
//!
//! Storage is three packed arrays plus the boundary sequence:
//!
//! ```text
//!  boundaries   0 0 1 1 0 1 ...        bucket b → groups [l, r)
//!                    │
//!  first_level  [pos|sig] [pos|sig] ... [n|0]    group g → entries [pos_g, pos_g+1)
//!                    │
//!  mid / low    mid bits, low bits per entry, grouped by (bucket, signature)
//! ```
//!
//! A stored entry keeps only its mid and low parts. The splitter bits are the
//! bucket id and are recovered from the query, which must share them.
//!
//! The structure is immutable once built. `load` is the only mutation and it
//! replaces everything at once.

use std::io::{Read, Write};
use std::ops::Range;

use tracing::debug;

use crate::build::{build, FIRST_LEVEL_WIDTH};
use crate::config::{IndexConfig, Widths};
use crate::error::{Error, Result};
use crate::layout::{BlockLayout, Layout};
use crate::succinct::{Boundaries, PackedArray};
use crate::verify::contracts;

/// A decoded first-level record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GroupRecord {
    /// Storage position of the group's first entry.
    pub position: usize,
    pub signature: u64,
}

/// Serialized size of each field, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpaceReport {
    pub entry_count: u64,
    pub low_entries: u64,
    pub mid_entries: u64,
    pub first_level: u64,
    pub boundaries: u64,
    pub select: u64,
}

impl SpaceReport {
    pub fn total(&self) -> u64 {
        self.entry_count
            + self.low_entries
            + self.mid_entries
            + self.first_level
            + self.boundaries
            + self.select
    }

    /// Average bits per indexed entry, everything included.
    pub fn bits_per_entry(&self, entries: u64) -> f64 {
        if entries == 0 {
            return 0.0;
        }
        (self.total() * 8) as f64 / entries as f64
    }
}

/// One index copy: xor-signature buckets over a block layout.
///
/// # Example
///
/// ```ignore
/// let config = IndexConfig { block_count: 8, ..IndexConfig::default() };
/// let index = XorSplitIndex::new(&config, &fingerprints)?;
///
/// let hits = index.query(q, 3, false);
/// for fp in hits.matches {
///     assert!((fp ^ q).count_ones() <= 3);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct XorSplitIndex<L: Layout = BlockLayout> {
    pub(crate) layout: L,
    pub(crate) widths: Widths,
    default_errors: u32,
    n: u64,
    pub(crate) low: PackedArray,
    pub(crate) mid: PackedArray,
    pub(crate) first_level: PackedArray,
    pub(crate) boundaries: Boundaries,
}

impl XorSplitIndex<BlockLayout> {
    /// Build a copy for `config` over `entries`.
    pub fn new(config: &IndexConfig, entries: &[u64]) -> Result<Self> {
        let layout = config.layout()?;
        Self::with_layout(
            layout,
            config.low_width,
            config.xor_len,
            config.default_errors(),
            entries,
        )
    }

    /// Load a copy serialized with the same `config`.
    ///
    /// Nothing is built first: the stream is checked against the configured
    /// widths and becomes the whole contents.
    pub fn from_reader<R: Read>(config: &IndexConfig, reader: &mut R) -> Result<Self> {
        let layout = config.layout()?;
        let widths = Widths::new(layout.splitter_bits(), config.low_width, config.xor_len)?;
        let mut index = Self {
            layout,
            widths,
            default_errors: config.default_errors(),
            n: 0,
            low: PackedArray::default(),
            mid: PackedArray::default(),
            first_level: PackedArray::default(),
            boundaries: Boundaries::default(),
        };
        index.load(reader)?;
        Ok(index)
    }
}

impl<L: Layout> XorSplitIndex<L> {
    /// Build a copy over any layout.
    ///
    /// Fails on inconsistent widths before touching `entries`, and on a
    /// broken construction invariant afterwards.
    pub fn with_layout(
        layout: L,
        low_width: u32,
        xor_len: u32,
        default_errors: u32,
        entries: &[u64],
    ) -> Result<Self> {
        let widths = Widths::new(layout.splitter_bits(), low_width, xor_len)?;
        let built = build(&layout, &widths, entries)?;

        Ok(Self {
            layout,
            widths,
            default_errors,
            n: entries.len() as u64,
            low: built.low,
            mid: built.mid,
            first_level: built.first_level,
            boundaries: built.boundaries,
        })
    }

    /// Number of indexed entries.
    pub fn size(&self) -> u64 {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of (bucket, signature) groups.
    pub fn group_count(&self) -> u64 {
        self.boundaries.group_count()
    }

    pub fn widths(&self) -> &Widths {
        &self.widths
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Error budget used by [`search`](Self::search).
    pub fn default_errors(&self) -> u32 {
        self.default_errors
    }

    /// Half-open range of group indices in `bucket`.
    #[inline]
    pub(crate) fn bucket_range(&self, bucket: u64) -> Range<usize> {
        let range = self.boundaries.bucket_range(bucket);
        let range = range.start as usize..range.end as usize;
        contracts::check_group_range(&range, self.first_level.len());
        range
    }

    #[inline]
    pub(crate) fn group_record(&self, i: usize) -> GroupRecord {
        let raw = self.first_level.get(i);
        let xor_len = self.widths.xor_len();
        GroupRecord {
            position: (raw >> xor_len) as usize,
            signature: raw & self.widths.xor_mask(),
        }
    }

    /// Entry range covered by groups `groups`.
    #[inline]
    pub(crate) fn entry_range(&self, groups: Range<usize>) -> Range<usize> {
        let range = self.group_record(groups.start).position..self.group_record(groups.end).position;
        contracts::check_entry_range(&range, self.n);
        range
    }

    /// Mid and low parts stored at `pos`.
    #[inline]
    pub(crate) fn entry(&self, pos: usize) -> (u64, u64) {
        (self.mid.get(pos), self.low.get(pos))
    }

    /// Write the copy; returns the number of bytes written.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<u64> {
        let mut written = crate::binary::write_u64(w, self.n)?;
        written += self.low.serialize(w)?;
        written += self.mid.serialize(w)?;
        written += self.first_level.serialize(w)?;
        written += self.boundaries.serialize(w)?;
        Ok(written)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.space_report().total() as usize);
        self.serialize(&mut buf)?;
        Ok(buf)
    }

    /// Replace this copy with one read from `reader`.
    ///
    /// The stream must have been written under the same layout and widths.
    /// Nothing is replaced unless every field reads and cross-checks cleanly;
    /// on error the current contents stay as they were.
    pub fn load<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let n = crate::binary::read_u64(reader, "entry count")?;
        let low = PackedArray::load(reader, "low entries")?;
        let mid = PackedArray::load(reader, "mid entries")?;
        let first_level = PackedArray::load(reader, "first level")?;
        let boundaries = Boundaries::load(reader)?;

        self.check_loaded(n, &low, &mid, &first_level, &boundaries)?;

        debug!(
            entries = n,
            groups = boundaries.group_count(),
            boundary_bits = boundaries.bits().len(),
            "loaded xor-bucket index"
        );

        self.n = n;
        self.low = low;
        self.mid = mid;
        self.first_level = first_level;
        self.boundaries = boundaries;
        Ok(())
    }

    fn check_loaded(
        &self,
        n: u64,
        low: &PackedArray,
        mid: &PackedArray,
        first_level: &PackedArray,
        boundaries: &Boundaries,
    ) -> Result<()> {
        let expect_width = |name: &str, array: &PackedArray, width: u32| {
            if array.width() != width {
                return Err(Error::format(format!(
                    "{} width {} does not match configured {}",
                    name,
                    array.width(),
                    width
                )));
            }
            Ok(())
        };
        expect_width("low entries", low, self.widths.low())?;
        expect_width("mid entries", mid, self.widths.mid())?;
        expect_width("first level", first_level, FIRST_LEVEL_WIDTH)?;

        if low.len() as u64 != n || mid.len() as u64 != n {
            return Err(Error::format(format!(
                "entry count {} but {} low and {} mid entries",
                n,
                low.len(),
                mid.len()
            )));
        }

        boundaries.check_shape(self.widths.bucket_count())?;
        if first_level.len() as u64 != boundaries.group_count() + 1 {
            return Err(Error::format(format!(
                "{} first-level records for {} groups",
                first_level.len(),
                boundaries.group_count()
            )));
        }

        // Every group is non-empty, starts where the previous one ended,
        // and the sentinel closes at n
        let xor_len = self.widths.xor_len();
        let mut prev = 0u64;
        for (i, record) in first_level.iter().enumerate() {
            let pos = record >> xor_len;
            let expected_order = if i == 0 { pos == 0 } else { pos > prev };
            if !expected_order {
                return Err(Error::format(format!(
                    "first-level record {} at position {} after {}",
                    i, pos, prev
                )));
            }
            prev = pos;
        }
        if prev != n {
            return Err(Error::format(format!(
                "first-level sentinel at {} but {} entries",
                prev, n
            )));
        }
        Ok(())
    }

    /// Serialized size of each field.
    pub fn space_report(&self) -> SpaceReport {
        let (boundaries, select) = self.boundaries.size_in_bytes();
        SpaceReport {
            entry_count: 8,
            low_entries: self.low.size_in_bytes(),
            mid_entries: self.mid.size_in_bytes(),
            first_level: self.first_level.size_in_bytes(),
            boundaries,
            select,
        }
    }
}
