// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format of a serialized index copy.
//!
//! No magic, no version, no checksum: the stream is the fields in a fixed
//! order, each primitive writing its own length/width prefix. Framing is the
//! caller's business (the copy is usually one member of a larger ensemble file).
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ 1. entry count: u64                                        │
//! ├────────────────────────────────────────────────────────────┤
//! │ 2. LOW ENTRIES    PackedArray  len: u64, width: u8, words  │
//! ├────────────────────────────────────────────────────────────┤
//! │ 3. MID ENTRIES    PackedArray  len: u64, width: u8, words  │
//! ├────────────────────────────────────────────────────────────┤
//! │ 4. FIRST LEVEL    PackedArray  len: u64, width: u8, words  │
//! ├────────────────────────────────────────────────────────────┤
//! │ 5. BOUNDARIES     BitVector    len: u64, words             │
//! ├────────────────────────────────────────────────────────────┤
//! │ 6. SELECT INDEX   Select1      len: u64, ones: u64,        │
//! │                                samples: u64, words         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Loading validates every field against the
//! configured widths and against each other before anything is committed.

mod encoding;

pub use encoding::{
    read_u64, read_u8, read_words, words_for_bits, write_u64, write_u8, write_words,
};
