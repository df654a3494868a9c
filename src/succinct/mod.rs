// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compact storage primitives.
//!
//! | Structure      | Space                    | Operation                  |
//! |----------------|--------------------------|----------------------------|
//! | [`BitVector`]  | n bits                   | O(1) get                   |
//! | [`Select1`]    | 1 word per 64 ones       | select-1, sampled + scan   |
//! | [`PackedArray`]| n × width bits           | O(1) get/set               |
//! | [`Boundaries`] | buckets + groups bits    | bucket → group range       |
//!
//! # References
//!
//! - Vigna (WEA 2008): Broadword Implementation of Rank/Select Queries
//! - Gog et al. (SEA 2014): From Theory to Practice: Plug and Play with
//!   Succinct Data Structures

mod bitvec;
mod boundaries;
mod packed;
mod select;

pub use bitvec::BitVector;
pub use boundaries::Boundaries;
pub use packed::PackedArray;
pub use select::Select1;
