// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Approximate Hamming search over 64-bit fingerprints.
//!
//! One [`XorSplitIndex`] is one copy of a multi-index hashing scheme: it
//! buckets fingerprints on a chosen subset of bit blocks, groups each bucket
//! by a folded xor signature, and stores everything in packed arrays indexed
//! through a unary boundary sequence with select. A query scans a single
//! bucket and returns every entry within the error budget that shares the
//! query's bucket bits. Running all `C(b, c)` copies of a `b`-block layout
//! covers every fingerprint within `b - c` bits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  layout/     │────▶│   build/     │────▶│   index.rs   │
//! │ (BlockLayout,│     │ (keys, sort, │     │ (packed      │
//! │  permute)    │     │  boundaries) │     │  storage)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                    │                    │
//!        ▼                    ▼                    ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ signature.rs │     │  succinct/   │     │  search.rs   │
//! │ (bucket id,  │     │ (bitvector,  │     │ (cascading   │
//! │  xor fold)   │     │  select1)    │     │  filters)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hamsplit::{IndexConfig, XorSplitIndex};
//!
//! let config = IndexConfig { block_count: 8, chosen_blocks: 1, ..Default::default() };
//! let index = XorSplitIndex::new(&config, &fingerprints)?;
//!
//! let result = index.query(q, 3, false);
//! println!("{} matches out of {} candidates", result.matches.len(), result.candidates);
//! ```

// Module declarations
pub mod binary;
mod build;
pub mod config;
pub mod error;
mod index;
pub mod layout;
mod search;
pub mod signature;
pub mod succinct;
pub mod testing;
pub mod verify;

// Re-exports for public API
pub use config::{ConfigError, IndexConfig, Widths};
pub use error::{Error, InvariantError, Result};
pub use index::{SpaceReport, XorSplitIndex};
pub use layout::{combination_count, BlockLayout, IdentityLayout, Layout};
pub use search::QueryResult;
pub use signature::{bucket_id, combined_key, hamming_distance, xor_signature};
