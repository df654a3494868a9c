// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query engine: one bucket, three filters.
//!
//! A query only ever looks at the bucket sharing its splitter bits. Inside
//! that bucket the filters get progressively more expensive:
//!
//! ```text
//!   groups in bucket ──► signature distance ≤ errors ? ──► skip whole group
//!                                 │
//!   entries in group ──► low-part distance ≤ errors ?  ──► reject entry
//!                                 │
//!                        full 64-bit distance ≤ errors ? ──► reject entry
//!                                 │
//!                              match
//! ```
//!
//! The first two filters only ever under-estimate distance (see
//! [`crate::signature`]), so no true match is lost. The last one is exact, so
//! nothing false gets through.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::index::XorSplitIndex;
use crate::layout::Layout;
use crate::signature::{bucket_of_permuted, hamming_distance, xor_signature};

/// Matches and the size of the candidate set they were drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Raw (unpermuted) fingerprints within the error budget, in storage order.
    pub matches: Vec<u64>,
    /// Entries sharing the query's bucket. Does not depend on `errors`.
    pub candidates: u64,
}

impl<L: Layout> XorSplitIndex<L> {
    /// Every stored fingerprint within `errors` bits of `query` whose splitter
    /// bits equal the query's.
    ///
    /// With `candidates_only`, skips all filtering and reports only how many
    /// entries share the bucket. Useful for picking the cheapest copy.
    pub fn query(&self, query: u64, errors: u32, candidates_only: bool) -> QueryResult {
        let widths = &self.widths;
        let permuted = self.layout.permute(query);
        let bucket = bucket_of_permuted(permuted, widths.splitter());

        let groups = self.bucket_range(bucket);
        let candidates = self.entry_range(groups.clone()).len() as u64;
        if candidates_only || candidates == 0 {
            return QueryResult {
                matches: Vec::new(),
                candidates,
            };
        }

        let query_sig = xor_signature(query, widths.xor_len());
        let high = widths.high_part(permuted);
        let query_low = widths.low_part(permuted);

        let mut matches = Vec::new();
        for g in groups {
            let group = self.group_record(g);
            if hamming_distance(query_sig, group.signature) > errors {
                continue;
            }
            let end = self.group_record(g + 1).position;

            for pos in group.position..end {
                let (mid, low) = self.entry(pos);
                if hamming_distance(query_low, low) > errors {
                    continue;
                }
                let candidate = widths.join(high, mid, low);
                if hamming_distance(permuted, candidate) <= errors {
                    matches.push(self.layout.inverse(candidate));
                }
            }
        }

        QueryResult {
            matches,
            candidates,
        }
    }

    /// [`query`](Self::query) with the default error budget, matches only.
    pub fn search(&self, query: u64) -> Vec<u64> {
        self.query(query, self.default_errors(), false).matches
    }

    /// Size of the candidate set for `query`.
    pub fn count_candidates(&self, query: u64) -> u64 {
        self.query(query, 0, true).candidates
    }

    /// Run many queries with the same budget. Results line up with `queries`.
    pub fn query_batch(&self, queries: &[u64], errors: u32) -> Vec<QueryResult> {
        #[cfg(feature = "parallel")]
        let results = queries
            .par_iter()
            .map(|&q| self.query(q, errors, false))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = queries.iter().map(|&q| self.query(q, errors, false)).collect();

        results
    }
}
