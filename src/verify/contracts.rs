// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-build contracts on ranges derived from the boundary structure.
//!
//! Every range the query engine walks comes from arithmetic on select
//! results and first-level records. These checks pin each one against the
//! true length of the array it indexes. Zero-cost in release builds.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract               | Invariant                                       |
//! |------------------------|-------------------------------------------------|
//! | `check_group_range`    | `l <= r < first_level.len()` (sentinel exists)  |
//! | `check_entry_range`    | `pos_l <= pos_r <= n`                           |

use std::ops::Range;

/// A bucket's group range must leave room for the closing record.
#[inline]
pub fn check_group_range(range: &Range<usize>, first_level_len: usize) {
    debug_assert!(
        range.start <= range.end,
        "Contract violation: group range {}..{} is reversed",
        range.start,
        range.end
    );
    debug_assert!(
        range.end < first_level_len,
        "Contract violation: group range end {} has no closing record (first level len {})",
        range.end,
        first_level_len
    );
}

/// An entry range must lie inside the stored entries.
#[inline]
pub fn check_entry_range(range: &Range<usize>, entries: u64) {
    debug_assert!(
        range.start <= range.end,
        "Contract violation: entry range {}..{} is reversed",
        range.start,
        range.end
    );
    debug_assert!(
        range.end as u64 <= entries,
        "Contract violation: entry range end {} past {} entries",
        range.end,
        entries
    );
}
