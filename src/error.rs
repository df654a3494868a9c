// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for construction, configuration, and persistence.
//!
//! Three things can go wrong, and they are kept apart on purpose:
//!
//! 1. **Configuration**: the bit widths don't add up (splitter + low > 64,
//!    a signature that is too wide, a combination id past the end). Caught
//!    before any entry is touched.
//! 2. **Construction invariants**: the boundary walk saw something the
//!    counting sort should have made impossible. The build fails loudly.
//! 3. **Persistence**: the stream ended early or the fields disagree with
//!    each other. The load fails and the previous state is kept.
//!
//! Queries never fail on a structure that was built or loaded successfully.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can fail in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration cannot describe a 64-bit split.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The construction pipeline broke one of its own invariants.
    #[error("construction invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    /// The input stream ended before `field` was fully read.
    #[error("stream truncated while reading {field}")]
    Truncated { field: &'static str },

    /// The stream decoded but its fields are inconsistent.
    #[error("malformed index stream: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}

/// Invariant violations detected while building the boundary structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A signature decreased inside a bucket during the boundary walk.
    #[error(
        "signature {current} follows {previous} in bucket {bucket} at position {position}"
    )]
    UnorderedSignature {
        bucket: u64,
        previous: u64,
        current: u64,
        position: usize,
    },

    /// A bucket id decreased during the boundary walk.
    #[error("bucket {current} follows bucket {previous} at position {position}")]
    UnorderedBucket {
        previous: u64,
        current: u64,
        position: usize,
    },
}
