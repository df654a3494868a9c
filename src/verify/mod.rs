// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Load-time validation** (in `index`) that rejects any stream whose
//!    fields disagree with each other, so a loaded copy is as well-formed as
//!    a freshly built one.
//!
//! 2. **Runtime contracts** that panic in debug builds when a range derived
//!    from the boundary structure escapes its array. Zero-cost in release.

pub mod contracts;
