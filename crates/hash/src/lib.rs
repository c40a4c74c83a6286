// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hash types and functions for policydb.
//!
//! Row identities are derived from xxHash3, a non-cryptographic hash that is
//! stable across runs and platforms.

mod xxh;

pub use xxh::{Hash64, xxh3_64};
