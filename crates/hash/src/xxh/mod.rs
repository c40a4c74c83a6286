// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt;

use xxhash_rust::xxh3;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash64(pub u64);

impl Hash64 {
	/// Renders the digest as 16 lowercase hex digits, zero padded.
	pub fn to_hex(&self) -> String {
		format!("{:016x}", self.0)
	}
}

impl fmt::Display for Hash64 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:016x}", self.0)
	}
}

#[inline]
pub fn xxh3_64(data: &[u8]) -> Hash64 {
	Hash64(xxh3::xxh3_64(data))
}
