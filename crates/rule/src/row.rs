// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt;

use policydb_hash::xxh3_64;

use crate::{IDENTITY_SEPARATOR, LINE_SEPARATOR, MAX_VALUES, Result, RuleError};

/// Derives the identity of a rule.
///
/// The policy type and tokens are joined with `,` and hashed with xxh3-64. The
/// identity is rendered as 16 lowercase hex digits and is stable across
/// processes and platforms.
pub fn compute_identity<S: AsRef<str>>(ptype: &str, rule: &[S]) -> String {
	let mut data = String::with_capacity(ptype.len() + rule.iter().map(|t| t.as_ref().len() + 1).sum::<usize>());
	data.push_str(ptype);
	for token in rule {
		data.push(IDENTITY_SEPARATOR);
		data.push_str(token.as_ref());
	}
	xxh3_64(data.as_bytes()).to_hex()
}

/// The persisted form of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StoredRow {
	pub id: String,
	pub ptype: String,
	pub values: [String; MAX_VALUES],
}

impl StoredRow {
	/// Maps a rule onto the fixed slots and attaches its identity.
	pub fn encode<S: AsRef<str>>(ptype: &str, rule: &[S]) -> Result<Self> {
		if rule.len() > MAX_VALUES {
			return Err(RuleError::TooManyValues {
				ptype: ptype.to_string(),
				count: rule.len(),
			});
		}

		let mut values: [String; MAX_VALUES] = Default::default();
		for (slot, token) in values.iter_mut().zip(rule) {
			*slot = token.as_ref().to_string();
		}

		Ok(Self {
			id: compute_identity(ptype, rule),
			ptype: ptype.to_string(),
			values,
		})
	}

	/// Builds a row from database columns. NULL columns become empty slots.
	pub fn from_columns(id: String, ptype: String, columns: [Option<String>; MAX_VALUES]) -> Self {
		Self {
			id,
			ptype,
			values: columns.map(Option::unwrap_or_default),
		}
	}

	/// Renders the row as a policy line, e.g. `p, alice, data1, read`.
	pub fn decode(&self) -> String {
		self.to_string()
	}

	/// Non-empty tokens in position order.
	pub fn to_tokens(&self) -> Vec<String> {
		self.values.iter().filter(|v| !v.is_empty()).cloned().collect()
	}

	/// Policy type followed by the non-empty tokens.
	pub fn to_policy(&self) -> Vec<String> {
		let mut policy = Vec::with_capacity(MAX_VALUES + 1);
		if !self.ptype.is_empty() {
			policy.push(self.ptype.clone());
		}
		policy.extend(self.to_tokens());
		policy
	}

	pub fn value(&self, position: usize) -> Option<&str> {
		self.values.get(position).map(String::as_str)
	}
}

impl fmt::Display for StoredRow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.ptype)?;
		for value in self.values.iter().filter(|v| !v.is_empty()) {
			f.write_str(LINE_SEPARATOR)?;
			f.write_str(value)?;
		}
		Ok(())
	}
}
