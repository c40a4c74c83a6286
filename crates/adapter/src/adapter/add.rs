// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use policydb_rule::StoredRow;
use tracing::instrument;

use super::{Adapter, execute};
use crate::{Result, query};

impl Adapter {
	/// Stores one rule. Storing a rule that is already present is a no-op.
	///
	/// Returns the number of rows written, 0 or 1.
	#[instrument(name = "adapter::add_policy", level = "debug", skip(self, rule), fields(table = %self.table, values = rule.len()))]
	pub fn add_policy<S: AsRef<str>>(&self, sec: &str, ptype: &str, rule: &[S]) -> Result<usize> {
		let row = StoredRow::encode(ptype, rule)?;
		self.sqlite.transaction(|tx| -> Result<usize> { execute(tx, &query::insert(&self.table, &row, true)) })
	}

	/// Stores several rules in one transaction, skipping those already
	/// present. Returns the number of rows written.
	#[instrument(name = "adapter::add_policies", level = "debug", skip(self, rules), fields(table = %self.table, count = rules.len()))]
	pub fn add_policies(&self, sec: &str, ptype: &str, rules: &[Vec<String>]) -> Result<usize> {
		let rows = rules
			.iter()
			.map(|rule| StoredRow::encode(ptype, rule.as_slice()))
			.collect::<policydb_rule::Result<Vec<_>>>()?;

		self.sqlite.transaction(|tx| -> Result<usize> {
			let mut added = 0;
			for row in &rows {
				added += execute(tx, &query::insert(&self.table, row, true))?;
			}
			Ok(added)
		})
	}
}
