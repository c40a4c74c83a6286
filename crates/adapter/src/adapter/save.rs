// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use policydb_rule::StoredRow;
use tracing::{debug, instrument};

use super::{Adapter, execute};
use crate::{PolicySource, Result, SECTIONS, query};

impl Adapter {
	/// Replaces the whole table with the rules of `source`.
	///
	/// Section `p` is written before `g`. The delete and every insert share one
	/// transaction, so a failing insert restores the previous rows. Returns the
	/// number of rows written.
	#[instrument(name = "adapter::save_policy", level = "debug", skip(self, source), fields(table = %self.table))]
	pub fn save_policy<S: PolicySource + ?Sized>(&self, source: &S) -> Result<usize> {
		let mut rows = Vec::new();
		for sec in SECTIONS {
			for (ptype, rules) in source.policies(sec) {
				for rule in rules {
					rows.push(StoredRow::encode(ptype, rule.as_slice())?);
				}
			}
		}

		self.sqlite.transaction(|tx| -> Result<usize> {
			let deleted = execute(tx, &query::delete_all(&self.table))?;
			for row in &rows {
				execute(tx, &query::insert(&self.table, row, false))?;
			}

			debug!(deleted, inserted = rows.len(), "policy saved");
			Ok(rows.len())
		})
	}
}
