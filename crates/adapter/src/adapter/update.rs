// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use policydb_rule::StoredRow;
use tracing::{debug, instrument};

use super::{Adapter, execute, query_rows, remove::field_filter_row};
use crate::{
	Error, Result,
	query::{self, Conditions},
};

impl Adapter {
	/// Rewrites the rows matching `old_rule` to `new_rule`.
	///
	/// A row matches when it agrees with every non-empty token of `old_rule`.
	/// No match is not an error. Returns the number of rows rewritten.
	#[instrument(name = "adapter::update_policy", level = "debug", skip(self, old_rule, new_rule), fields(table = %self.table))]
	pub fn update_policy<S: AsRef<str>>(&self, sec: &str, ptype: &str, old_rule: &[S], new_rule: &[S]) -> Result<usize> {
		let old = StoredRow::encode(ptype, old_rule)?;
		let new = StoredRow::encode(ptype, new_rule)?;
		self.update_rows(&[old], &[new])
	}

	/// Rewrites rows pairwise: the rows matching `old_rules[i]` become
	/// `new_rules[i]`, all in one transaction.
	#[instrument(name = "adapter::update_policies", level = "debug", skip(self, old_rules, new_rules), fields(table = %self.table, count = old_rules.len()))]
	pub fn update_policies(
		&self,
		sec: &str,
		ptype: &str,
		old_rules: &[Vec<String>],
		new_rules: &[Vec<String>],
	) -> Result<usize> {
		if old_rules.len() != new_rules.len() {
			return Err(Error::MismatchedUpdate {
				old: old_rules.len(),
				new: new_rules.len(),
			});
		}

		let old = encode_all(ptype, old_rules)?;
		let new = encode_all(ptype, new_rules)?;
		self.update_rows(&old, &new)
	}

	/// Replaces the rules selected by a field filter with `new_rules`.
	///
	/// For each new rule, every row matching the filter is deleted and the new
	/// rule is inserted unless already present. The filter is the same for
	/// every new rule. Returns the tokens of the deleted rows that existed
	/// before the call.
	#[instrument(name = "adapter::update_filtered_policies", level = "debug", skip(self, new_rules, field_values), fields(table = %self.table, count = new_rules.len()))]
	pub fn update_filtered_policies<S: AsRef<str>>(
		&self,
		sec: &str,
		ptype: &str,
		new_rules: &[Vec<String>],
		field_index: usize,
		field_values: &[S],
	) -> Result<Vec<Vec<String>>> {
		let constraint = field_filter_row(ptype, field_index, field_values)?;
		let conditions = Conditions::matching(&constraint);
		let rows = encode_all(ptype, new_rules)?;

		let removed = self.sqlite.transaction(|tx| -> Result<Vec<Vec<String>>> {
			let mut inserted = HashSet::new();
			let mut removed = Vec::new();

			for row in &rows {
				let deleted = query_rows(tx, &query::delete_where(&self.table, &conditions, true))?;
				removed.extend(deleted.into_iter().filter(|old| !inserted.contains(&old.id)).map(|old| old.to_tokens()));

				if execute(tx, &query::insert(&self.table, row, true))? > 0 {
					inserted.insert(row.id.clone());
				}
			}

			Ok(removed)
		})?;

		debug!(removed = removed.len(), inserted = rows.len(), "filtered policy updated");
		Ok(removed)
	}

	fn update_rows(&self, old: &[StoredRow], new: &[StoredRow]) -> Result<usize> {
		self.sqlite.transaction(|tx| -> Result<usize> {
			let mut updated = 0;
			for (old, new) in old.iter().zip(new) {
				updated += execute(tx, &query::update_where(&self.table, new, &Conditions::matching(old)))?;
			}
			debug!(updated, "policy updated");
			Ok(updated)
		})
	}
}

fn encode_all(ptype: &str, rules: &[Vec<String>]) -> Result<Vec<StoredRow>> {
	Ok(rules.iter().map(|rule| StoredRow::encode(ptype, rule.as_slice())).collect::<policydb_rule::Result<Vec<_>>>()?)
}
