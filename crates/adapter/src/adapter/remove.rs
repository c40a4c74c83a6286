// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use policydb_rule::{FieldFilter, StoredRow, compute_identity};
use tracing::{debug, instrument};

use super::{Adapter, execute};
use crate::{
	Result,
	query::{self, Conditions},
};

impl Adapter {
	/// Deletes one rule by identity. Deleting an absent rule is not an error.
	///
	/// Returns the number of rows deleted, 0 or 1.
	#[instrument(name = "adapter::remove_policy", level = "debug", skip(self, rule), fields(table = %self.table, values = rule.len()))]
	pub fn remove_policy<S: AsRef<str>>(&self, sec: &str, ptype: &str, rule: &[S]) -> Result<usize> {
		let id = compute_identity(ptype, rule);
		self.sqlite.transaction(|tx| -> Result<usize> { execute(tx, &query::delete_by_id(&self.table, &id)) })
	}

	/// Deletes several rules in one transaction.
	#[instrument(name = "adapter::remove_policies", level = "debug", skip(self, rules), fields(table = %self.table, count = rules.len()))]
	pub fn remove_policies(&self, sec: &str, ptype: &str, rules: &[Vec<String>]) -> Result<usize> {
		let ids = rules.iter().map(|rule| compute_identity(ptype, rule.as_slice())).collect::<Vec<_>>();

		self.sqlite.transaction(|tx| -> Result<usize> {
			let mut removed = 0;
			for id in &ids {
				removed += execute(tx, &query::delete_by_id(&self.table, id))?;
			}
			Ok(removed)
		})
	}

	/// Deletes every rule of `ptype` whose token at `field_index + i` equals
	/// `field_values[i]`. Empty values match anything; no values at all deletes
	/// every rule of `ptype`.
	#[instrument(name = "adapter::remove_filtered_policy", level = "debug", skip(self, field_values), fields(table = %self.table, values = field_values.len()))]
	pub fn remove_filtered_policy<S: AsRef<str>>(
		&self,
		sec: &str,
		ptype: &str,
		field_index: usize,
		field_values: &[S],
	) -> Result<usize> {
		let constraint = field_filter_row(ptype, field_index, field_values)?;
		let conditions = Conditions::matching(&constraint);

		let removed = self.sqlite.transaction(|tx| -> Result<usize> {
			execute(tx, &query::delete_where(&self.table, &conditions, false))
		})?;

		debug!(removed, "filtered policy removed");
		Ok(removed)
	}
}

pub(super) fn field_filter_row<S: AsRef<str>>(ptype: &str, field_index: usize, field_values: &[S]) -> Result<StoredRow> {
	let values: Vec<&str> = field_values.iter().map(|v| v.as_ref()).collect();
	Ok(FieldFilter::new(ptype, field_index, values).to_row()?)
}
