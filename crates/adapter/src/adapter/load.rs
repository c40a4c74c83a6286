// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use policydb_rule::{Filter, StoredRow};
use tracing::{debug, instrument};

use super::{Adapter, query_rows};
use crate::{
	PolicySink, Result,
	query::{self, Conditions},
};

impl Adapter {
	/// Hands every stored rule to `sink`, one policy line per row.
	///
	/// Rows come back in no particular order. Clears the filtered flag.
	#[instrument(name = "adapter::load_policy", level = "debug", skip(self, sink), fields(table = %self.table))]
	pub fn load_policy<S: PolicySink + ?Sized>(&self, sink: &mut S) -> Result<()> {
		let rows = {
			let conn = self.sqlite.connection()?;
			query_rows(&conn, &query::select_all(&self.table))?
		};

		dispatch(sink, &rows)?;
		self.set_filtered(false);

		debug!(rows = rows.len(), "policy loaded");
		Ok(())
	}

	/// Hands the rules matching `filter` to `sink`.
	///
	/// Without a filter this is [`Adapter::load_policy`]. Otherwise every
	/// present group is queried on its own policy type, `p` before `g`, inside
	/// one read transaction. Sets the filtered flag.
	#[instrument(name = "adapter::load_filtered_policy", level = "debug", skip(self, sink), fields(table = %self.table))]
	pub fn load_filtered_policy<S: PolicySink + ?Sized>(&self, sink: &mut S, filter: Option<&Filter>) -> Result<()> {
		let Some(filter) = filter else {
			return self.load_policy(sink);
		};
		filter.validate()?;

		let constraints = filter
			.groups()
			.map(|(ptype, values)| Filter::group_row(ptype, values))
			.collect::<policydb_rule::Result<Vec<_>>>()?;

		let rows = self.sqlite.transaction(|tx| -> Result<Vec<StoredRow>> {
			let mut rows = Vec::new();
			for constraint in &constraints {
				let statement = query::select_where(&self.table, &Conditions::matching(constraint));
				rows.extend(query_rows(tx, &statement)?);
			}
			Ok(rows)
		})?;

		dispatch(sink, &rows)?;
		self.set_filtered(true);

		debug!(rows = rows.len(), groups = constraints.len(), "filtered policy loaded");
		Ok(())
	}
}

fn dispatch<S: PolicySink + ?Sized>(sink: &mut S, rows: &[StoredRow]) -> Result<()> {
	for row in rows {
		sink.load_policy_line(&row.decode())?;
	}
	Ok(())
}
