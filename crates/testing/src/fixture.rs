// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Adapter fixtures and raw table inspection.

use policydb_adapter::{Adapter, AdapterOptions, Model, StoredRow, query};
use policydb_sqlite::{Sqlite, params_from_iter};

use crate::init_tracing;

/// An adapter on a fresh in-memory database with the default table.
pub fn memory_adapter() -> Adapter {
	memory_adapter_with(AdapterOptions::default())
}

pub fn memory_adapter_with(options: AdapterOptions) -> Adapter {
	init_tracing();
	let sqlite = Sqlite::in_memory().expect("in-memory database");
	Adapter::with_pool(sqlite, options).expect("adapter")
}

pub fn rule(tokens: &[&str]) -> Vec<String> {
	tokens.iter().map(|t| t.to_string()).collect()
}

pub fn rules(rules: &[&[&str]]) -> Vec<Vec<String>> {
	rules.iter().map(|tokens| rule(tokens)).collect()
}

/// Every stored row, sorted by policy type and tokens.
pub fn stored_rows(adapter: &Adapter) -> Vec<StoredRow> {
	let statement = query::select_all(adapter.table_name());
	let conn = adapter.sqlite().connection().expect("connection");
	let mut stmt = conn.prepare(&statement.sql).expect("prepare");
	let mut rows = stmt
		.query_map(params_from_iter(&statement.params), |row| {
			Ok(StoredRow::from_columns(
				row.get(0)?,
				row.get(1)?,
				[row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?, row.get(7)?],
			))
		})
		.expect("query")
		.collect::<Result<Vec<_>, _>>()
		.expect("rows");
	rows.sort_by(|a, b| (&a.ptype, &a.values).cmp(&(&b.ptype, &b.values)));
	rows
}

/// Every stored row rendered as a policy line, sorted.
pub fn stored_lines(adapter: &Adapter) -> Vec<String> {
	let mut lines: Vec<String> = stored_rows(adapter).iter().map(StoredRow::decode).collect();
	lines.sort();
	lines
}

pub fn row_count(adapter: &Adapter) -> usize {
	stored_rows(adapter).len()
}

/// Lines handed to a sink by a full load, sorted.
pub fn loaded_lines(adapter: &Adapter) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	adapter.load_policy(&mut lines).expect("load policy");
	lines.sort();
	lines
}

/// Makes every insert whose `column` equals `value` abort its statement.
pub fn fail_inserts_where(adapter: &Adapter, column: &str, value: &str) {
	let sql = format!(
		"CREATE TRIGGER fail_insert_{column} BEFORE INSERT ON {table} \
		 WHEN NEW.{column} = '{value}' \
		 BEGIN SELECT RAISE(ABORT, 'insert rejected by test trigger'); END;",
		table = query::quote_identifier(adapter.table_name()),
	);
	adapter.sqlite().execute_batch(&sql).expect("create trigger");
}

/// Makes every delete of a row whose `column` equals `value` abort its
/// statement.
pub fn fail_deletes_where(adapter: &Adapter, column: &str, value: &str) {
	let sql = format!(
		"CREATE TRIGGER fail_delete_{column} BEFORE DELETE ON {table} \
		 WHEN OLD.{column} = '{value}' \
		 BEGIN SELECT RAISE(ABORT, 'delete rejected by test trigger'); END;",
		table = query::quote_identifier(adapter.table_name()),
	);
	adapter.sqlite().execute_batch(&sql).expect("create trigger");
}

/// Policy types of the stored rows in insertion order.
pub fn ptypes_in_insert_order(adapter: &Adapter) -> Vec<String> {
	let sql = format!("SELECT ptype FROM {} ORDER BY rowid", query::quote_identifier(adapter.table_name()));
	let conn = adapter.sqlite().connection().expect("connection");
	let mut stmt = conn.prepare(&sql).expect("prepare");
	stmt.query_map([], |row| row.get(0)).expect("query").collect::<Result<Vec<String>, _>>().expect("rows")
}

/// A model holding the usual RBAC example rules.
pub fn rbac_model() -> Model {
	let mut model = Model::new();
	model.add_policy("p", "p", rule(&["alice", "data1", "read"]));
	model.add_policy("p", "p", rule(&["bob", "data2", "write"]));
	model.add_policy("p", "p", rule(&["data2_admin", "data2", "read"]));
	model.add_policy("p", "p", rule(&["data2_admin", "data2", "write"]));
	model.add_policy("g", "g", rule(&["alice", "data2_admin"]));
	model
}

/// The lines of [`rbac_model`], sorted.
pub fn rbac_lines() -> Vec<String> {
	let mut lines = vec![
		"g, alice, data2_admin".to_string(),
		"p, alice, data1, read".to_string(),
		"p, bob, data2, write".to_string(),
		"p, data2_admin, data2, read".to_string(),
		"p, data2_admin, data2, write".to_string(),
	];
	lines.sort();
	lines
}
