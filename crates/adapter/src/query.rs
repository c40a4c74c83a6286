// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQL rendering for the policy table.
//!
//! Nothing in here touches a connection. Statements are rendered with numbered
//! `?N` placeholders and carry their parameters in placeholder order.

use policydb_rule::{StoredRow, VALUE_COLUMNS};

const COLUMNS: &str = "id, ptype, v0, v1, v2, v3, v4, v5";

/// A rendered statement and its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
	pub sql: String,
	pub params: Vec<String>,
}

/// Equality conditions on the policy table, in column order.
///
/// `ptype` is always constrained. Value columns are constrained only where the
/// source row holds a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditions<'a> {
	pairs: Vec<(&'static str, &'a str)>,
}

impl<'a> Conditions<'a> {
	pub fn matching(row: &'a StoredRow) -> Self {
		let mut pairs = Vec::with_capacity(VALUE_COLUMNS.len() + 1);
		pairs.push(("ptype", row.ptype.as_str()));
		for (column, value) in VALUE_COLUMNS.iter().zip(&row.values) {
			if !value.is_empty() {
				pairs.push((*column, value.as_str()));
			}
		}
		Self {
			pairs,
		}
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Renders `col = ?N AND ...` with placeholders numbered from `first`.
	pub fn render(&self, first: usize) -> (String, Vec<String>) {
		let sql = self
			.pairs
			.iter()
			.enumerate()
			.map(|(i, (column, _))| format!("{column} = ?{}", first + i))
			.collect::<Vec<_>>()
			.join(" AND ");
		let params = self.pairs.iter().map(|(_, value)| value.to_string()).collect();
		(sql, params)
	}
}

/// Quotes a table name for use as an SQL identifier.
pub fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn create_table(table: &str) -> String {
	format!(
		"CREATE TABLE IF NOT EXISTS {} (
			id TEXT PRIMARY KEY,
			ptype TEXT NOT NULL,
			v0 TEXT,
			v1 TEXT,
			v2 TEXT,
			v3 TEXT,
			v4 TEXT,
			v5 TEXT
		)",
		quote_identifier(table)
	)
}

pub fn select_all(table: &str) -> Statement {
	Statement {
		sql: format!("SELECT {COLUMNS} FROM {}", quote_identifier(table)),
		params: Vec::new(),
	}
}

pub fn select_where(table: &str, conditions: &Conditions<'_>) -> Statement {
	let (clause, params) = conditions.render(1);
	Statement {
		sql: format!("SELECT {COLUMNS} FROM {} WHERE {clause}", quote_identifier(table)),
		params,
	}
}

/// Inserts a full row. With `ignore_conflicts` an existing identity is left
/// untouched instead of failing the statement.
pub fn insert(table: &str, row: &StoredRow, ignore_conflicts: bool) -> Statement {
	let conflict = if ignore_conflicts {
		" ON CONFLICT DO NOTHING"
	} else {
		""
	};
	Statement {
		sql: format!(
			"INSERT INTO {} ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8){conflict}",
			quote_identifier(table)
		),
		params: row_params(row),
	}
}

pub fn delete_all(table: &str) -> Statement {
	Statement {
		sql: format!("DELETE FROM {}", quote_identifier(table)),
		params: Vec::new(),
	}
}

pub fn delete_by_id(table: &str, id: &str) -> Statement {
	Statement {
		sql: format!("DELETE FROM {} WHERE id = ?1", quote_identifier(table)),
		params: vec![id.to_string()],
	}
}

/// Deletes matching rows. With `returning` the deleted rows are produced as a
/// result set with the same column layout as a select.
pub fn delete_where(table: &str, conditions: &Conditions<'_>, returning: bool) -> Statement {
	let (clause, params) = conditions.render(1);
	let returning = if returning {
		format!(" RETURNING {COLUMNS}")
	} else {
		String::new()
	};
	Statement {
		sql: format!("DELETE FROM {} WHERE {clause}{returning}", quote_identifier(table)),
		params,
	}
}

/// Overwrites every column of the rows matching `conditions` with `row`.
pub fn update_where(table: &str, row: &StoredRow, conditions: &Conditions<'_>) -> Statement {
	let mut params = row_params(row);
	let (clause, condition_params) = conditions.render(params.len() + 1);
	params.extend(condition_params);
	Statement {
		sql: format!(
			"UPDATE {} SET id = ?1, ptype = ?2, v0 = ?3, v1 = ?4, v2 = ?5, v3 = ?6, v4 = ?7, v5 = ?8 WHERE {clause}",
			quote_identifier(table)
		),
		params,
	}
}

fn row_params(row: &StoredRow) -> Vec<String> {
	let mut params = Vec::with_capacity(2 + row.values.len());
	params.push(row.id.clone());
	params.push(row.ptype.clone());
	params.extend(row.values.iter().cloned());
	params
}

#[cfg(test)]
mod tests {
	use policydb_rule::{FieldFilter, Filter};

	use super::*;

	fn row(ptype: &str, values: &[&str]) -> StoredRow {
		StoredRow::encode(ptype, values).unwrap()
	}

	mod conditions {
		use super::*;

		#[test]
		fn test_ptype_only() {
			let row = row("p", &[]);
			let (sql, params) = Conditions::matching(&row).render(1);
			assert_eq!(sql, "ptype = ?1");
			assert_eq!(params, vec!["p"]);
		}

		#[test]
		fn test_skips_empty_values() {
			let row = row("p", &["alice", "", "read"]);
			let (sql, params) = Conditions::matching(&row).render(1);
			assert_eq!(sql, "ptype = ?1 AND v0 = ?2 AND v2 = ?3");
			assert_eq!(params, vec!["p", "alice", "read"]);
		}

		#[test]
		fn test_numbering_offset() {
			let row = row("g", &["alice", "admin"]);
			let (sql, _) = Conditions::matching(&row).render(9);
			assert_eq!(sql, "ptype = ?9 AND v0 = ?10 AND v1 = ?11");
		}

		#[test]
		fn test_field_filter_offset() {
			let row = FieldFilter::new("p", 1, ["", "admin"]).to_row().unwrap();
			let conditions = Conditions::matching(&row);
			assert_eq!(conditions.len(), 2);
			let (sql, params) = conditions.render(1);
			assert_eq!(sql, "ptype = ?1 AND v2 = ?2");
			assert_eq!(params, vec!["p", "admin"]);
		}

		#[test]
		fn test_filter_group() {
			let values = vec!["".to_string(), "".to_string(), "".to_string(), "".to_string(), "".to_string(), "x".to_string()];
			let row = Filter::group_row("g", &values).unwrap();
			let (sql, params) = Conditions::matching(&row).render(1);
			assert_eq!(sql, "ptype = ?1 AND v5 = ?2");
			assert_eq!(params, vec!["g", "x"]);
		}
	}

	mod statements {
		use super::*;

		#[test]
		fn test_quote_identifier() {
			assert_eq!(quote_identifier("casbin_rules"), "\"casbin_rules\"");
			assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
		}

		#[test]
		fn test_select_all() {
			let statement = select_all("rules");
			assert_eq!(statement.sql, "SELECT id, ptype, v0, v1, v2, v3, v4, v5 FROM \"rules\"");
			assert!(statement.params.is_empty());
		}

		#[test]
		fn test_insert_ignore() {
			let row = row("p", &["alice", "data1", "read"]);
			let statement = insert("rules", &row, true);
			assert!(statement.sql.ends_with("ON CONFLICT DO NOTHING"));
			assert_eq!(statement.params.len(), 8);
			assert_eq!(statement.params[0], row.id);
			assert_eq!(&statement.params[1..5], &["p", "alice", "data1", "read"]);
			assert_eq!(&statement.params[5..], &["", "", ""]);
		}

		#[test]
		fn test_insert_strict() {
			let statement = insert("rules", &row("p", &["alice"]), false);
			assert!(!statement.sql.contains("CONFLICT"));
		}

		#[test]
		fn test_delete_where_returning() {
			let row = row("p", &["alice"]);
			let statement = delete_where("rules", &Conditions::matching(&row), true);
			assert_eq!(
				statement.sql,
				"DELETE FROM \"rules\" WHERE ptype = ?1 AND v0 = ?2 RETURNING id, ptype, v0, v1, v2, v3, v4, v5"
			);
			assert_eq!(statement.params, vec!["p", "alice"]);
		}

		#[test]
		fn test_update_where() {
			let old = row("p", &["alice", "data1", "read"]);
			let new = row("p", &["alice", "data1", "write"]);
			let statement = update_where("rules", &new, &Conditions::matching(&old));
			assert!(statement.sql.ends_with("WHERE ptype = ?9 AND v0 = ?10 AND v1 = ?11 AND v2 = ?12"));
			assert_eq!(statement.params.len(), 12);
			assert_eq!(statement.params[0], new.id);
			assert_eq!(statement.params[4], "write");
			assert_eq!(statement.params[11], "read");
		}
	}
}
