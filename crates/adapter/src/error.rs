// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use policydb_rule::RuleError;
use policydb_sqlite::{SqliteError, rusqlite};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid configuration: {0}")]
	Configuration(String),

	#[error("failed to create policy table {table}: {source}")]
	Bootstrap {
		table: String,
		#[source]
		source: SqliteError,
	},

	#[error(transparent)]
	Sqlite(#[from] SqliteError),

	#[error(transparent)]
	Rule(#[from] RuleError),

	#[error("update needs one new rule per old rule, got {old} old and {new} new")]
	MismatchedUpdate {
		old: usize,
		new: usize,
	},

	#[error("invalid policy line '{line}': {reason}")]
	Model {
		line: String,
		reason: String,
	},
}

impl From<rusqlite::Error> for Error {
	fn from(err: rusqlite::Error) -> Self {
		Error::Sqlite(SqliteError::from(err))
	}
}
