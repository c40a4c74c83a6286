// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod add;
mod load;
mod remove;
mod save;
mod update;

use std::sync::atomic::{AtomicBool, Ordering};

use policydb_rule::{MAX_VALUES, StoredRow};
use policydb_sqlite::{
	Sqlite, SqliteConfig, params_from_iter,
	rusqlite::{self, Connection, Row},
};
use tracing::{debug, instrument, trace};

use crate::{
	AdapterOptions, DEFAULT_DATABASE_NAME, Error, Result,
	options::{parse_connection_string, validate_database_name},
	query::{self, Statement},
};

/// Stores policy rules in one table of a pooled SQLite database.
///
/// The adapter is `Send + Sync`; concurrent calls each take their own pooled
/// connection and transaction.
pub struct Adapter {
	sqlite: Sqlite,
	table: String,
	filtered: AtomicBool,
}

impl Adapter {
	/// Opens `database` (default [`DEFAULT_DATABASE_NAME`]) at the configured
	/// location, creating it if absent, and ensures the default table exists.
	#[instrument(name = "adapter::new", level = "info", skip(config), fields(db_path = ?config.path))]
	pub fn new(config: SqliteConfig, database: Option<&str>) -> Result<Self> {
		let database = database.unwrap_or(DEFAULT_DATABASE_NAME);
		validate_database_name(database)?;

		let sqlite = Sqlite::new(config.with_database(database))?;
		Self::with_pool(sqlite, AdapterOptions::default())
	}

	/// Like [`Adapter::new`], from a connection string.
	pub fn open(url: &str, database: Option<&str>) -> Result<Self> {
		Self::new(parse_connection_string(url)?, database)
	}

	/// Builds an adapter on an already open pool.
	#[instrument(name = "adapter::with_pool", level = "info", skip(sqlite), fields(db_path = ?sqlite.path()))]
	pub fn with_pool(sqlite: Sqlite, options: AdapterOptions) -> Result<Self> {
		options.validate()?;

		let adapter = Self {
			sqlite,
			table: options.table_name,
			filtered: AtomicBool::new(false),
		};

		if !options.skip_table_create {
			adapter.bootstrap()?;
		}

		Ok(adapter)
	}

	/// Creates the policy table unless it already exists.
	#[instrument(name = "adapter::bootstrap", level = "debug", skip(self), fields(table = %self.table))]
	pub fn bootstrap(&self) -> Result<()> {
		self.sqlite.execute_batch(&query::create_table(&self.table)).map_err(|source| Error::Bootstrap {
			table: self.table.clone(),
			source,
		})
	}

	pub fn table_name(&self) -> &str {
		&self.table
	}

	pub fn sqlite(&self) -> &Sqlite {
		&self.sqlite
	}

	/// Whether the most recent load was a filtered one.
	pub fn is_filtered(&self) -> bool {
		self.filtered.load(Ordering::Acquire)
	}

	fn set_filtered(&self, filtered: bool) {
		self.filtered.store(filtered, Ordering::Release);
	}

	/// Releases this adapter's handle on the pool. Connections close once no
	/// other clone of the pool is alive.
	pub fn close(self) {
		debug!(table = %self.table, "closing adapter");
	}
}

fn execute(conn: &Connection, statement: &Statement) -> Result<usize> {
	trace!(sql = %statement.sql, params = statement.params.len(), "execute");
	Ok(conn.execute(&statement.sql, params_from_iter(&statement.params))?)
}

fn query_rows(conn: &Connection, statement: &Statement) -> Result<Vec<StoredRow>> {
	trace!(sql = %statement.sql, params = statement.params.len(), "query");
	let mut stmt = conn.prepare(&statement.sql)?;
	let rows = stmt.query_map(params_from_iter(&statement.params), scan_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
	Ok(rows)
}

fn scan_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
	let mut columns: [Option<String>; MAX_VALUES] = Default::default();
	for (i, column) in columns.iter_mut().enumerate() {
		*column = row.get(i + 2)?;
	}
	Ok(StoredRow::from_columns(row.get(0)?, row.get(1)?, columns))
}
