// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Transaction;
use tracing::{instrument, trace, warn};

use crate::{DbPath, Result, SqliteConfig, SqliteError, connection::manager};

#[derive(Clone)]
pub struct Sqlite(Arc<SqliteInner>);

pub struct SqliteInner {
	pool: Pool<SqliteConnectionManager>,
	path: DbPath,
}

impl Deref for Sqlite {
	type Target = SqliteInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Sqlite {
	/// Opens a pool on the configured database, creating the database if it
	/// does not exist yet.
	#[instrument(name = "sqlite::new", level = "info", skip(config), fields(
		db_path = ?config.path,
		max_pool_size = config.max_pool_size,
		journal_mode = %config.journal_mode.as_str()
	))]
	pub fn new(config: SqliteConfig) -> Result<Self> {
		let manager = manager(&config)?;
		let pool = Pool::builder().max_size(config.max_pool_size).build(manager)?;

		Ok(Self(Arc::new(SqliteInner {
			pool,
			path: config.path,
		})))
	}

	/// A fresh in-memory database, for tests.
	pub fn in_memory() -> Result<Self> {
		Self::new(SqliteConfig::in_memory())
	}

	pub fn path(&self) -> &DbPath {
		&self.path
	}

	pub fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
		Ok(self.pool.get()?)
	}

	/// Runs `f` inside a transaction on a pooled connection.
	///
	/// The transaction commits when `f` returns `Ok` and rolls back otherwise,
	/// including when `f` panics. The error of `f` is returned unchanged.
	pub fn transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
	where
		F: FnOnce(&Transaction<'_>) -> std::result::Result<T, E>,
		E: From<SqliteError> + std::fmt::Display,
	{
		let mut conn = self.connection()?;
		let tx = conn.transaction().map_err(SqliteError::from)?;

		match f(&tx) {
			Ok(value) => {
				tx.commit().map_err(SqliteError::from)?;
				trace!("transaction committed");
				Ok(value)
			}
			Err(err) => {
				warn!(error = %err, "rolling back transaction");
				if let Err(rollback) = tx.rollback() {
					warn!(error = %rollback, "rollback failed");
				}
				Err(err)
			}
		}
	}

	/// Executes a batch of statements outside of any explicit transaction.
	pub fn execute_batch(&self, sql: &str) -> Result<()> {
		let conn = self.connection()?;
		conn.execute_batch(sql)?;
		Ok(())
	}
}
