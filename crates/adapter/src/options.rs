// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use policydb_sqlite::SqliteConfig;

use crate::{Error, Result};

pub const DEFAULT_TABLE_NAME: &str = "casbin_rules";
pub const DEFAULT_DATABASE_NAME: &str = "casbin";

/// Options for an adapter built on an existing pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
	pub table_name: String,
	pub skip_table_create: bool,
}

impl Default for AdapterOptions {
	fn default() -> Self {
		Self {
			table_name: DEFAULT_TABLE_NAME.to_string(),
			skip_table_create: false,
		}
	}
}

impl AdapterOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
		self.table_name = table_name.into();
		self
	}

	/// Skips `CREATE TABLE IF NOT EXISTS` on construction. The caller
	/// guarantees the table exists; every operation fails otherwise.
	pub fn skip_table_create(mut self) -> Self {
		self.skip_table_create = true;
		self
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.table_name.trim().is_empty() {
			return Err(Error::Configuration("table name must not be empty".to_string()));
		}
		Ok(())
	}
}

/// Parses a connection string into a pool configuration.
///
/// Accepted forms:
///
/// ```text
/// :memory:                 fresh in-memory database
/// memory:<name>            named in-memory database
/// sqlite://<path>          database file or directory
/// file:<path>              database file or directory
/// <path>                   database file or directory
/// ```
pub fn parse_connection_string(url: &str) -> Result<SqliteConfig> {
	let url = url.trim();
	if url.is_empty() {
		return Err(Error::Configuration("connection string must not be empty".to_string()));
	}

	if url == ":memory:" {
		return Ok(SqliteConfig::in_memory());
	}

	if let Some(name) = url.strip_prefix("memory:") {
		return non_empty(name, url).map(SqliteConfig::memory);
	}

	if let Some(path) = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("file:")) {
		return non_empty(path, url).map(SqliteConfig::new);
	}

	if let Some((scheme, _)) = url.split_once("://") {
		return Err(Error::Configuration(format!(
			"unsupported connection string scheme '{scheme}', expected sqlite://, file:, memory: or a path"
		)));
	}

	Ok(SqliteConfig::new(url))
}

/// Rejects database names that cannot become a single file name.
pub(crate) fn validate_database_name(name: &str) -> Result<()> {
	if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
		return Err(Error::Configuration(format!("invalid database name '{name}'")));
	}
	Ok(())
}

fn non_empty<'a>(value: &'a str, url: &str) -> Result<&'a str> {
	if value.is_empty() {
		return Err(Error::Configuration(format!("connection string '{url}' names no database")));
	}
	Ok(value)
}
