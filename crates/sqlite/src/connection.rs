// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Connection manager construction.

use std::fs;

use r2d2_sqlite::SqliteConnectionManager;

use crate::{DbPath, OpenFlags, Result, SqliteConfig, SqliteError};

/// Builds the r2d2 manager for the configured database.
///
/// Every new pooled connection runs the configured pragmas before it is handed
/// out. Missing parent directories of a database file are created.
pub(crate) fn manager(config: &SqliteConfig) -> Result<SqliteConnectionManager> {
	let flags = convert_flags(&config.flags);

	let manager = match &config.path {
		DbPath::File(path) => {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				fs::create_dir_all(parent).map_err(|source| SqliteError::Directory {
					path: parent.to_path_buf(),
					source,
				})?;
			}
			SqliteConnectionManager::file(path)
		}
		DbPath::Memory(name) => SqliteConnectionManager::file(memory_uri(name)),
	};

	let journal_mode = config.journal_mode.as_str();
	let synchronous_mode = config.synchronous_mode.as_str();
	let temp_store = config.temp_store.as_str();
	let busy_timeout = config.busy_timeout;

	Ok(manager.with_flags(flags).with_init(move |conn| {
		conn.busy_timeout(busy_timeout)?;
		conn.pragma_update(None, "journal_mode", journal_mode)?;
		conn.pragma_update(None, "synchronous", synchronous_mode)?;
		conn.pragma_update(None, "temp_store", temp_store)?;
		Ok(())
	}))
}

/// Shared-cache URI of a named memory database. The name is percent-encoded so
/// `?`, `#` or `%` in it cannot end the path early.
fn memory_uri(name: &str) -> String {
	format!("file:{}?mode=memory&cache=shared", urlencoding::encode(name))
}

pub(crate) fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut rusqlite_flags = rusqlite::OpenFlags::empty();

	if flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	}
	if flags.create {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	rusqlite_flags
}
