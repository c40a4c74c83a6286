// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, time::Duration};

use uuid::Uuid;

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbPath {
	/// A database file, or a directory holding one file per database name.
	File(PathBuf),
	/// A named in-memory database shared by every connection of the pool.
	Memory(String),
}

impl DbPath {
	/// Resolves the location of the named database.
	///
	/// A directory (a path without extension) holds `<name>.db`; a file path has
	/// its file name replaced by `<name>.db`. Memory databases get the name
	/// appended so distinct names never share data.
	pub fn with_database(&self, name: &str) -> DbPath {
		match self {
			DbPath::File(path) if path.extension().is_none() => DbPath::File(path.join(format!("{name}.db"))),
			DbPath::File(path) => DbPath::File(path.with_file_name(format!("{name}.db"))),
			DbPath::Memory(base) => DbPath::Memory(format!("{base}_{name}")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
	Delete,
	Truncate,
	Persist,
	Memory,
	Wal,
	Off,
}

impl JournalMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			JournalMode::Delete => "DELETE",
			JournalMode::Truncate => "TRUNCATE",
			JournalMode::Persist => "PERSIST",
			JournalMode::Memory => "MEMORY",
			JournalMode::Wal => "WAL",
			JournalMode::Off => "OFF",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynchronousMode {
	Off,
	Normal,
	Full,
	Extra,
}

impl SynchronousMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SynchronousMode::Off => "OFF",
			SynchronousMode::Normal => "NORMAL",
			SynchronousMode::Full => "FULL",
			SynchronousMode::Extra => "EXTRA",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempStore {
	Default,
	File,
	Memory,
}

impl TempStore {
	pub fn as_str(&self) -> &'static str {
		match self {
			TempStore::Default => "DEFAULT",
			TempStore::File => "FILE",
			TempStore::Memory => "MEMORY",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFlags {
	pub read_write: bool,
	pub create: bool,
	pub full_mutex: bool,
	pub no_mutex: bool,
	pub shared_cache: bool,
	pub private_cache: bool,
	pub uri: bool,
}

impl Default for OpenFlags {
	fn default() -> Self {
		Self {
			read_write: true,
			create: true,
			full_mutex: false,
			no_mutex: true,
			shared_cache: false,
			private_cache: false,
			uri: false,
		}
	}
}

/// Configuration of the SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
	pub path: DbPath,
	pub flags: OpenFlags,
	pub max_pool_size: u32,
	pub journal_mode: JournalMode,
	pub synchronous_mode: SynchronousMode,
	pub temp_store: TempStore,
	pub busy_timeout: Duration,
}

impl SqliteConfig {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: DbPath::File(path.into()),
			flags: OpenFlags::default(),
			max_pool_size: 8,
			journal_mode: JournalMode::Wal,
			synchronous_mode: SynchronousMode::Normal,
			temp_store: TempStore::Memory,
			busy_timeout: Duration::from_secs(5),
		}
	}

	/// Durability over speed.
	pub fn safe(path: impl Into<PathBuf>) -> Self {
		Self {
			synchronous_mode: SynchronousMode::Full,
			..Self::new(path)
		}
	}

	/// Speed over durability.
	pub fn fast(path: impl Into<PathBuf>) -> Self {
		Self {
			synchronous_mode: SynchronousMode::Off,
			..Self::new(path)
		}
	}

	/// A fresh in-memory database, unique to this configuration.
	pub fn in_memory() -> Self {
		Self::memory(format!("policydb_{}", Uuid::new_v4().simple()))
	}

	/// A named in-memory database. Pools opened with the same name share data.
	pub fn memory(name: impl Into<String>) -> Self {
		Self {
			path: DbPath::Memory(name.into()),
			flags: OpenFlags {
				uri: true,
				..OpenFlags::default()
			},
			max_pool_size: 4,
			journal_mode: JournalMode::Memory,
			synchronous_mode: SynchronousMode::Off,
			temp_store: TempStore::Memory,
			busy_timeout: Duration::from_secs(5),
		}
	}

	pub fn with_database(mut self, name: &str) -> Self {
		self.path = self.path.with_database(name);
		self
	}

	pub fn max_pool_size(mut self, size: u32) -> Self {
		self.max_pool_size = size;
		self
	}

	pub fn journal_mode(mut self, mode: JournalMode) -> Self {
		self.journal_mode = mode;
		self
	}

	pub fn synchronous_mode(mut self, mode: SynchronousMode) -> Self {
		self.synchronous_mode = mode;
		self
	}

	pub fn temp_store(mut self, store: TempStore) -> Self {
		self.temp_store = store;
		self
	}

	pub fn busy_timeout(mut self, timeout: Duration) -> Self {
		self.busy_timeout = timeout;
		self
	}
}
