// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pooled SQLite access.
//!
//! [`Sqlite`] owns an r2d2 pool of rusqlite connections and hands out scoped
//! transactions that commit only when the closure succeeds.

mod config;
mod connection;
mod error;
mod pool;

pub use config::{DbPath, JournalMode, OpenFlags, SqliteConfig, SynchronousMode, TempStore};
pub use error::SqliteError;
pub use pool::Sqlite;
pub use rusqlite::{self, params_from_iter};

pub type Result<T> = std::result::Result<T, SqliteError>;
