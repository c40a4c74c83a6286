// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqliteError {
	#[error("sqlite error: {0}")]
	Sqlite(#[from] rusqlite::Error),

	#[error("connection pool error: {0}")]
	Pool(#[from] r2d2::Error),

	#[error("failed to prepare database directory {path}: {source}")]
	Directory {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}
