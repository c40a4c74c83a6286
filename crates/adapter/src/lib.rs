// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Persists access-control policy rules in a SQLite table.
//!
//! Every rule becomes one row keyed by a hash of its policy type and tokens,
//! so adding a rule twice stores it once. Batch mutations run in a single
//! transaction and leave no trace when any statement fails.
//!
//! ```ignore
//! use policydb_adapter::{Adapter, Filter, Model};
//!
//! let adapter = Adapter::open("/var/lib/policy", None)?;
//! adapter.add_policy("p", "p", &["alice", "data1", "read"])?;
//!
//! let mut model = Model::new();
//! adapter.load_filtered_policy(&mut model, Some(&Filter::new().with_p(["alice"])))?;
//! assert!(adapter.is_filtered());
//! ```

mod adapter;
mod error;
mod model;
mod options;
pub mod query;

pub use adapter::Adapter;
pub use error::Error;
pub use model::{Model, PolicySink, PolicySource, SECTIONS};
pub use options::{AdapterOptions, DEFAULT_DATABASE_NAME, DEFAULT_TABLE_NAME, parse_connection_string};
pub use policydb_rule::{FieldFilter, Filter, MAX_VALUES, RuleError, StoredRow, compute_identity};
pub use policydb_sqlite::{DbPath, Sqlite, SqliteConfig, SqliteError};

pub type Result<T> = std::result::Result<T, Error>;
