// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Rule-row codec.
//!
//! A rule is a policy type plus up to [`MAX_VALUES`] ordered tokens. On disk it
//! becomes a [`StoredRow`]: an identity derived from the rule, the policy type
//! and six token slots where the empty string stands for an absent token.
//!
//! ```text
//! ("p", ["alice", "data1", "read"])
//!     -> id=<xxh3 hex> ptype=p v0=alice v1=data1 v2=read v3= v4= v5=
//!     -> "p, alice, data1, read"
//! ```

mod error;
mod filter;
mod row;

pub use error::RuleError;
pub use filter::{FieldFilter, Filter};
pub use row::{StoredRow, compute_identity};

pub type Result<T> = std::result::Result<T, RuleError>;

/// Number of token slots of a stored row.
pub const MAX_VALUES: usize = 6;

/// Token slot column names, in position order.
pub const VALUE_COLUMNS: [&str; MAX_VALUES] = ["v0", "v1", "v2", "v3", "v4", "v5"];

/// Separator used when rendering a row as a policy line.
pub const LINE_SEPARATOR: &str = ", ";

/// Separator used when joining a rule for hashing.
pub const IDENTITY_SEPARATOR: char = ',';
