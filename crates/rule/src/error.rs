// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use thiserror::Error;

use crate::MAX_VALUES;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
	#[error("too many values for policy type '{ptype}': got {count}, at most {MAX_VALUES} are supported")]
	TooManyValues {
		ptype: String,
		count: usize,
	},

	#[error(
		"filter has more values than expected for policy type '{ptype}', should not exceed {MAX_VALUES} values (got {count})"
	)]
	FilterTooWide {
		ptype: String,
		count: usize,
	},

	#[error("field filter on '{ptype}' constrains position {position}, rows only have {MAX_VALUES} value columns")]
	FieldOutOfRange {
		ptype: String,
		position: usize,
	},
}
