// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{MAX_VALUES, Result, RuleError, StoredRow};

/// Constraints for a partial load.
///
/// `p` constrains rows of policy type `p`, `g` rows of policy type `g`. A group
/// that is `None` is not loaded at all. Inside a group an empty value leaves its
/// position unconstrained, any other value must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
	pub p: Option<Vec<String>>,
	pub g: Option<Vec<String>>,
}

impl Filter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_p<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
		self.p = Some(values.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_g<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
		self.g = Some(values.into_iter().map(Into::into).collect());
		self
	}

	/// Present groups, `p` before `g`.
	pub fn groups(&self) -> impl Iterator<Item = (&'static str, &[String])> {
		[("p", self.p.as_deref()), ("g", self.g.as_deref())]
			.into_iter()
			.filter_map(|(ptype, values)| values.map(|values| (ptype, values)))
	}

	/// Rejects any group wider than a stored row.
	pub fn validate(&self) -> Result<()> {
		for (ptype, values) in self.groups() {
			if values.len() > MAX_VALUES {
				return Err(RuleError::FilterTooWide {
					ptype: ptype.to_string(),
					count: values.len(),
				});
			}
		}
		Ok(())
	}

	/// Constraint row for one group. The row carries no identity.
	pub fn group_row(ptype: &str, values: &[String]) -> Result<StoredRow> {
		if values.len() > MAX_VALUES {
			return Err(RuleError::FilterTooWide {
				ptype: ptype.to_string(),
				count: values.len(),
			});
		}

		let mut row = StoredRow {
			ptype: ptype.to_string(),
			..Default::default()
		};
		for (slot, value) in row.values.iter_mut().zip(values) {
			slot.clone_from(value);
		}
		Ok(row)
	}
}

/// A contiguous slice of token constraints starting at `field_index`.
///
/// `values[i]` constrains position `field_index + i`. Empty values leave their
/// position unconstrained, so `FieldFilter::new("p", 1, ["", "admin"])` only
/// matches on position 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
	pub ptype: String,
	pub field_index: usize,
	pub values: Vec<String>,
}

impl FieldFilter {
	pub fn new<S: Into<String>>(ptype: &str, field_index: usize, values: impl IntoIterator<Item = S>) -> Self {
		Self {
			ptype: ptype.to_string(),
			field_index,
			values: values.into_iter().map(Into::into).collect(),
		}
	}

	/// Expands the filter into a constraint row.
	///
	/// A non-empty value that would land past the last value column is an
	/// error; empty values past it are ignored since they constrain nothing.
	pub fn to_row(&self) -> Result<StoredRow> {
		let mut row = StoredRow {
			ptype: self.ptype.clone(),
			..Default::default()
		};

		for (offset, value) in self.values.iter().enumerate() {
			let position = self.field_index.checked_add(offset);
			match position.and_then(|position| row.values.get_mut(position)) {
				Some(slot) => slot.clone_from(value),
				None if value.is_empty() => {}
				None => {
					return Err(RuleError::FieldOutOfRange {
						ptype: self.ptype.clone(),
						position: self.field_index.saturating_add(offset),
					});
				}
			}
		}

		Ok(row)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod filter {
		use super::*;

		#[test]
		fn test_groups_order() {
			let filter = Filter::new().with_g(["alice"]).with_p(["bob"]);
			let groups: Vec<_> = filter.groups().map(|(ptype, _)| ptype).collect();
			assert_eq!(groups, vec!["p", "g"]);
		}

		#[test]
		fn test_absent_group_skipped() {
			let filter = Filter::new().with_g(Vec::<String>::new());
			let groups: Vec<_> = filter.groups().collect();
			assert_eq!(groups.len(), 1);
			assert_eq!(groups[0].0, "g");
			assert!(groups[0].1.is_empty());
		}

		#[test]
		fn test_validate_rejects_seven() {
			let filter = Filter::new().with_g(["a", "b", "c", "d", "e", "f", "g"]);
			assert_eq!(
				filter.validate(),
				Err(RuleError::FilterTooWide {
					ptype: "g".to_string(),
					count: 7
				})
			);
		}

		#[test]
		fn test_validate_accepts_six() {
			let filter = Filter::new().with_p(["a", "b", "c", "d", "e", "f"]);
			assert!(filter.validate().is_ok());
		}

		#[test]
		fn test_group_row() {
			let values = vec!["".to_string(), "data1".to_string()];
			let row = Filter::group_row("p", &values).unwrap();
			assert_eq!(row.ptype, "p");
			assert_eq!(row.values, ["", "data1", "", "", "", ""]);
			assert!(row.id.is_empty());
		}
	}

	mod field_filter {
		use super::*;

		#[test]
		fn test_offset() {
			let row = FieldFilter::new("p", 1, ["", "admin"]).to_row().unwrap();
			assert_eq!(row.values, ["", "", "admin", "", "", ""]);
		}

		#[test]
		fn test_zero_values() {
			let row = FieldFilter::new("g", 0, Vec::<String>::new()).to_row().unwrap();
			assert_eq!(row.ptype, "g");
			assert!(row.values.iter().all(String::is_empty));
		}

		#[test]
		fn test_last_column() {
			let row = FieldFilter::new("p", 5, ["deny"]).to_row().unwrap();
			assert_eq!(row.value(5), Some("deny"));
		}

		#[test]
		fn test_trailing_empty_past_width() {
			let row = FieldFilter::new("p", 4, ["x", "", ""]).to_row().unwrap();
			assert_eq!(row.value(4), Some("x"));
		}

		#[test]
		fn test_value_past_width() {
			let err = FieldFilter::new("p", 5, ["a", "b"]).to_row().unwrap_err();
			assert_eq!(
				err,
				RuleError::FieldOutOfRange {
					ptype: "p".to_string(),
					position: 6
				}
			);
		}

		#[test]
		fn test_index_at_usize_max() {
			let err = FieldFilter::new("p", usize::MAX, ["", "alice"]).to_row().unwrap_err();
			assert_eq!(
				err,
				RuleError::FieldOutOfRange {
					ptype: "p".to_string(),
					position: usize::MAX
				}
			);
		}

		#[test]
		fn test_index_at_usize_max_with_empty_values() {
			let row = FieldFilter::new("p", usize::MAX, ["", ""]).to_row().unwrap();
			assert!(row.values.iter().all(String::is_empty));
		}
	}
}
