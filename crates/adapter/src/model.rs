// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The seam between the adapter and an access-control engine.
//!
//! Loading hands the engine one textual policy line per stored row through
//! [`PolicySink`]. Saving reads every rule of a section through
//! [`PolicySource`]. [`Model`] is a minimal in-memory implementation of both.

use std::collections::BTreeMap;

use crate::{Error, Result};

/// Sections saved by [`crate::Adapter::save_policy`], in save order.
pub const SECTIONS: [&str; 2] = ["p", "g"];

/// Receives policy lines such as `p, alice, data1, read`.
pub trait PolicySink {
	fn load_policy_line(&mut self, line: &str) -> Result<()>;
}

/// Exposes the rules of a section grouped by policy type.
pub trait PolicySource {
	fn policies(&self, sec: &str) -> Vec<(&str, &[Vec<String>])>;
}

impl PolicySink for Vec<String> {
	fn load_policy_line(&mut self, line: &str) -> Result<()> {
		self.push(line.to_string());
		Ok(())
	}
}

/// Rules grouped by section and policy type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
	sections: BTreeMap<String, BTreeMap<String, Vec<Vec<String>>>>,
}

impl Model {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a rule unless an identical one is already present.
	pub fn add_policy(&mut self, sec: &str, ptype: &str, rule: Vec<String>) -> bool {
		let rules = self.sections.entry(sec.to_string()).or_default().entry(ptype.to_string()).or_default();
		if rules.contains(&rule) {
			return false;
		}
		rules.push(rule);
		true
	}

	pub fn remove_policy(&mut self, sec: &str, ptype: &str, rule: &[String]) -> bool {
		let Some(rules) = self.sections.get_mut(sec).and_then(|s| s.get_mut(ptype)) else {
			return false;
		};
		let before = rules.len();
		rules.retain(|r| r.as_slice() != rule);
		before != rules.len()
	}

	pub fn get_policy(&self, sec: &str, ptype: &str) -> &[Vec<String>] {
		self.sections.get(sec).and_then(|s| s.get(ptype)).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn has_policy(&self, sec: &str, ptype: &str, rule: &[String]) -> bool {
		self.get_policy(sec, ptype).iter().any(|r| r.as_slice() == rule)
	}

	pub fn clear_policy(&mut self) {
		self.sections.clear();
	}

	/// Total number of rules across all sections.
	pub fn len(&self) -> usize {
		self.sections.values().flat_map(BTreeMap::values).map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl PolicySink for Model {
	/// Parses `ptype, token, ...`. Blank lines and `#` comments are ignored.
	/// The section is the first character of the policy type.
	fn load_policy_line(&mut self, line: &str) -> Result<()> {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			return Ok(());
		}

		let mut tokens = trimmed.split(',').map(|t| t.trim().to_string());
		let ptype = tokens.next().unwrap_or_default();
		let sec = match ptype.get(..1) {
			Some(sec) if SECTIONS.contains(&sec) => sec.to_string(),
			_ => {
				return Err(Error::Model {
					line: line.to_string(),
					reason: format!("unknown policy type '{ptype}'"),
				});
			}
		};

		self.add_policy(&sec, &ptype, tokens.collect());
		Ok(())
	}
}

impl PolicySource for Model {
	fn policies(&self, sec: &str) -> Vec<(&str, &[Vec<String>])> {
		self.sections
			.get(sec)
			.map(|ptypes| ptypes.iter().map(|(ptype, rules)| (ptype.as_str(), rules.as_slice())).collect())
			.unwrap_or_default()
	}
}
