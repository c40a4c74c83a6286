// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::Path, thread};

use policydb_adapter::{Adapter, AdapterOptions, Error, Sqlite, SqliteConfig};
use policydb_testing::{init_tracing, memory_adapter, memory_adapter_with, rbac_lines, rbac_model, row_count, stored_lines, temp_dir};
use uuid::Uuid;

#[test]
fn test_new_creates_default_database_file() {
	init_tracing();
	temp_dir(|dir| {
		let adapter = Adapter::new(SqliteConfig::new(dir), None).unwrap();
		adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

		assert!(dir.join("casbin.db").exists());
		assert_eq!(adapter.table_name(), "casbin_rules");
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_new_with_database_name() {
	init_tracing();
	temp_dir(|dir| {
		let adapter = Adapter::new(SqliteConfig::new(dir), Some("tenant_a")).unwrap();
		adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

		assert!(dir.join("tenant_a.db").exists());
		assert!(!dir.join("casbin.db").exists());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_file_database_survives_reopen() {
	init_tracing();
	temp_dir(|dir| {
		let adapter = Adapter::new(SqliteConfig::new(dir), None).unwrap();
		adapter.save_policy(&rbac_model()).unwrap();
		adapter.close();

		let reopened = Adapter::new(SqliteConfig::new(dir), None).unwrap();
		assert_eq!(stored_lines(&reopened), rbac_lines());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_invalid_database_name() {
	assert!(matches!(Adapter::new(SqliteConfig::in_memory(), Some("../escape")), Err(Error::Configuration(_))));
	assert!(matches!(Adapter::new(SqliteConfig::in_memory(), Some("")), Err(Error::Configuration(_))));
}

#[test]
fn test_open_memory() {
	init_tracing();
	let adapter = Adapter::open(":memory:", None).unwrap();
	adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();
	assert_eq!(row_count(&adapter), 1);
}

#[test]
fn test_open_named_memory_is_shared() {
	init_tracing();
	let name = format!("memory:shared_{}", Uuid::new_v4().simple());
	let first = Adapter::open(&name, None).unwrap();
	first.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

	let second = Adapter::open(&name, None).unwrap();
	assert_eq!(stored_lines(&second), vec!["p, alice, data1, read"]);

	let other = Adapter::open(&name, Some("other")).unwrap();
	assert_eq!(row_count(&other), 0);
}

#[test]
fn test_memory_name_with_reserved_characters() {
	init_tracing();
	let base = format!("reserved_{}", Uuid::new_v4().simple());

	let first = Adapter::open(&format!("memory:{base}#1"), None).unwrap();
	first.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

	let same = Adapter::open(&format!("memory:{base}#1"), None).unwrap();
	assert_eq!(row_count(&same), 1);

	let other = Adapter::open(&format!("memory:{base}#2"), None).unwrap();
	assert_eq!(row_count(&other), 0);

	let named = Adapter::new(SqliteConfig::memory(base.as_str()), Some("t?1")).unwrap();
	named.add_policy("p", "p", &["bob", "data2", "write"]).unwrap();

	assert!(!Path::new(&base).exists());
	assert!(!Path::new(&format!("{base}_t")).exists());
}

#[test]
fn test_open_file_url() {
	init_tracing();
	temp_dir(|dir| {
		let url = format!("sqlite://{}", dir.display());
		let adapter = Adapter::open(&url, None).unwrap();
		adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();
		assert!(dir.join("casbin.db").exists());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_open_rejects_bad_urls() {
	assert!(matches!(Adapter::open("", None), Err(Error::Configuration(_))));
	assert!(matches!(Adapter::open("postgres://localhost/db", None), Err(Error::Configuration(_))));
	assert!(matches!(Adapter::open("memory:", None), Err(Error::Configuration(_))));
}

#[test]
fn test_custom_table_name() {
	let adapter = memory_adapter_with(AdapterOptions::new().with_table_name("tenant rules"));
	adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

	assert_eq!(adapter.table_name(), "tenant rules");
	assert_eq!(stored_lines(&adapter), vec!["p, alice, data1, read"]);
}

#[test]
fn test_empty_table_name() {
	let sqlite = Sqlite::in_memory().unwrap();
	let result = Adapter::with_pool(sqlite, AdapterOptions::new().with_table_name(" "));
	assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_skip_table_create() {
	let adapter = memory_adapter_with(AdapterOptions::new().skip_table_create());

	let err = adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap_err();
	assert!(matches!(err, Error::Sqlite(_)));

	adapter.bootstrap().unwrap();
	assert_eq!(adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap(), 1);
}

#[test]
fn test_bootstrap_is_idempotent() {
	let adapter = memory_adapter();
	adapter.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

	adapter.bootstrap().unwrap();
	adapter.bootstrap().unwrap();

	assert_eq!(row_count(&adapter), 1);
}

#[test]
fn test_adapters_share_a_pool() {
	init_tracing();
	let sqlite = Sqlite::in_memory().unwrap();
	let rules = Adapter::with_pool(sqlite.clone(), AdapterOptions::default()).unwrap();
	let audit = Adapter::with_pool(sqlite, AdapterOptions::new().with_table_name("audit_rules")).unwrap();

	rules.add_policy("p", "p", &["alice", "data1", "read"]).unwrap();

	assert_eq!(row_count(&rules), 1);
	assert_eq!(row_count(&audit), 0);
}

#[test]
fn test_concurrent_adds() {
	init_tracing();
	temp_dir(|dir| {
		let adapter = Adapter::new(SqliteConfig::new(dir), None).unwrap();

		thread::scope(|scope| {
			for worker in 0..4 {
				let adapter = &adapter;
				scope.spawn(move || {
					for i in 0..10 {
						let user = format!("user{worker}_{i}");
						adapter.add_policy("p", "p", &[user.as_str(), "data1", "read"]).unwrap();
					}
				});
			}
		});

		assert_eq!(row_count(&adapter), 40);
		Ok(())
	})
	.unwrap();
}
