// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-friendly subscriber filtered by `RUST_LOG`. Later calls are
/// no-ops.
pub fn init_tracing() {
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::from_default_env())
			.with_test_writer()
			.try_init();
	});
}
