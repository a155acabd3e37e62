// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Calendar text factories (fixtures)
//! - Temporary directory management with auto-cleanup

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{calendar, event, test_config};
pub use temp_dir::setup_temp_dirs;
