// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;
use tokio::fs;

/// Temporary directories used for testing, removed when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// Directory for local .ics files.
    pub calendar_path: PathBuf,
    /// Directory standing in for remote calendars.
    pub remote_path: PathBuf,
    _base: TempDir,
}

impl TempDirs {
    /// Creates new temporary directories for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?;

        let calendar_path = base.path().join("calendar");
        let remote_path = base.path().join("remote");

        fs::create_dir_all(&calendar_path).await?;
        fs::create_dir_all(&remote_path).await?;

        Ok(Self {
            calendar_path,
            remote_path,
            _base: base,
        })
    }

    /// Creates a .ics file in the calendar directory.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub async fn create_ics_file(
        &self,
        name: &str,
        content: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = self.calendar_path.join(format!("{name}.ics"));
        fs::write(&path, content).await?;
        Ok(path)
    }

    /// Creates a .ics file in the remote directory, returning its URL.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    #[allow(dead_code)]
    pub async fn create_remote_file(
        &self,
        name: &str,
        content: &str,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let path = self.remote_path.join(format!("{name}.ics"));
        fs::write(&path, content).await?;
        Ok(format!("file://{}", path.display()))
    }
}

/// Sets up temporary directories for integration tests.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}
