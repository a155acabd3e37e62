// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::Path;

use tokio::fs;

use crate::CalendarSource;

/// Error type of calendar synchronization.
pub type SyncError = Box<dyn Error + Send + Sync>;

/// Fetches remote calendars into their local files.
///
/// The agenda never performs network I/O itself; the application supplies
/// an implementation of this trait instead.
#[async_trait::async_trait]
pub trait CalendarSync: Send + Sync {
    /// Refresh `source.path` from `source.url`.
    ///
    /// Only called for sources that have a URL.
    async fn sync(&self, source: &CalendarSource) -> Result<(), SyncError>;
}

/// Synchronization that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSync;

#[async_trait::async_trait]
impl CalendarSync for NoSync {
    async fn sync(&self, _source: &CalendarSource) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Synchronization of `file://` URLs, copying the remote file in place.
///
/// Other URL schemes are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSync;

#[async_trait::async_trait]
impl CalendarSync for FileSync {
    #[tracing::instrument(skip(self), fields(calendar = %source.name))]
    async fn sync(&self, source: &CalendarSource) -> Result<(), SyncError> {
        let url = source.url.as_deref().ok_or("Calendar has no URL")?;
        let remote = url
            .strip_prefix("file://")
            .ok_or_else(|| format!("Unsupported URL scheme: {url}"))?;

        if let Some(parent) = source.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let bytes = fs::copy(Path::new(remote), &source.path).await?;
        tracing::debug!(bytes, path = %source.path.display(), "calendar copied");
        Ok(())
    }
}
