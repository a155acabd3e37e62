// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicUsize, Ordering};

use agenda_core::{Agenda, CalendarSource, CalendarSync, Config, FileSync, SyncError};
use jiff::civil::date;
use tokio::fs;

use crate::common::{calendar, event, setup_temp_dirs};

/// Counts sync requests without fetching anything.
#[derive(Debug, Default)]
struct CountingSync(AtomicUsize);

#[async_trait::async_trait]
impl CalendarSync for CountingSync {
    async fn sync(&self, _source: &CalendarSource) -> Result<(), SyncError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn missing_calendar_is_synced_then_loaded() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let ics = calendar(&[event("Remote", "20240101T090000", "20240101T100000", &[])]);
    let url = temp_dirs.create_remote_file("web", &ics).await.unwrap();
    let local = temp_dirs.calendar_path.join("web.ics");
    let config = Config {
        calendars: vec![CalendarSource::new("Web", &local).with_url(url)],
        ..Default::default()
    };

    // Act
    let agenda = Agenda::with_sync(config, FileSync).await.unwrap();

    // Assert
    assert!(local.exists());
    let items = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
    assert_eq!(items[0].summary(), "Remote");
}

#[tokio::test]
async fn missing_calendar_without_url_is_not_synced() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        calendars: vec![CalendarSource::new(
            "Local",
            temp_dirs.calendar_path.join("missing.ics"),
        )],
        ..Default::default()
    };

    let agenda = Agenda::with_sync(config, CountingSync::default())
        .await
        .unwrap();
    assert_eq!(agenda.calendars().count(), 0);
    assert_eq!(agenda.syncer().0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sync_refreshes_calendars_with_url() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let old = calendar(&[event("Old", "20240101T090000", "20240101T100000", &[])]);
    let new = calendar(&[event("New", "20240101T090000", "20240101T100000", &[])]);
    let local = temp_dirs.create_ics_file("web", &old).await.unwrap();
    let url = temp_dirs.create_remote_file("web", &new).await.unwrap();
    let config = Config {
        calendars: vec![CalendarSource::new("Web", &local).with_url(url)],
        ..Default::default()
    };
    let mut agenda = Agenda::with_sync(config, FileSync).await.unwrap();
    let before = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap()[0].summary();
    assert_eq!(before, "Old");

    // Act
    agenda.sync().await.unwrap();

    // Assert
    let items = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
    assert_eq!(items[0].summary(), "New");
    assert_eq!(fs::read_to_string(&local).await.unwrap(), new);
}

#[tokio::test]
async fn sync_reports_failed_calendars() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let ics = calendar(&[]);
    let local = temp_dirs.create_ics_file("web", &ics).await.unwrap();
    let config = Config {
        calendars: vec![CalendarSource::new("Web", &local).with_url("https://example.com/a.ics")],
        ..Default::default()
    };
    let mut agenda = Agenda::with_sync(config, FileSync).await.unwrap();

    let err = agenda.sync().await.unwrap_err();
    assert!(err.to_string().contains("Web"));
    assert_eq!(agenda.calendars().count(), 1, "local copy is still loaded");
}
