// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use agenda_core::{Agenda, Status};
use jiff::SignedDuration;
use jiff::civil::date;

use crate::common::{calendar, event, setup_temp_dirs, test_config};

fn day() -> String {
    calendar(&[
        event("Standup", "20240101T090000", "20240101T093000", &[]),
        event("Lunch", "20240101T120000", "20240101T130000", &[]),
    ])
}

#[tokio::test]
async fn status_reports_current_event() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.create_ics_file("work", &day()).await.unwrap();
    let agenda = Agenda::new(test_config(&[("Work", path)])).await.unwrap();

    let status = agenda.status(date(2024, 1, 1).at(9, 10, 0, 0));
    assert_eq!(
        status,
        Status::Current {
            summary: "Standup",
            remaining: SignedDuration::from_mins(20),
        }
    );
    assert_eq!(status.to_string(), "Standup for 00:20");
}

#[tokio::test]
async fn status_reports_next_event() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.create_ics_file("work", &day()).await.unwrap();
    let agenda = Agenda::new(test_config(&[("Work", path)])).await.unwrap();

    let status = agenda.status(date(2024, 1, 1).at(10, 15, 0, 0));
    assert_eq!(status.to_string(), "Lunch in 01:45");
}

#[tokio::test]
async fn status_skips_current_event_unless_enabled() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.create_ics_file("work", &day()).await.unwrap();
    let mut config = test_config(&[("Work", path)]);
    config.show_remaining = false;
    let agenda = Agenda::new(config).await.unwrap();

    let status = agenda.status(date(2024, 1, 1).at(9, 10, 0, 0));
    assert_eq!(status.to_string(), "Lunch in 02:50");
}

#[tokio::test]
async fn status_is_idle_after_last_event() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.create_ics_file("work", &day()).await.unwrap();
    let agenda = Agenda::new(test_config(&[("Work", path)])).await.unwrap();

    let status = agenda.status(date(2024, 1, 1).at(18, 0, 0, 0));
    assert_eq!(status, Status::Idle);
    assert_eq!(status.to_string(), "No more events");
}
