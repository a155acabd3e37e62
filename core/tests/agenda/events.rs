// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use agenda_core::{Agenda, CalendarSource, Config};
use jiff::civil::date;

use crate::common::{calendar, event, setup_temp_dirs, test_config};

#[tokio::test]
async fn agenda_lists_single_event() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let ics = calendar(&[event("Foo", "20240101T090000", "20240101T100000", &[])]);
    let path = temp_dirs.create_ics_file("work", &ics).await.unwrap();
    let agenda = Agenda::new(test_config(&[("Work", path)])).await.unwrap();

    // Act
    let items = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap();

    // Assert
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].calendar, "Work");
    assert_eq!(items[0].summary(), "Foo");
    assert_eq!(items[0].start, date(2024, 1, 1).at(9, 0, 0, 0));
    assert_eq!(items[0].end, date(2024, 1, 1).at(10, 0, 0, 0));
    assert_eq!(items[0].to_string(), "09:00 - 10:00\tFoo");
}

#[tokio::test]
async fn agenda_merges_calendars_sorted_by_start() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let work = calendar(&[
        event("Review", "20240102T140000", "20240102T150000", &[]),
        event(
            "Standup",
            "20240101T093000",
            "20240101T094500",
            &["RRULE:FREQ=DAILY;COUNT=5", "EXDATE:20240103T093000"],
        ),
    ]);
    let home = calendar(&[event("Dentist", "20240102T080000", "20240102T090000", &[])]);
    let work = temp_dirs.create_ics_file("work", &work).await.unwrap();
    let home = temp_dirs.create_ics_file("home", &home).await.unwrap();
    let agenda = Agenda::new(test_config(&[("Work", work), ("Home", home)]))
        .await
        .unwrap();

    // Act
    let day2 = agenda.events(date(2024, 1, 2), date(2024, 1, 2)).unwrap();
    let day3 = agenda.events(date(2024, 1, 3), date(2024, 1, 3)).unwrap();

    // Assert
    let lines = day2.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "08:00 - 09:00\tDentist",
            "09:30 - 09:45\tStandup",
            "14:00 - 15:00\tReview",
        ]
    );
    assert_eq!(day2[0].calendar, "Home");
    assert!(day3.is_empty(), "excluded date has no standup");
}

#[tokio::test]
async fn agenda_skips_unresolvable_events() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let ics = calendar(&[
        event("Hourly", "20240101T090000", "20240101T100000", &["RRULE:FREQ=HOURLY"]),
        "BEGIN:VEVENT\r\nSUMMARY:No end\r\nDTSTART:20240101T090000\r\nEND:VEVENT\r\n".to_string(),
        event("Fine", "20240101T110000", "20240101T120000", &[]),
    ]);
    let path = temp_dirs.create_ics_file("work", &ics).await.unwrap();
    let agenda = Agenda::new(test_config(&[("Work", path)])).await.unwrap();

    // Act
    let items = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap();

    // Assert
    let summaries = items.iter().map(|i| i.summary()).collect::<Vec<_>>();
    assert_eq!(summaries, vec!["Fine"]);
}

#[tokio::test]
async fn agenda_skips_broken_and_missing_calendars() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let good = calendar(&[event("Foo", "20240101T090000", "20240101T100000", &[])]);
    let good = temp_dirs.create_ics_file("good", &good).await.unwrap();
    let broken = temp_dirs
        .create_ics_file("broken", "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VCALENDAR\r\n")
        .await
        .unwrap();
    let missing = temp_dirs.calendar_path.join("missing.ics");
    let config = test_config(&[("Good", good), ("Broken", broken), ("Missing", missing)]);

    // Act
    let agenda = Agenda::new(config).await.unwrap();

    // Assert
    let names = agenda
        .calendars()
        .map(|(source, _)| source.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Good"]);
    assert_eq!(agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap().len(), 1);
}

#[tokio::test]
async fn agenda_reload_picks_up_changes() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let ics = calendar(&[event("Before", "20240101T090000", "20240101T100000", &[])]);
    let path = temp_dirs.create_ics_file("work", &ics).await.unwrap();
    let mut agenda = Agenda::new(test_config(&[("Work", path)])).await.unwrap();

    // Act
    let ics = calendar(&[event("After", "20240101T090000", "20240101T100000", &[])]);
    temp_dirs.create_ics_file("work", &ics).await.unwrap();
    let cached = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap()[0].summary();
    assert_eq!(cached, "Before");
    agenda.reload().await;

    // Assert
    let items = agenda.events(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
    assert_eq!(items[0].summary(), "After");
}

#[tokio::test]
async fn agenda_rejects_duplicate_calendar_names() {
    let config = Config {
        calendars: vec![
            CalendarSource::new("Work", "/a.ics"),
            CalendarSource::new("Work", "/b.ics"),
        ],
        ..Default::default()
    };
    assert!(Agenda::new(config).await.is_err());
}
