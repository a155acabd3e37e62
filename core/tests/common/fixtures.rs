// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::PathBuf;

use agenda_core::{CalendarSource, Config};

/// A `VEVENT` block with the given summary, start and end, plus extra lines.
pub fn event(summary: &str, start: &str, end: &str, extra: &[&str]) -> String {
    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{summary}@example.com"),
        format!("SUMMARY:{summary}"),
        format!("DTSTART:{start}"),
        format!("DTEND:{end}"),
    ];
    lines.extend(extra.iter().map(ToString::to_string));
    lines.push("END:VEVENT".to_string());
    lines.join("\r\n") + "\r\n"
}

/// A `VCALENDAR` document wrapping the given event blocks.
pub fn calendar(events: &[String]) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Agenda//Test//EN\r\n{}END:VCALENDAR\r\n",
        events.concat()
    )
}

/// A configuration with the given `(name, path)` calendars.
pub fn test_config(calendars: &[(&str, PathBuf)]) -> Config {
    Config {
        calendars: calendars
            .iter()
            .map(|(name, path)| CalendarSource::new(*name, path.clone()))
            .collect(),
        ..Default::default()
    }
}
