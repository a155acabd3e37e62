// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing whole iCalendar documents.

use agenda_ical::{BlockMismatch, Entry, MalformedReason, ParseError, parse, parse_rrule};

#[test]
fn parses_calendar_with_timezone_and_events() {
    let src = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VTIMEZONE\r
TZID:Europe/Berlin\r
BEGIN:STANDARD\r
DTSTART:19701025T030000\r
TZOFFSETFROM:+0200\r
TZOFFSETTO:+0100\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
SUMMARY:Foo\r
DTSTART;TZID=Europe/Berlin:20240101T090000\r
DTEND;TZID=Europe/Berlin:20240101T100000\r
RRULE:FREQ=DAILY;COUNT=5\r
EXDATE;TZID=Europe/Berlin:20240103T090000\r
END:VEVENT\r
BEGIN:VEVENT\r
SUMMARY:Bar\r
DTSTART;VALUE=DATE:20240102\r
END:VEVENT\r
END:VCALENDAR\r
";
    let doc = parse(src).unwrap();
    let cal = &doc.calendars()[0];
    assert_eq!(cal.value("VERSION"), Some("2.0"));

    let tz = &cal.children("VTIMEZONE")[0];
    assert_eq!(tz.value("TZID"), Some("Europe/Berlin"));
    assert_eq!(tz.children("STANDARD")[0].value("TZOFFSETTO"), Some("+0100"));

    let events = cal.children("VEVENT");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].value("SUMMARY"), Some("Foo"));
    assert_eq!(events[1].value("SUMMARY"), Some("Bar"));

    let rrule = parse_rrule(events[0].value("RRULE").unwrap()).unwrap();
    assert_eq!(rrule.count, Some(5));

    match cal.get("VEVENT") {
        Some(Entry::Components(c)) => assert_eq!(c.len(), 2),
        other => panic!("unexpected entry: {other:?}"),
    }
    match events[0].get("DTSTART") {
        Some(Entry::Properties([p])) => assert_eq!(p.value, "20240101T090000"),
        other => panic!("unexpected entry: {other:?}"),
    }
}

#[test]
fn accepts_bare_line_feeds() {
    let doc = parse("BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:x\nEND:VEVENT\nEND:VCALENDAR\n").unwrap();
    assert_eq!(doc.calendars()[0].children("VEVENT").len(), 1);
}

#[test]
fn rejects_line_without_colon() {
    let src = "BEGIN:VCALENDAR\r\nFOOBAR\r\nEND:VCALENDAR\r\n";
    let err = parse(src).unwrap_err();
    assert!(matches!(
        err,
        ParseError::MalformedLine {
            reason: MalformedReason::MissingColon,
            ..
        }
    ));
    assert_eq!(err.line(), 2);
}

#[test]
fn rejects_crossed_blocks() {
    let src = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
END:VCALENDAR\r
END:VEVENT\r
";
    let err = parse(src).unwrap_err();
    assert_eq!(
        err,
        ParseError::MismatchedBlock {
            line: 4,
            kind: BlockMismatch::WrongEnd {
                expected: "VCALENDAR".to_string(),
                found: "VEVENT".to_string(),
            },
        }
    );
}

#[test]
fn rejects_leading_continuation() {
    let err = parse(" SUMMARY:x\r\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::MalformedLine {
            line: 1,
            reason: MalformedReason::LeadingContinuation,
            ..
        }
    ));
}

#[test]
fn error_messages_name_the_line() {
    let err = parse("BEGIN:VEVENT\r\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "mismatched block at line 1: BEGIN:VEVENT is never closed"
    );
}

#[test]
fn parses_empty_document() {
    let doc = parse("").unwrap();
    assert!(doc.calendars().is_empty());
    assert_eq!(doc.root().depth(), 0);
}
