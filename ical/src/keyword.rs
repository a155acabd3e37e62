// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545 that the agenda understands.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Section 3.6 - Calendar Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VTIMEZONE: &str = "VTIMEZONE";

// Section 3.2 - Property Parameters
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";

// Section 3.8.1 - Descriptive Component Properties
pub const KW_CATEGORIES: &str = "CATEGORIES";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_RESOURCES: &str = "RESOURCES";
pub const KW_SUMMARY: &str = "SUMMARY";

// Section 3.8.2 - Date and Time Component Properties
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DTEND: &str = "DTEND";

// Section 3.8.4 - Relationship Component Properties
pub const KW_UID: &str = "UID";

// Section 3.8.5 - Recurrence Component Properties
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_RDATE: &str = "RDATE";
pub const KW_RRULE: &str = "RRULE";

// Section 3.3.10 - Recurrence Rule
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_WKST: &str = "WKST";

/// Properties whose value is a COMMA-separated list of values.
pub const MULTI_VALUED_PROPERTIES: &[&str] = &[KW_CATEGORIES, KW_EXDATE, KW_RDATE, KW_RESOURCES];
