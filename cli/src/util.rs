// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil::{Date, DateTime};
use jiff::{ToSpan, Zoned};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of objects
    Json,
    /// Aligned, colored columns
    Table,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

/// The current wall-clock time in the system time zone.
pub fn now() -> DateTime {
    Zoned::now().datetime()
}

/// Parse a date given as `YYYY-MM-DD`, `today`, `tomorrow` or `yesterday`.
pub fn parse_date(today: Date, s: &str) -> Result<Date, Box<dyn Error>> {
    let date = match s.trim().to_lowercase().as_str() {
        "today" => today,
        "tomorrow" => today.checked_add(1.day())?,
        "yesterday" => today.checked_sub(1.day())?,
        other => other
            .parse::<Date>()
            .map_err(|_| format!("Invalid date: {s}. Expected format: YYYY-MM-DD or today"))?,
    };
    Ok(date)
}

/// Format a date-time as `YYYY-MM-DD HH:MM`, or `HH:MM` if it falls on `today`.
pub fn format_datetime(today: Date, dt: DateTime) -> String {
    if dt.date() == today {
        dt.strftime("%H:%M").to_string()
    } else {
        dt.strftime("%Y-%m-%d %H:%M").to_string()
    }
}
