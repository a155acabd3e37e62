// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use agenda_ical::{ParseError, ValueError};
use jiff::civil::Date;

/// Errors raised while resolving the occurrences of one event.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The event lacks a usable `DTSTART` or `DTEND`, or ends before it starts.
    #[error("invalid event: {reason}")]
    InvalidEvent {
        /// What is wrong with the event
        reason: String,
    },

    /// A recurrence rule is malformed or outside the supported subset.
    #[error("unsupported recurrence: {0}")]
    UnsupportedRecurrence(#[from] ValueError),

    /// The query range is reversed.
    #[error("range start {start} is after range end {end}")]
    ContractViolation {
        /// Start of the requested range
        start: Date,
        /// End of the requested range
        end: Date,
    },
}

impl ResolveError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading a calendar source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file is missing or cannot be read.
    #[error("failed to read calendar {}: {source}", path.display())]
    Unreadable {
        /// Path of the calendar file
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The file is not a well-formed iCalendar document.
    #[error("failed to parse calendar {}: {source}", path.display())]
    Parse {
        /// Path of the calendar file
        path: PathBuf,
        /// The underlying parse error
        source: ParseError,
    },
}

impl SourceError {
    /// Whether the file could not be read, e.g. because it does not exist yet.
    #[must_use]
    pub const fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}
