// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::SignedDuration;
use jiff::civil::{Date, DateTime, time};

use crate::recurrence::Recurrence;
use crate::{Event, ResolveError};

/// One concrete instance of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    /// The event this is an instance of.
    pub event: Event<'a>,

    /// Start of the instance.
    pub start: DateTime,

    /// End of the instance, `start` plus the event duration.
    pub end: DateTime,
}

impl Occurrence<'_> {
    /// Whether the instance touches any day of `[range_start, range_end]`.
    #[must_use]
    pub fn overlaps(&self, range_start: Date, range_end: Date) -> bool {
        self.end.date() >= range_start && self.start.date() <= range_end
    }

    /// The time left until the instance ends, negative once it has ended.
    #[must_use]
    pub fn remaining(&self, now: DateTime) -> SignedDuration {
        now.duration_until(self.end)
    }
}

/// The occurrences of an event touching the date range `[range_start, range_end]`.
///
/// Times are naive wall-clock values: a `TZID` parameter or a UTC designator
/// on `DTSTART`, `DTEND` or `EXDATE` is ignored. A recurring event is only
/// expanded when it starts on or before `range_start`; otherwise its first
/// instance alone is considered.
///
/// # Errors
///
/// - [`ResolveError::ContractViolation`] if `range_start > range_end`,
/// - [`ResolveError::InvalidEvent`] if `DTSTART` or `DTEND` is missing or
///   malformed, or the event ends before it starts,
/// - [`ResolveError::UnsupportedRecurrence`] if an `RRULE` is malformed or
///   outside the supported subset.
pub fn occurrences<'a>(
    event: &Event<'a>,
    range_start: Date,
    range_end: Date,
) -> Result<Vec<Occurrence<'a>>, ResolveError> {
    if range_start > range_end {
        return Err(ResolveError::ContractViolation {
            start: range_start,
            end: range_end,
        });
    }

    let start = event.start()?.civil();
    let end = event.end()?.civil();
    if end < start {
        return Err(ResolveError::invalid(format!(
            "DTEND {end} is before DTSTART {start}"
        )));
    }
    let duration = start.duration_until(end);

    if !event.is_recurring() || start.date() > range_start {
        let single = Occurrence {
            event: *event,
            start,
            end,
        };
        return Ok(Some(single)
            .filter(|o| o.overlaps(range_start, range_end))
            .into_iter()
            .collect());
    }

    let rules = event.rules()?;
    let exdates = event
        .exdates()?
        .into_iter()
        .map(|d| d.civil())
        .collect::<Vec<_>>();

    let lower = range_start.to_datetime(time(0, 0, 0, 0));
    let upper = range_end.to_datetime(time(23, 59, 0, 0));

    let mut candidates = rules
        .iter()
        .flat_map(|rule| {
            Recurrence::new(rule, start, range_end)
                .skip_while(move |dt| *dt < lower)
                .take_while(move |dt| *dt <= upper)
        })
        .filter(|dt| !exdates.contains(dt))
        .collect::<Vec<_>>();
    candidates.sort();
    candidates.dedup();

    candidates
        .into_iter()
        .map(|start| {
            let end = start
                .checked_add(duration)
                .map_err(|e| ResolveError::invalid(format!("occurrence end overflows: {e}")))?;
            Ok(Occurrence {
                event: *event,
                start,
                end,
            })
        })
        .collect()
}
