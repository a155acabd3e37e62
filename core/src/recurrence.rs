// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of recurrence rules into datetimes.
//!
//! Every period of the rule frequency is expanded on its own: the `k`-th
//! period is anchored at `DTSTART + k * INTERVAL` and the `BYDAY` and
//! `BYMONTHDAY` parts either expand that anchor into several dates or limit
//! which dates are kept. Anchors are always computed from `DTSTART` rather
//! than from the previous anchor, so that 01-31 plus one month plus one
//! month lands on 03-31 and not on 03-29.

use std::collections::VecDeque;

use agenda_ical::{Frequency, RecurrenceRule, WeekDayNum};
use jiff::Span;
use jiff::civil::{Date, DateTime, Weekday};

/// Iterator over the datetimes generated by one recurrence rule.
///
/// Yields in ascending order, starting at the first datetime matching the
/// rule that is not before `start`. Iteration ends when `COUNT` datetimes
/// have been produced, when `UNTIL` is passed, or once a whole period lies
/// after the horizon.
#[derive(Debug, Clone)]
pub struct Recurrence<'r> {
    rule: &'r RecurrenceRule,
    start: DateTime,
    horizon: Date,
    /// Index of the next period to expand, `None` when exhausted.
    next_period: Option<i64>,
    pending: VecDeque<DateTime>,
    emitted: u32,
}

impl<'r> Recurrence<'r> {
    /// Expand `rule` from `start` up to, at least, the `horizon` date.
    #[must_use]
    pub fn new(rule: &'r RecurrenceRule, start: DateTime, horizon: Date) -> Self {
        Self {
            rule,
            start,
            horizon,
            next_period: Some(0),
            pending: VecDeque::new(),
            emitted: 0,
        }
    }

    /// Expand periods until one produces datetimes; false when exhausted.
    fn fill(&mut self) -> bool {
        while let Some(period) = self.next_period {
            self.next_period = period.checked_add(1);

            let Some(anchor) = self.anchor(period) else {
                self.next_period = None;
                return false;
            };
            if self.period_start(anchor.date()) > self.horizon {
                self.next_period = None;
                return false;
            }

            let mut set = self.expand(anchor);
            set.retain(|dt| *dt >= self.start);
            set.sort();
            set.dedup();
            if !set.is_empty() {
                self.pending.extend(set);
                return true;
            }
        }
        false
    }

    fn anchor(&self, period: i64) -> Option<DateTime> {
        let n = i64::from(self.rule.interval).checked_mul(period)?;
        let span = match self.rule.freq {
            Frequency::Daily => Span::new().try_days(n),
            Frequency::Weekly => Span::new().try_weeks(n),
            Frequency::Monthly => Span::new().try_months(n),
            Frequency::Yearly => Span::new().try_years(n),
        }
        .ok()?;
        self.start.checked_add(span).ok()
    }

    fn period_start(&self, date: Date) -> Date {
        match self.rule.freq {
            Frequency::Daily => date,
            Frequency::Weekly => first_of_week(date, self.week_start()),
            Frequency::Monthly => date.first_of_month(),
            Frequency::Yearly => date.first_of_year(),
        }
    }

    fn expand(&self, anchor: DateTime) -> Vec<DateTime> {
        let date = anchor.date();
        let rule = self.rule;
        let dates = match rule.freq {
            Frequency::Daily => vec![date],
            Frequency::Weekly if rule.by_day.is_empty() => vec![date],
            Frequency::Weekly => {
                let first = first_of_week(date, self.week_start());
                days_between(first, first.saturating_add(Span::new().days(6)))
                    .filter(|d| rule.by_day.iter().any(|wd| Weekday::from(wd.day) == d.weekday()))
                    .collect()
            }
            Frequency::Monthly if !rule.by_day.is_empty() => {
                self.weekdays_between(date.first_of_month(), date.last_of_month())
            }
            Frequency::Monthly if !rule.by_month_day.is_empty() => self.month_days(date),
            Frequency::Yearly if !rule.by_day.is_empty() => {
                self.weekdays_between(date.first_of_year(), date.last_of_year())
            }
            Frequency::Yearly if !rule.by_month_day.is_empty() => (1..=12)
                .filter_map(|month| Date::new(date.year(), month, 1).ok())
                .flat_map(|first| self.month_days(first))
                .collect(),
            // Adding months or years constrains 01-31 to 02-29 and the like,
            // such periods have no occurrence
            Frequency::Monthly | Frequency::Yearly if date.day() != self.start.day() => vec![],
            Frequency::Monthly | Frequency::Yearly => vec![date],
        };

        let time = self.start.time();
        dates
            .into_iter()
            .filter(|d| self.satisfies_by_week_day(*d) && self.satisfies_by_month_day(*d))
            .map(|d| d.to_datetime(time))
            .collect()
    }

    fn week_start(&self) -> Weekday {
        self.rule.week_start().into()
    }

    /// `BYDAY` limits the dates of a `DAILY` rule; it expands the others.
    fn satisfies_by_week_day(&self, date: Date) -> bool {
        self.rule.freq != Frequency::Daily
            || self.rule.by_day.is_empty()
            || self
                .rule
                .by_day
                .iter()
                .any(|wd| Weekday::from(wd.day) == date.weekday())
    }

    fn satisfies_by_month_day(&self, date: Date) -> bool {
        self.rule.by_month_day.is_empty()
            || self
                .rule
                .by_month_day
                .iter()
                .any(|&md| resolve_month_day(date, md) == Some(date.day()))
    }

    fn month_days(&self, date: Date) -> Vec<Date> {
        self.rule
            .by_month_day
            .iter()
            .filter_map(|&md| resolve_month_day(date, md))
            .filter_map(|day| Date::new(date.year(), date.month(), day).ok())
            .collect()
    }

    /// Dates selected by `BYDAY` within `[first, last]`, a month or a year.
    fn weekdays_between(&self, first: Date, last: Date) -> Vec<Date> {
        self.rule
            .by_day
            .iter()
            .flat_map(|wd| match wd.occurrence {
                Some(nth) => nth_weekday(first, last, *wd, nth).into_iter().collect(),
                None => days_between(first, last)
                    .filter(|d| d.weekday() == Weekday::from(wd.day))
                    .collect::<Vec<_>>(),
            })
            .collect()
    }

    fn within_until(&self, dt: DateTime) -> bool {
        match self.rule.until {
            // A date-only UNTIL includes the whole day
            Some(until) if until.is_date() => dt.date() <= until.date(),
            Some(until) => dt <= until.civil(),
            None => true,
        }
    }
}

impl Iterator for Recurrence<'_> {
    type Item = DateTime;

    fn next(&mut self) -> Option<DateTime> {
        loop {
            if self.rule.count.is_some_and(|count| self.emitted >= count) {
                return None;
            }

            if let Some(dt) = self.pending.pop_front() {
                if !self.within_until(dt) {
                    self.pending.clear();
                    self.next_period = None;
                    return None;
                }
                self.emitted += 1;
                return Some(dt);
            }

            if !self.fill() {
                return None;
            }
        }
    }
}

/// Day of month for a possibly negative `BYMONTHDAY` value, if it exists.
fn resolve_month_day(date: Date, month_day: i8) -> Option<i8> {
    let days = date.days_in_month();
    let day = if month_day < 0 {
        days.checked_add(month_day)?.checked_add(1)?
    } else {
        month_day
    };
    (1..=days).contains(&day).then_some(day)
}

fn first_of_week(date: Date, week_start: Weekday) -> Date {
    let back = (date.weekday().to_monday_zero_offset() - week_start.to_monday_zero_offset())
        .rem_euclid(7);
    date.saturating_sub(Span::new().days(back))
}

fn days_between(first: Date, last: Date) -> impl Iterator<Item = Date> {
    first
        .series(Span::new().days(1))
        .take_while(move |d| *d <= last)
}

/// The `nth` given weekday within `[first, last]`, counted from the end when
/// negative.
fn nth_weekday(first: Date, last: Date, wd: WeekDayNum, nth: i8) -> Option<Date> {
    let weekday = Weekday::from(wd.day);
    let date = if nth > 0 {
        let offset = (weekday.to_monday_zero_offset() - first.weekday().to_monday_zero_offset())
            .rem_euclid(7);
        let days = i64::from(offset) + 7 * (i64::from(nth) - 1);
        first.checked_add(Span::new().try_days(days).ok()?).ok()?
    } else {
        let offset = (last.weekday().to_monday_zero_offset() - weekday.to_monday_zero_offset())
            .rem_euclid(7);
        let days = i64::from(offset) + 7 * (-i64::from(nth) - 1);
        last.checked_sub(Span::new().try_days(days).ok()?).ok()?
    };
    (first..=last).contains(&date).then_some(date)
}
