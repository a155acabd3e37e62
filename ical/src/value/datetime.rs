// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for DATE and DATE-TIME values as defined in RFC 5545 Section 3.3.

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::extra::ParserExtra;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use jiff::civil;

use crate::value::{ValueError, ValueExpected};

/// A DATE or DATE-TIME value.
///
/// Time zones are not resolved: a trailing `Z` is remembered but the
/// wall-clock value is used as is, and a `TZID` parameter is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrDateTime {
    /// A calendar date, `VALUE=DATE`.
    Date(civil::Date),

    /// A date with local time.
    DateTime {
        /// The wall-clock date and time.
        value: civil::DateTime,

        /// Whether the value carried the UTC designator `Z`.
        utc: bool,
    },
}

impl DateOrDateTime {
    /// The value as a civil datetime, dates being taken at midnight.
    #[must_use]
    pub fn civil(self) -> civil::DateTime {
        match self {
            Self::Date(date) => date.to_datetime(civil::Time::midnight()),
            Self::DateTime { value, .. } => value,
        }
    }

    /// The calendar date of the value.
    #[must_use]
    pub fn date(self) -> civil::Date {
        match self {
            Self::Date(date) => date,
            Self::DateTime { value, .. } => value.date(),
        }
    }

    /// Whether this is a date without a time.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Date(_))
    }
}

impl Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.strftime("%Y%m%d")),
            Self::DateTime { value, utc } => {
                write!(f, "{}", value.strftime("%Y%m%dT%H%M%S"))?;
                if *utc {
                    write!(f, "Z")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for DateOrDateTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date_or_date_time(s)
    }
}

/// Parse a single DATE or DATE-TIME value.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] if the text is neither a DATE nor a
/// DATE-TIME, or names a date that does not exist.
pub fn parse_date_or_date_time(src: &str) -> Result<DateOrDateTime, ValueError> {
    date_or_date_time::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(src.trim())
        .into_result()
        .map_err(|errs| ValueError::syntax("DATE-TIME", src, &errs))
}

/// Parse a COMMA-separated list of DATE or DATE-TIME values, as found in
/// EXDATE and RDATE.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] if any entry is malformed.
pub fn parse_date_list(src: &str) -> Result<Vec<DateOrDateTime>, ValueError> {
    date_or_date_time::<'_, _, extra::Err<Rich<'_, char>>>()
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
        .parse(src.trim())
        .into_result()
        .map_err(|errs| ValueError::syntax("DATE-TIME list", src, &errs))
}

/// ```txt
/// enddate     = date / date-time
/// ```
pub(crate) fn date_or_date_time<'src, I, E>() -> impl Parser<'src, I, DateOrDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((
        value_date_time().map(|(value, utc)| DateOrDateTime::DateTime { value, utc }),
        value_date().map(DateOrDateTime::Date),
    ))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn value_date<'src, I, E>() -> impl Parser<'src, I, civil::Date, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            civil::Date::new(year, month, day)
                .map_err(|_| E::Error::expected_found([ValueExpected::Date], None, span))
        })
}

/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
fn value_date_time<'src, I, E>() -> impl Parser<'src, I, (civil::DateTime, bool), E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, (time, utc))| (date.to_datetime(time), utc))
}

/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, (civil::Time, bool), E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let hour = choice((
        i8_0_1().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(i8_0_3()).map(|b| 20 + b),
    ));
    let minute = i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b);
    let second = choice((
        i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just("60").to(60), // leap second
    ));

    hour.then(minute)
        .then(second)
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| {
            // NOTE: leap second 60 is contracted to 59
            (civil::time(hour, minute, second.min(59), 0), utc.is_some())
        })
}

define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_5 : i8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
