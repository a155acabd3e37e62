// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule values as defined in RFC 5545 Section 3.3.10.
//!
//! Only the commonly used subset is understood: `FREQ` of DAILY, WEEKLY,
//! MONTHLY or YEARLY, `INTERVAL`, `COUNT`, `UNTIL`, `BYDAY`, `BYMONTHDAY`
//! and `WKST`. Any other part is reported as [`ValueError::Unsupported`].

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use strum::{Display as StrumDisplay, EnumString};

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYMONTHDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{DateOrDateTime, date_or_date_time};
use crate::value::{ValueError, ValueExpected};

/// Recurrence rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Number of periods between recurrences, at least 1
    pub interval: u32,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Last possible occurrence, inclusive
    pub until: Option<DateOrDateTime>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier, -31 to -1 and 1 to 31
    pub by_month_day: Vec<i8>,
    /// Day the week starts on
    pub wkst: Option<WeekDay>,
}

impl RecurrenceRule {
    /// Create a rule repeating every period of the given frequency.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            count: None,
            until: None,
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            wkst: None,
        }
    }

    /// The day weeks start on, Monday unless `WKST` says otherwise.
    #[must_use]
    pub fn week_start(&self) -> WeekDay {
        self.wkst.unwrap_or(WeekDay::Monday)
    }
}

impl FromStr for RecurrenceRule {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s)
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if let Some(until) = self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }
        if !self.by_day.is_empty() {
            write!(f, ";{KW_RRULE_BYDAY}=")?;
            write_list(f, &self.by_day)?;
        }
        if !self.by_month_day.is_empty() {
            write!(f, ";{KW_RRULE_BYMONTHDAY}=")?;
            write_list(f, &self.by_month_day)?;
        }
        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[expect(missing_docs)]
pub enum WeekDay {
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
    #[strum(serialize = "SU")]
    Sunday,
}

impl From<WeekDay> for jiff::civil::Weekday {
    fn from(value: WeekDay) -> Self {
        match value {
            WeekDay::Monday => Self::Monday,
            WeekDay::Tuesday => Self::Tuesday,
            WeekDay::Wednesday => Self::Wednesday,
            WeekDay::Thursday => Self::Thursday,
            WeekDay::Friday => Self::Friday,
            WeekDay::Saturday => Self::Saturday,
            WeekDay::Sunday => Self::Sunday,
        }
    }
}

/// Day of week with optional occurrence, e.g. `MO`, `1MO` or `-1FR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence within the month or year, negative counting from the end
    pub occurrence: Option<i8>,
}

impl WeekDayNum {
    /// Every given weekday of the period.
    #[must_use]
    pub const fn every(day: WeekDay) -> Self {
        Self {
            day,
            occurrence: None,
        }
    }

    /// The `nth` given weekday of the period.
    #[must_use]
    pub const fn nth(nth: i8, day: WeekDay) -> Self {
        Self {
            day,
            occurrence: Some(nth),
        }
    }
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.occurrence {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Parse a recurrence rule value.
///
/// Part names and keywords are matched case-insensitively.
///
/// # Errors
///
/// - [`ValueError::Syntax`] if the text is not a list of `NAME=VALUE` parts
///   or a part value is malformed,
/// - [`ValueError::Unsupported`] for parts or frequencies outside the
///   supported subset,
/// - [`ValueError::DuplicatePart`], [`ValueError::MissingFreq`] and
///   [`ValueError::CountWithUntil`] for rules RFC 5545 forbids.
pub fn parse_rrule(src: &str) -> Result<RecurrenceRule, ValueError> {
    let upper = src.trim().to_ascii_uppercase();
    let parts = recur::<'_, _, Extra<'_>>()
        .parse(upper.as_str())
        .into_result()
        .map_err(|errs| ValueError::syntax("RECUR", src, &errs))?;

    build_from_parts(parts)
}

type Extra<'src> = extra::Err<Rich<'src, char>>;

fn build_from_parts(parts: Vec<(String, String)>) -> Result<RecurrenceRule, ValueError> {
    let mut freq = None;
    let mut interval = None;
    let mut count = None;
    let mut until = None;
    let mut by_day = None;
    let mut by_month_day = None;
    let mut wkst = None;

    for (name, value) in parts {
        match name.as_str() {
            KW_RRULE_FREQ => {
                let f = value.parse::<Frequency>().map_err(|_| ValueError::Unsupported {
                    part: format!("{name}={value}"),
                })?;
                set_once(&mut freq, f, &name)?;
            }
            KW_RRULE_INTERVAL => {
                let v = parse_part(&value, u32_non_zero::<&str, Extra<'_>>())?;
                set_once(&mut interval, v, &name)?;
            }
            KW_RRULE_COUNT => {
                let v = parse_part(&value, u32_non_zero::<&str, Extra<'_>>())?;
                set_once(&mut count, v, &name)?;
            }
            KW_RRULE_UNTIL => {
                let v = parse_part(&value, date_or_date_time::<&str, Extra<'_>>())?;
                set_once(&mut until, v, &name)?;
            }
            KW_RRULE_BYDAY => {
                let v = parse_part(&value, bywdaylist::<&str, Extra<'_>>())?;
                set_once(&mut by_day, v, &name)?;
            }
            KW_RRULE_BYMONTHDAY => {
                let v = parse_part(&value, bymodaylist::<&str, Extra<'_>>())?;
                set_once(&mut by_month_day, v, &name)?;
            }
            KW_RRULE_WKST => {
                let v = parse_part(&value, weekday::<&str, Extra<'_>>())?;
                set_once(&mut wkst, v, &name)?;
            }
            _ => {
                return Err(ValueError::Unsupported {
                    part: format!("{name}={value}"),
                });
            }
        }
    }

    let freq = freq.ok_or(ValueError::MissingFreq)?;
    if count.is_some() && until.is_some() {
        return Err(ValueError::CountWithUntil);
    }

    let by_day = by_day.unwrap_or_default();
    if matches!(freq, Frequency::Daily | Frequency::Weekly)
        && by_day.iter().any(|d| d.occurrence.is_some())
    {
        let list = by_day.iter().map(ToString::to_string).collect::<Vec<_>>();
        return Err(ValueError::Unsupported {
            part: format!("{KW_RRULE_BYDAY}={}", list.join(",")),
        });
    }

    Ok(RecurrenceRule {
        freq,
        interval: interval.unwrap_or(1),
        count,
        until,
        by_day,
        by_month_day: by_month_day.unwrap_or_default(),
        wkst,
    })
}

fn set_once<T>(slot: &mut Option<T>, value: T, name: &str) -> Result<(), ValueError> {
    if slot.is_some() {
        return Err(ValueError::DuplicatePart {
            part: name.to_string(),
        });
    }
    *slot = Some(value);
    Ok(())
}

fn parse_part<'src, T>(
    value: &'src str,
    parser: impl Parser<'src, &'src str, T, Extra<'src>>,
) -> Result<T, ValueError> {
    parser
        .then_ignore(end())
        .parse(value)
        .into_result()
        .map_err(|errs| ValueError::syntax("RECUR", value, &errs))
}

/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
/// ```
///
/// Parts are split into `(name, value)` pairs here and interpreted by
/// [`build_from_parts`], so that an unknown part is reported by name rather
/// than as a syntax error.
fn recur<'src, I, E>() -> impl Parser<'src, I, Vec<(String, String)>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let name = select! { c @ ('A'..='Z' | '0'..='9' | '-') => c }
        .repeated()
        .at_least(1)
        .collect::<String>();

    let value = none_of(";")
        .repeated()
        .at_least(1)
        .collect::<String>();

    name.then_ignore(just('='))
        .then(value)
        .separated_by(just(';'))
        .allow_trailing()
        .at_least(1)
        .collect()
        .then_ignore(end())
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// ```
fn bywdaylist<'src, I, E>() -> impl Parser<'src, I, Vec<WeekDayNum>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    weekdaynum().separated_by(just(',')).at_least(1).collect()
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

/// ```txt
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn ordwk<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_4().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-49
        just('5').ignore_then(i8_0_3()).map(|a| 50 + a),  // 50-53
        just('0').ignore_then(i8_1_9()),                  // 01-09
        i8_1_9(),                                         // 1-9
    ))
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just("SU").to(WeekDay::Sunday),
        just("MO").to(WeekDay::Monday),
        just("TU").to(WeekDay::Tuesday),
        just("WE").to(WeekDay::Wednesday),
        just("TH").to(WeekDay::Thursday),
        just("FR").to(WeekDay::Friday),
        just("SA").to(WeekDay::Saturday),
    ))
}

/// ```txt
/// bymodaylist = ( monthdaynum *("," monthdaynum) )
/// ```
fn bymodaylist<'src, I, E>() -> impl Parser<'src, I, Vec<i8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    monthdaynum().separated_by(just(',')).at_least(1).collect()
}

/// ```txt
/// monthdaynum = [plus / minus] ordmoday
/// ```
fn monthdaynum<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordmoday())
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// ordmoday    = 1*2DIGIT       ;1 to 31
/// ```
fn ordmoday<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_2().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-29
        just('3').ignore_then(i8_0_1()).map(|a| 30 + a),  // 30-31
        just('0').or_not().ignore_then(i8_1_9()),         // 1-9 / 01-09
    ))
}

fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

/// Parse a positive u32 (1 or more digits)
fn u32_non_zero<'src, I, E>() -> impl Parser<'src, I, u32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits
        .collect::<String>()
        .try_map_with(|str, e| match lexical::parse::<u32, _>(&str) {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(E::Error::expected_found(
                [ValueExpected::PositiveU32],
                None,
                e.span(),
            )),
        })
}

define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_4 : i8 => { '1', '2', '3', '4' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
