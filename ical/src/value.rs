// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed parsing of the property values the agenda interprets.
//!
//! The document model keeps every value as raw text. The parsers in this
//! module turn the DATE / DATE-TIME values of RFC 5545 Section 3.3.4 and
//! 3.3.5 and the recurrence rules of Section 3.3.10 into typed values.

use std::borrow::Cow;

use chumsky::error::{Rich, RichPattern};

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        const fn $fname<'src, I, E>() -> impl chumsky::Parser<'src, I, $ty, E> + Copy
        where
            I: chumsky::input::Input<'src, Token = char, Span = chumsky::span::SimpleSpan>,
            E: chumsky::extra::ParserExtra<'src, I>,
        {
            chumsky::select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

mod datetime;
mod rrule;

pub use datetime::{DateOrDateTime, parse_date_list, parse_date_or_date_time};
pub use rrule::{Frequency, RecurrenceRule, WeekDay, WeekDayNum, parse_rrule};

/// Errors raised while interpreting a property value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value does not follow the grammar of its value type.
    #[error("invalid {kind} value '{value}': {reason}")]
    Syntax {
        /// Name of the expected value type
        kind: &'static str,
        /// The offending value
        value: String,
        /// What went wrong
        reason: String,
    },

    /// The recurrence rule uses a part or frequency outside the supported subset.
    #[error("unsupported recurrence rule part '{part}'")]
    Unsupported {
        /// The rule part, as `NAME=VALUE`
        part: String,
    },

    /// A recurrence rule part appears more than once.
    #[error("recurrence rule part '{part}' appears more than once")]
    DuplicatePart {
        /// Name of the repeated part
        part: String,
    },

    /// The recurrence rule has no FREQ part.
    #[error("recurrence rule has no FREQ part")]
    MissingFreq,

    /// The recurrence rule has both COUNT and UNTIL.
    #[error("recurrence rule must not have both COUNT and UNTIL")]
    CountWithUntil,
}

impl ValueError {
    pub(crate) fn syntax(kind: &'static str, value: &str, errs: &[Rich<'_, char>]) -> Self {
        let reason = errs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Syntax {
            kind,
            value: value.to_string(),
            reason,
        }
    }
}

/// Failure reasons when a specific value was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A calendar date that exists was expected
    Date,
    /// A positive 32-bit integer was expected
    PositiveU32,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::PositiveU32 => Self::Label(Cow::Borrowed("positive integer")),
        }
    }
}
