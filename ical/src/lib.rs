// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, represent and format iCalendar (RFC 5545) documents.
//!
//! Parsing happens in two steps: folded physical lines are joined into
//! logical lines by [`unfold`], then [`parse_lines`] builds a tree of
//! [`Component`]s from the `BEGIN`/`END` blocks. Property values stay raw
//! text; the [`value`] module interprets dates and recurrence rules.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod component;
pub mod formatter;
pub mod keyword;
mod parser;
mod unfold;
pub mod value;

pub use crate::component::{Component, Document, Entry, Parameters, Property, is_multi_valued};
pub use crate::formatter::{FormatOptions, FoldingStyle, Formatter, fold, format};
pub use crate::parser::{BlockMismatch, MalformedReason, ParseError, parse, parse_lines};
pub use crate::unfold::{unfold, unfold_str};
pub use crate::value::{
    DateOrDateTime, Frequency, RecurrenceRule, ValueError, WeekDay, WeekDayNum, parse_date_list,
    parse_date_or_date_time, parse_rrule,
};
