// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::mem;

use crate::component::{Component, Document, Parameters, Property};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::unfold::unfold_str;

/// Parse an iCalendar document from source text.
///
/// The text is unfolded, every logical line is trimmed and blank lines are
/// skipped. The returned document's root has an empty name and holds the
/// top-level blocks, normally a single `VCALENDAR`.
///
/// ## Errors
///
/// Structural errors abort the whole document, no partial result is
/// returned. See [`ParseError`].
///
/// ## Examples
///
/// Parsing valid iCalendar source will return the document
///
/// ```
/// # use agenda_ical::parse;
/// let ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let doc = parse(ical_src).unwrap();
/// let event = &doc.calendars()[0].children("VEVENT")[0];
/// assert_eq!(event.value("SUMMARY"), Some("Test Event"));
/// ```
///
/// Parsing invalid iCalendar source will return the first error
///
/// ```
/// # use agenda_ical::{ParseError, parse};
/// let invalid_ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// END:VEVENT\r\n\
/// ";
/// let err = parse(invalid_ical_src).unwrap_err();
/// assert!(matches!(err, ParseError::MismatchedBlock { .. }));
/// eprintln!("{err}");
/// ```
pub fn parse(src: &str) -> Result<Document, ParseError> {
    let lines = unfold_str(src)?;
    parse_lines(&lines).map(Document::new)
}

/// Parse the logical lines of one nesting scope into a component with an
/// empty name.
///
/// Lines are trimmed and blank lines skipped; line numbers in errors count
/// the given lines from 1.
///
/// # Errors
///
/// See [`ParseError`].
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Component, ParseError> {
    let lines = lines
        .iter()
        .enumerate()
        .map(|(i, text)| Line {
            number: i + 1,
            text: text.as_ref().trim(),
        })
        .filter(|line| !line.text.is_empty())
        .collect::<Vec<_>>();

    parse_scope("", &lines)
}

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

/// Recursive descent over one scope: lines of nested blocks are buffered
/// until the block closes, then parsed into a child by a recursive call.
fn parse_scope(name: &str, lines: &[Line<'_>]) -> Result<Component, ParseError> {
    let mut component = Component::new(name);
    let mut depth = 0_usize;
    let mut open: Option<(&str, usize)> = None; // active child name, BEGIN line
    let mut buffer: Vec<Line<'_>> = Vec::new();

    for &line in lines {
        let (key, value) = split_content_line(line)?;
        let (prop_name, params) = split_key(key);

        if prop_name.eq_ignore_ascii_case(KW_BEGIN) {
            depth += 1;
            if depth == 1 {
                open = Some((value.trim(), line.number));
                buffer.clear();
            } else {
                buffer.push(line);
            }
        } else if prop_name.eq_ignore_ascii_case(KW_END) {
            let found = value.trim();
            let Some(d) = depth.checked_sub(1) else {
                return Err(ParseError::MismatchedBlock {
                    line: line.number,
                    kind: BlockMismatch::UnmatchedEnd {
                        name: found.to_string(),
                    },
                });
            };
            depth = d;

            if depth > 0 {
                buffer.push(line);
                continue;
            }

            let (expected, _) = open.take().unwrap_or_default();
            if !expected.eq_ignore_ascii_case(found) {
                return Err(ParseError::MismatchedBlock {
                    line: line.number,
                    kind: BlockMismatch::WrongEnd {
                        expected: expected.to_ascii_uppercase(),
                        found: found.to_string(),
                    },
                });
            }

            let child = parse_scope(expected, &mem::take(&mut buffer))?;
            component.push_child(child);
        } else if depth == 0 {
            let params = parse_params(line, params)?;
            let property = Property {
                params,
                value: value.to_string(),
            };
            component.push_property(prop_name, property);
        } else {
            buffer.push(line);
        }
    }

    match open {
        Some((name, number)) if depth > 0 => Err(ParseError::MismatchedBlock {
            line: number,
            kind: BlockMismatch::Unclosed {
                name: name.to_ascii_uppercase(),
            },
        }),
        _ => Ok(component),
    }
}

/// Split a content line at the first colon that is not inside a quoted
/// parameter value.
fn split_content_line(line: Line<'_>) -> Result<(&str, &str), ParseError> {
    let mut quoted = false;
    for (i, c) in line.text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ':' if !quoted => {
                let (key, value) = line.text.split_at(i);
                let key = key.trim_end();
                if key.is_empty() {
                    return Err(ParseError::malformed(line, MalformedReason::EmptyName));
                }
                return Ok((key, value.get(1..).unwrap_or_default()));
            }
            _ => {}
        }
    }
    Err(ParseError::malformed(line, MalformedReason::MissingColon))
}

/// Split `NAME;P1=a;P2=b` into the name and the unparsed parameter segments.
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let mut segments = split_unquoted(key, ';').into_iter();
    let name = segments.next().unwrap_or_default();
    (name.trim(), segments.collect())
}

fn parse_params(line: Line<'_>, segments: Vec<&str>) -> Result<Parameters, ParseError> {
    let mut params = Parameters::new();
    for segment in segments {
        let Some((name, values)) = segment.split_once('=') else {
            return Err(ParseError::malformed(line, MalformedReason::InvalidParameter));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::malformed(line, MalformedReason::InvalidParameter));
        }

        let values = split_unquoted(values, ',')
            .into_iter()
            .map(|v| unquote(v.trim()).to_string());
        params
            .entry(name.to_ascii_uppercase())
            .or_default()
            .extend(values);
    }
    Ok(params)
}

#[expect(clippy::indexing_slicing)]
fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if c == sep && !quoted {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Errors that can occur during parsing.
///
/// Line numbers refer to logical (unfolded) lines counted from 1, except for
/// [`MalformedReason::LeadingContinuation`] which counts physical lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A content line that cannot be split into name, parameters and value.
    #[error("malformed line {line} ({reason}): {content:?}")]
    MalformedLine {
        /// Line number
        line: usize,
        /// The offending line
        content: String,
        /// What is wrong with it
        reason: MalformedReason,
    },

    /// `BEGIN` and `END` lines do not pair up.
    #[error("mismatched block at line {line}: {kind}")]
    MismatchedBlock {
        /// Line number of the `END`, or of the `BEGIN` of an unclosed block
        line: usize,
        /// How the blocks mismatch
        kind: BlockMismatch,
    },
}

impl ParseError {
    fn malformed(line: Line<'_>, reason: MalformedReason) -> Self {
        Self::MalformedLine {
            line: line.number,
            content: line.text.to_string(),
            reason,
        }
    }

    /// The line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedLine { line, .. } | Self::MismatchedBlock { line, .. } => *line,
        }
    }
}

/// Why a content line is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// No colon separates the name from the value.
    #[error("missing ':' separator")]
    MissingColon,

    /// Nothing precedes the colon.
    #[error("empty property name")]
    EmptyName,

    /// A parameter is not of the form `NAME=value`.
    #[error("parameter without '='")]
    InvalidParameter,

    /// The text starts with a folded continuation line.
    #[error("continuation line without a preceding line")]
    LeadingContinuation,
}

/// How `BEGIN` and `END` lines fail to pair up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockMismatch {
    /// The `END` names a different block than the open one.
    #[error("expected END:{expected}, found END:{found}")]
    WrongEnd {
        /// Name of the open block
        expected: String,
        /// Name on the `END` line
        found: String,
    },

    /// An `END` with no open block.
    #[error("END:{name} without a matching BEGIN")]
    UnmatchedEnd {
        /// Name on the `END` line
        name: String,
    },

    /// A `BEGIN` that is never closed.
    #[error("BEGIN:{name} is never closed")]
    Unclosed {
        /// Name on the `BEGIN` line
        name: String,
    },
}
