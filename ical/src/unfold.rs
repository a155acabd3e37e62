// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content line unfolding as defined in RFC 5545 Section 3.1.
//!
//! Long content lines are split across physical lines by inserting a CRLF
//! immediately followed by a single linear white-space character (SPACE or
//! HTAB). Unfolding removes that sequence again.

use crate::parser::{MalformedReason, ParseError};

/// Join folded physical lines into logical lines.
///
/// Each input line may still carry its `\r\n` or `\n` terminator. A line
/// starting with SPACE or TAB is a continuation: its first character is
/// dropped and the rest is appended, without separator, to the preceding
/// logical line.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] if the first line is a continuation.
///
/// # Examples
///
/// ```
/// # use agenda_ical::unfold;
/// let lines = unfold(["DESCRIPTION:This is a lo\r\n", " ng description\r\n"]).unwrap();
/// assert_eq!(lines, vec!["DESCRIPTION:This is a long description"]);
/// ```
pub fn unfold<I, S>(lines: I) -> Result<Vec<String>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut logical: Vec<String> = Vec::new();
    for (i, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim_end_matches(['\r', '\n']);
        match line.strip_prefix([' ', '\t']) {
            Some(rest) => match logical.last_mut() {
                Some(last) => last.push_str(rest),
                None => {
                    return Err(ParseError::MalformedLine {
                        line: i + 1,
                        content: line.to_string(),
                        reason: MalformedReason::LeadingContinuation,
                    });
                }
            },
            None => logical.push(line.to_string()),
        }
    }
    Ok(logical)
}

/// Unfold a whole iCalendar text into logical lines.
///
/// Both CRLF and bare LF line endings are accepted.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] if the text starts with a
/// continuation line.
pub fn unfold_str(src: &str) -> Result<Vec<String>, ParseError> {
    unfold(src.split_inclusive('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolds_continuation_lines() {
        let src = "\
SUMMARY:Team\r
  meeting\r
DESCRIPTION:a\r
\tb\r
 c\r
END:VEVENT\r
";
        let lines = unfold_str(src).unwrap();
        assert_eq!(
            lines,
            vec!["SUMMARY:Team meeting", "DESCRIPTION:abc", "END:VEVENT"]
        );
    }

    #[test]
    fn strips_both_line_endings() {
        let lines = unfold(["A:1\r\n", "B:2\n", "C:3"]).unwrap();
        assert_eq!(lines, vec!["A:1", "B:2", "C:3"]);
    }

    #[test]
    fn keeps_empty_lines_as_logical_lines() {
        let lines = unfold_str("A:1\r\n\r\nB:2\r\n").unwrap();
        assert_eq!(lines, vec!["A:1", "", "B:2"]);
    }

    #[test]
    fn rejects_leading_continuation() {
        let err = unfold([" SUMMARY:x", "END:VEVENT"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine {
                line: 1,
                content: " SUMMARY:x".to_string(),
                reason: MalformedReason::LeadingContinuation,
            }
        );
    }

    #[test]
    fn unfolds_empty_input() {
        assert!(unfold_str("").unwrap().is_empty());
    }
}
