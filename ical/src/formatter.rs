// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! Writes a [`Document`] back to the RFC 5545 text format, to any
//! `std::io::Write` implementer, folding long content lines.
//!
//! # Example
//!
//! ```
//! use agenda_ical::{format, parse};
//!
//! let doc = parse("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n").unwrap();
//! let ics = format(&doc).unwrap();
//! assert_eq!(ics, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
//! ```

use std::io::{self, Write};

use crate::component::{Component, Document, Property};
use crate::keyword::{KW_BEGIN, KW_END};

/// Format a [`Document`] to a `String` with default options.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(doc: &Document) -> io::Result<String> {
    FormatOptions::default().write_to_string(doc)
}

/// Fold a single logical line into physical lines of at most `width` octets.
///
/// Continuation lines start with a single SPACE and multi-byte UTF-8
/// sequences are never split. The result has no trailing line break.
///
/// ```
/// # use agenda_ical::{fold, unfold_str};
/// let line = format!("DESCRIPTION:{}", "x".repeat(100));
/// let folded = fold(&line, 75);
/// assert!(folded.split("\r\n").all(|l| l.len() <= 75));
/// assert_eq!(unfold_str(&folded).unwrap(), vec![line]);
/// ```
#[must_use]
pub fn fold(line: &str, width: usize) -> String {
    let options = FormatOptions::default().folding(Some(width));
    let mut buffer = Vec::new();
    let mut formatter = Formatter::new(&mut buffer, options);
    if formatter.write_all(line.as_bytes()).is_err() {
        return line.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| line.to_string())
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write a [`Document`] to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, doc: &Document, w: &mut impl Write) -> io::Result<()> {
        Formatter::new(w, *self).write_document(doc)
    }

    /// Write a [`Document`] to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, doc: &Document) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(doc, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }
}

/// Length of the whitespace that starts a continuation line.
const CONTINUATION_LEN: usize = 1;

/// iCalendar formatter that writes to any `Write` implementer.
///
/// Bytes written through its `Write` implementation are folded; line breaks
/// between content lines are inserted with [`Formatter::writeln`].
#[derive(Debug)]
pub struct Formatter<W: Write> {
    writer: W,
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write every top-level block of a document.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_document(&mut self, doc: &Document) -> io::Result<()> {
        let root = doc.root();
        self.write_body(root)
    }

    /// Write a component as a `BEGIN`/`END` block.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_component(&mut self, component: &Component) -> io::Result<()> {
        write!(self, "{KW_BEGIN}:{}", component.name())?;
        self.writeln()?;
        self.write_body(component)?;
        write!(self, "{KW_END}:{}", component.name())?;
        self.writeln()
    }

    fn write_body(&mut self, component: &Component) -> io::Result<()> {
        for (name, props) in component.iter_properties() {
            for prop in props {
                self.write_property(name, prop)?;
            }
        }
        for (_, children) in component.iter_children() {
            for child in children {
                self.write_component(child)?;
            }
        }
        Ok(())
    }

    /// Write one content line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&mut self, name: &str, prop: &Property) -> io::Result<()> {
        write!(self, "{name}")?;
        for (param, values) in &prop.params {
            write!(self, ";{param}=")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(self, ",")?;
                }
                if value.contains([':', ';', ',']) {
                    write!(self, "\"{value}\"")?;
                } else {
                    write!(self, "{value}")?;
                }
            }
        }
        write!(self, ":{}", prop.value)?;
        self.writeln()
    }

    /// Write a CRLF line ending.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer
            .write_all(self.options.folding_style.as_bytes())?;
        self.line_length = CONTINUATION_LEN;
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            return self.writer.write(buf);
        };

        let mut remaining = buf;
        #[expect(clippy::indexing_slicing)]
        while !remaining.is_empty() {
            if self.line_length >= max_len {
                self.insert_fold()?;
            }

            let available = max_len.saturating_sub(self.line_length);
            let mut n = find_safe_write_length(remaining, available);
            if n == 0 {
                if self.line_length > CONTINUATION_LEN {
                    // The next character does not fit, continue on a new line
                    self.insert_fold()?;
                    continue;
                }
                // Width too small for a single character, write it anyway
                n = char_length(remaining);
            }

            self.writer.write_all(&remaining[..n])?;
            self.line_length += n;
            remaining = &remaining[n..];
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Find the maximum number of bytes we can write without breaking a UTF-8 sequence.
///
/// UTF-8 encoding:
/// - 0xxxxxxx: 1 byte (ASCII)
/// - 110xxxxx: 2 bytes (starts with 0b110xxxxx)
/// - 1110xxxx: 3 bytes (starts with 0b1110xxxx)
/// - 11110xxx: 4 bytes (starts with 0b11110xxx)
/// - 10xxxxxx: continuation byte (not a start byte)
#[expect(clippy::indexing_slicing)]
fn find_safe_write_length(buf: &[u8], max_bytes: usize) -> usize {
    if max_bytes >= buf.len() {
        return buf.len();
    }

    // Move back while the byte at the cut is a continuation byte
    let mut pos = max_bytes;
    while pos > 0 && (buf[pos] & 0xC0) == 0x80 {
        pos -= 1;
    }
    pos
}

/// Length of the UTF-8 sequence starting the buffer.
fn char_length(buf: &[u8]) -> usize {
    let len = match buf.first() {
        Some(b) if b & 0x80 == 0 => 1,
        Some(b) if b & 0xE0 == 0xC0 => 2,
        Some(b) if b & 0xF0 == 0xE0 => 3,
        Some(_) => 4,
        None => 0,
    };
    len.min(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::unfold::unfold_str;

    #[test]
    fn folds_long_lines_at_75_octets() {
        let line = format!("SUMMARY:{}", "a".repeat(200));
        let folded = fold(&line, 75);

        let physical = folded.split("\r\n").collect::<Vec<_>>();
        assert_eq!(physical.len(), 3);
        assert!(physical.iter().all(|l| l.len() <= 75));
        assert!(physical.iter().skip(1).all(|l| l.starts_with(' ')));
        assert_eq!(unfold_str(&folded).unwrap(), vec![line]);
    }

    #[test]
    fn keeps_short_lines() {
        assert_eq!(fold("SUMMARY:Foo", 75), "SUMMARY:Foo");
    }

    #[test]
    fn never_splits_multi_byte_characters() {
        let line = format!("SUMMARY:{}", "日本語".repeat(20));
        let folded = fold(&line, 10);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 10, "{physical:?} is too long");
        }
        assert_eq!(unfold_str(&folded).unwrap(), vec![line]);
    }

    #[test]
    fn folds_with_tabs() {
        let options = FormatOptions::default()
            .folding(Some(10))
            .folding_style(FoldingStyle::Tab);
        let mut buffer = Vec::new();
        let mut formatter = Formatter::new(&mut buffer, options);
        formatter.write_all(b"SUMMARY:0123456789").unwrap();
        drop(formatter);
        assert_eq!(buffer, b"SUMMARY:01\r\n\t23456789");
    }

    #[test]
    fn formats_document() {
        let src = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VEVENT\r
DTSTART;TZID=Europe/Berlin:20240101T090000\r
SUMMARY:Foo\r
END:VEVENT\r
END:VCALENDAR\r
";
        let doc = parse(src).unwrap();
        let ics = format(&doc).unwrap();
        assert_eq!(ics, src);
    }

    #[test]
    fn quotes_parameter_values_when_needed() {
        let src = "ATTENDEE;CN=\"Doe, John\":mailto:jd@example.com\r\n";
        let doc = parse(src).unwrap();
        assert_eq!(format(&doc).unwrap(), src);
    }

    #[test]
    fn formatted_document_parses_back() {
        let src = format!(
            "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDESCRIPTION:{}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
            "long text ".repeat(30)
        );
        let doc = parse(&src).unwrap();
        let ics = format(&doc).unwrap();
        assert!(ics.split("\r\n").all(|l| l.len() <= 75));
        assert_eq!(parse(&ics).unwrap(), doc);
    }

    #[test]
    fn writes_without_folding() {
        let line = "x".repeat(100);
        let options = FormatOptions::default().folding(None);
        let mut buffer = Vec::new();
        let mut formatter = Formatter::new(&mut buffer, options);
        formatter.write_all(line.as_bytes()).unwrap();
        drop(formatter);
        assert_eq!(buffer, line.as_bytes());
    }
}
