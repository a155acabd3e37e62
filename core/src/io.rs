// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use agenda_ical::{Document, parse};
use tokio::fs;

use crate::SourceError;

/// Read and parse an iCalendar file.
///
/// # Errors
///
/// Returns [`SourceError::Unreadable`] if the file cannot be read and
/// [`SourceError::Parse`] if it is not a well-formed iCalendar document.
#[tracing::instrument]
pub async fn read_document(path: &Path) -> Result<Document, SourceError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Unreadable {
            path: path.to_owned(),
            source,
        })?;

    let doc = parse(&content).map_err(|source| SourceError::Parse {
        path: path.to_owned(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        calendars = doc.calendars().len(),
        "parsed calendar file"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_document_parses_file() {
        // Arrange
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("calendar.ics");
        let ics_content = "BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VEVENT\r
SUMMARY:Single Event\r
DTSTART:20250115T100000\r
DTEND:20250115T110000\r
END:VEVENT\r
END:VCALENDAR\r
";
        fs::write(&path, ics_content)
            .await
            .expect("Failed to write test file");

        // Act
        let doc = read_document(&path).await.expect("Failed to read calendar");

        // Assert
        let events = doc.calendars()[0].children("VEVENT");
        assert_eq!(events[0].value("SUMMARY"), Some("Single Event"));
    }

    #[tokio::test]
    async fn read_document_reports_missing_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing.ics");

        let err = read_document(&path).await.unwrap_err();
        assert!(err.is_unreadable());
        assert!(err.to_string().contains("missing.ics"));
    }

    #[tokio::test]
    async fn read_document_reports_parse_errors() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("broken.ics");
        fs::write(&path, "BEGIN:VCALENDAR\r\nFOOBAR\r\nEND:VCALENDAR\r\n")
            .await
            .expect("Failed to write test file");

        let err = read_document(&path).await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }
}
