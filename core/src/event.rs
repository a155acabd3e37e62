// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use agenda_ical::keyword::{
    KW_DESCRIPTION, KW_DTEND, KW_DTSTART, KW_EXDATE, KW_LOCATION, KW_RRULE, KW_SUMMARY, KW_UID,
    KW_VCALENDAR, KW_VEVENT,
};
use agenda_ical::{Component, DateOrDateTime, Document, RecurrenceRule, parse_date_list, parse_rrule};

use crate::ResolveError;

/// A calendar event, borrowed from a `VEVENT` component of a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    component: &'a Component,
}

impl<'a> Event<'a> {
    /// Wrap a `VEVENT` component.
    #[must_use]
    pub const fn new(component: &'a Component) -> Self {
        Self { component }
    }

    /// The underlying component.
    #[must_use]
    pub const fn component(&self) -> &'a Component {
        self.component
    }

    /// The summary of the event, empty if absent.
    #[must_use]
    pub fn summary(&self) -> &'a str {
        self.component.value(KW_SUMMARY).unwrap_or_default()
    }

    /// The unique identifier for the event, if available.
    #[must_use]
    pub fn uid(&self) -> Option<&'a str> {
        self.component.value(KW_UID)
    }

    /// The description of the event, if available.
    #[must_use]
    pub fn description(&self) -> Option<&'a str> {
        self.component.value(KW_DESCRIPTION)
    }

    /// The location of the event, if available.
    #[must_use]
    pub fn location(&self) -> Option<&'a str> {
        self.component.value(KW_LOCATION)
    }

    /// Whether the event carries at least one `RRULE`.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !self.component.properties(KW_RRULE).is_empty()
    }

    /// The first `DTSTART` of the event.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidEvent`] if it is missing or malformed.
    pub fn start(&self) -> Result<DateOrDateTime, ResolveError> {
        self.date_property(KW_DTSTART)
    }

    /// The first `DTEND` of the event.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidEvent`] if it is missing or malformed.
    pub fn end(&self) -> Result<DateOrDateTime, ResolveError> {
        self.date_property(KW_DTEND)
    }

    /// Every `RRULE` of the event, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedRecurrence`] for the first rule that
    /// is malformed or uses parts outside the supported subset.
    pub fn rules(&self) -> Result<Vec<RecurrenceRule>, ResolveError> {
        self.component
            .properties(KW_RRULE)
            .iter()
            .map(|prop| parse_rrule(&prop.value).map_err(ResolveError::from))
            .collect()
    }

    /// Every excluded date of the event, across all `EXDATE` properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidEvent`] if a value is malformed.
    pub fn exdates(&self) -> Result<Vec<DateOrDateTime>, ResolveError> {
        let mut dates = Vec::new();
        for prop in self.component.properties(KW_EXDATE) {
            let list = parse_date_list(&prop.value)
                .map_err(|e| ResolveError::invalid(format!("{KW_EXDATE}: {e}")))?;
            dates.extend(list);
        }
        Ok(dates)
    }

    fn date_property(&self, name: &str) -> Result<DateOrDateTime, ResolveError> {
        let value = self
            .component
            .value(name)
            .ok_or_else(|| ResolveError::invalid(format!("missing {name}")))?;
        value
            .parse()
            .map_err(|e| ResolveError::invalid(format!("{name}: {e}")))
    }
}

/// Collect the events of a document.
///
/// Only `VEVENT` blocks directly inside a top-level `VCALENDAR` are returned,
/// in document order.
#[must_use]
pub fn extract_events(doc: &Document) -> Vec<Event<'_>> {
    doc.root()
        .children(KW_VCALENDAR)
        .iter()
        .flat_map(|cal| cal.children(KW_VEVENT))
        .map(Event::new)
        .collect()
}
