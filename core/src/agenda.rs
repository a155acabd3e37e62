// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;

use agenda_ical::Document;
use jiff::SignedDuration;
use jiff::civil::{Date, DateTime};

use crate::io::read_document;
use crate::{
    CalendarSource, CalendarSync, Config, Event, NoSync, ResolveError, extract_events, occurrences,
};

/// Calendar agenda: the configured calendars, parsed and cached.
///
/// Queries resolve against the cached documents; files are only read again
/// by [`Agenda::reload`] and [`Agenda::sync`].
#[derive(Debug)]
pub struct Agenda<S = NoSync> {
    config: Config,
    calendars: Vec<Calendar>,
    syncer: S,
}

#[derive(Debug)]
struct Calendar {
    source: CalendarSource,
    document: Document,
}

impl Agenda<NoSync> {
    /// Creates a new agenda without remote synchronization.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        Self::with_sync(config, NoSync).await
    }
}

impl<S: CalendarSync> Agenda<S> {
    /// Creates a new agenda and loads every configured calendar.
    ///
    /// Calendars that cannot be loaded are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn with_sync(mut config: Config, syncer: S) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;

        let mut that = Self {
            config,
            calendars: Vec::new(),
            syncer,
        };
        that.reload().await;
        Ok(that)
    }

    /// The normalized configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The synchronization collaborator.
    pub fn syncer(&self) -> &S {
        &self.syncer
    }

    /// The loaded calendars with their parsed documents, in configuration order.
    pub fn calendars(&self) -> impl Iterator<Item = (&CalendarSource, &Document)> {
        self.calendars.iter().map(|c| (&c.source, &c.document))
    }

    /// Read every calendar file again.
    ///
    /// A file that cannot be read is synchronized once, when its source has a
    /// URL, and read again. Calendars that still fail are skipped.
    #[tracing::instrument(skip(self))]
    pub async fn reload(&mut self) {
        let mut calendars = Vec::with_capacity(self.config.calendars.len());
        for source in &self.config.calendars {
            if let Some(document) = self.load(source).await {
                calendars.push(Calendar {
                    source: source.clone(),
                    document,
                });
            }
        }
        tracing::debug!(count = calendars.len(), "calendars loaded");
        self.calendars = calendars;
    }

    async fn load(&self, source: &CalendarSource) -> Option<Document> {
        match read_document(&source.path).await {
            Ok(document) => return Some(document),
            Err(err) if err.is_unreadable() && source.url.is_some() => {
                tracing::debug!(calendar = %source.name, %err, "calendar unreadable, syncing");
                if let Err(err) = self.syncer.sync(source).await {
                    tracing::error!(calendar = %source.name, %err, "failed to sync calendar");
                    return None;
                }
            }
            Err(err) => {
                tracing::warn!(calendar = %source.name, %err, "calendar not loaded");
                return None;
            }
        }

        match read_document(&source.path).await {
            Ok(document) => Some(document),
            Err(err) => {
                tracing::warn!(calendar = %source.name, %err, "calendar not loaded");
                None
            }
        }
    }

    /// Refresh every calendar that has a URL, then reload all calendars.
    ///
    /// # Errors
    ///
    /// Returns an error naming the calendars that failed to synchronize; the
    /// others are reloaded regardless.
    #[tracing::instrument(skip(self))]
    pub async fn sync(&mut self) -> Result<(), Box<dyn Error>> {
        let mut failed = Vec::new();
        for source in self.config.calendars.iter().filter(|c| c.url.is_some()) {
            tracing::debug!(calendar = %source.name, "syncing calendar");
            if let Err(err) = self.syncer.sync(source).await {
                tracing::error!(calendar = %source.name, %err, "failed to sync calendar");
                failed.push(source.name.as_str());
            }
        }
        let failed = failed.join(", ");

        self.reload().await;
        if failed.is_empty() {
            Ok(())
        } else {
            Err(format!("Failed to sync calendars: {failed}").into())
        }
    }

    /// Every occurrence touching `[range_start, range_end]`, sorted by start.
    ///
    /// Events that cannot be resolved are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ContractViolation`] if `range_start > range_end`.
    pub fn events(
        &self,
        range_start: Date,
        range_end: Date,
    ) -> Result<Vec<AgendaItem<'_>>, ResolveError> {
        if range_start > range_end {
            return Err(ResolveError::ContractViolation {
                start: range_start,
                end: range_end,
            });
        }

        let mut items = Vec::new();
        for calendar in &self.calendars {
            for event in extract_events(&calendar.document) {
                match occurrences(&event, range_start, range_end) {
                    Ok(list) => items.extend(list.into_iter().map(|o| AgendaItem {
                        calendar: &calendar.source.name,
                        event: o.event,
                        start: o.start,
                        end: o.end,
                    })),
                    Err(err) => tracing::warn!(
                        calendar = %calendar.source.name,
                        summary = event.summary(),
                        %err,
                        "skipping event"
                    ),
                }
            }
        }
        items.sort_by_key(|item| item.start);
        Ok(items)
    }

    /// Every occurrence touching the day of `now`, sorted by start.
    pub fn events_today(&self, now: DateTime) -> Vec<AgendaItem<'_>> {
        let today = now.date();
        self.events(today, today).unwrap_or_default()
    }

    /// The status of the agenda at `now`.
    ///
    /// The current event is reported only if `show_remaining` is enabled;
    /// otherwise, or if nothing is going on, the next event of the day is.
    pub fn status(&self, now: DateTime) -> Status<'_> {
        let items = self.events_today(now);

        if self.config.show_remaining
            && let Some(item) = items.iter().rev().find(|i| i.start < now && now < i.end)
        {
            return Status::Current {
                summary: item.summary(),
                remaining: now.duration_until(item.end),
            };
        }

        match items.iter().find(|i| i.start > now) {
            Some(item) => Status::Next {
                summary: item.summary(),
                until: now.duration_until(item.start),
            },
            None => Status::Idle,
        }
    }
}

/// An occurrence of an event, together with the calendar it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaItem<'a> {
    /// Name of the calendar.
    pub calendar: &'a str,

    /// The event this is an instance of.
    pub event: Event<'a>,

    /// Start of the instance.
    pub start: DateTime,

    /// End of the instance.
    pub end: DateTime,
}

impl<'a> AgendaItem<'a> {
    /// The summary of the event.
    pub fn summary(&self) -> &'a str {
        self.event.summary()
    }
}

/// Menu line of the item: `HH:MM - HH:MM\t<summary>`.
impl fmt::Display for AgendaItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}\t{}",
            self.start.strftime("%H:%M"),
            self.end.strftime("%H:%M"),
            self.summary()
        )
    }
}

/// What the agenda is up to at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<'a> {
    /// An event is going on.
    Current {
        /// Summary of the event
        summary: &'a str,
        /// Time until it ends
        remaining: SignedDuration,
    },

    /// An event starts later today.
    Next {
        /// Summary of the event
        summary: &'a str,
        /// Time until it starts
        until: SignedDuration,
    },

    /// Nothing is left today.
    Idle,
}

/// Indicator label of the status.
impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Current { summary, remaining } => {
                write!(f, "{summary} for {}", HoursMinutes(*remaining))
            }
            Status::Next { summary, until } => write!(f, "{summary} in {}", HoursMinutes(*until)),
            Status::Idle => write!(f, "No more events"),
        }
    }
}

/// A duration as `HH:MM`, truncated to whole minutes.
struct HoursMinutes(SignedDuration);

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.as_secs().max(0) / 60;
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
