// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use agenda_core::AgendaItem;
use colored::Color;
use jiff::civil::DateTime;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, format_datetime};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    now: DateTime,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(now: DateTime, columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            now,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, items: &'a [AgendaItem<'a>]) -> Display<'a> {
        Display {
            items,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    items: &'a [AgendaItem<'a>],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .formatter
            .columns
            .iter()
            .map(|column| Column {
                column,
                now: self.formatter.now,
            })
            .collect::<Vec<_>>();

        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &columns, self.items)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), &columns, self.items)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Calendar,
    Start,
    End,
    Summary,
    TimeSpan,
    Uid,
}

impl EventColumn {
    pub fn name(self) -> &'static str {
        match self {
            EventColumn::Calendar => "Calendar",
            EventColumn::Start => "Start",
            EventColumn::End => "End",
            EventColumn::Summary => "Summary",
            EventColumn::TimeSpan => "Time Span",
            EventColumn::Uid => "UID",
        }
    }
}

/// An [`EventColumn`] bound to the time the table is rendered at.
struct Column<'a> {
    column: &'a EventColumn,
    now: DateTime,
}

impl<'a> TableColumn<AgendaItem<'a>> for Column<'_> {
    fn name(&self) -> Cow<'_, str> {
        self.column.name().into()
    }

    fn format<'b>(&self, item: &'b AgendaItem<'a>) -> Cow<'b, str> {
        let today = self.now.date();
        match self.column {
            EventColumn::Calendar => item.calendar.into(),
            EventColumn::Start => item.start.strftime("%Y-%m-%dT%H:%M:%S").to_string().into(),
            EventColumn::End => item.end.strftime("%Y-%m-%dT%H:%M:%S").to_string().into(),
            EventColumn::Summary => item.summary().into(),
            EventColumn::TimeSpan => {
                if item.start.date() == item.end.date() {
                    format!(
                        "{}~{}",
                        format_datetime(today, item.start),
                        item.end.strftime("%H:%M")
                    )
                } else {
                    format!(
                        "{}~{}",
                        format_datetime(today, item.start),
                        format_datetime(today, item.end)
                    )
                }
                .into()
            }
            EventColumn::Uid => item.event.uid().unwrap_or_default().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self.column {
            EventColumn::TimeSpan => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, item: &AgendaItem<'a>) -> Option<Color> {
        match self.column {
            EventColumn::TimeSpan if item.end <= self.now => Some(Color::BrightBlack),
            EventColumn::TimeSpan if item.start <= self.now => Some(Color::Green),
            _ => None,
        }
    }
}
