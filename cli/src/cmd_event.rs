// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use agenda_core::{Agenda, CalendarSync};
use clap::{ArgMatches, Command, arg};

use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{OutputFormat, now, parse_date};

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub from: Option<String>,
    pub to: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the events touching a date range, today by default")
            .arg(arg!(--from <DATE> "First day of the range, YYYY-MM-DD or today"))
            .arg(arg!(--to <DATE> "Last day of the range, defaults to the first day"))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            from: matches.get_one::<String>("from").cloned(),
            to: matches.get_one::<String>("to").cloned(),
            output_format: OutputFormat::from(matches),
        }
    }

    pub fn run<S: CalendarSync>(self, agenda: &Agenda<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let now = now();
        let today = now.date();

        let range_start = match &self.from {
            Some(from) => parse_date(today, from)?,
            None => today,
        };
        let range_end = match &self.to {
            Some(to) => parse_date(today, to)?,
            None => range_start,
        };

        let items = agenda.events(range_start, range_end)?;
        let columns = match self.output_format {
            OutputFormat::Table => vec![
                EventColumn::TimeSpan,
                EventColumn::Summary,
                EventColumn::Calendar,
            ],
            OutputFormat::Json => vec![
                EventColumn::Calendar,
                EventColumn::Summary,
                EventColumn::Start,
                EventColumn::End,
                EventColumn::Uid,
            ],
        };
        let formatter = EventFormatter::new(now, columns).with_output_format(self.output_format);

        if items.is_empty() && self.output_format == OutputFormat::Table {
            println!("No events between {range_start} and {range_end}");
        } else {
            println!("{}", formatter.format(&items));
        }
        Ok(())
    }
}
