// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use agenda_core::{Agenda, CalendarSync};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::util::now;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdDashboard;

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show the status and the events of today")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDashboard
    }

    /// Show the status label followed by today's menu lines.
    pub fn run<S: CalendarSync>(self, agenda: &Agenda<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");
        let now = now();

        println!("🗓️ {}", agenda.status(now).to_string().bold());

        let items = agenda.events_today(now);
        if items.is_empty() {
            println!("No events today");
            return Ok(());
        }

        println!(" {} {}", "►".green(), "Today".italic());
        for item in &items {
            if item.end <= now {
                println!("{}", item.to_string().bright_black());
            } else {
                println!("{item}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashboard() {
        let cmd = Command::new("test").subcommand(CmdDashboard::command());
        let matches = cmd.try_get_matches_from(["test", "dashboard"]).unwrap();
        let _ = CmdDashboard::from(&matches);
    }
}
