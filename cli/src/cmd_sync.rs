// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use agenda_core::{Agenda, CalendarSync};
use clap::{ArgMatches, Command};
use colored::Colorize;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdSync;

impl CmdSync {
    pub const NAME: &str = "sync";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Refresh every calendar that has a URL")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdSync
    }

    pub async fn run<S: CalendarSync>(self, agenda: &mut Agenda<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "syncing calendars...");
        agenda.sync().await?;

        let count = agenda.calendars().count();
        println!("{} {count} calendar(s) loaded", "Synced:".green());
        Ok(())
    }
}
