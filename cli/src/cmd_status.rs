// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use agenda_core::{Agenda, CalendarSync};
use clap::{ArgMatches, Command};

use crate::util::now;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdStatus;

impl CmdStatus {
    pub const NAME: &str = "status";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the current or next event of today, suitable for a status bar")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdStatus
    }

    pub fn run<S: CalendarSync>(self, agenda: &Agenda<S>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "printing status...");
        println!("{}", agenda.status(now()));
        Ok(())
    }
}
