// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use agenda_core::io::read_document;
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};

#[derive(Debug, Clone)]
pub struct CmdDump {
    pub path: PathBuf,
}

impl CmdDump {
    pub const NAME: &str = "dump";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the components of an iCalendar file as JSON")
            .arg(
                arg!(<FILE> "Path to the iCalendar file")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let path = matches
            .get_one::<PathBuf>("FILE")
            .cloned()
            .unwrap_or_default();
        Self { path }
    }

    /// Parse the file and print its document model, without resolving events.
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "dumping calendar...");
        println!("{}", self.dump().await?);
        Ok(())
    }

    async fn dump(&self) -> Result<String, Box<dyn Error>> {
        let document = read_document(&self.path).await?;
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
