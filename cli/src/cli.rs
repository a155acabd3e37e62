// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use agenda_core::{APP_NAME, Agenda, FileSync};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_dump::CmdDump;
use crate::cmd_event::CmdEventList;
use crate::cmd_status::CmdStatus;
use crate::cmd_sync::CmdSync;
use crate::config::parse_config;

/// Run the agenda command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Which of your calendar events happen today, from plain iCalendar files.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/unifiedagenda/config.toml on Linux \
and MacOS, %LOCALAPPDATA%/unifiedagenda/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Inspect your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command()),
            )
            .subcommand(CmdStatus::command())
            .subcommand(CmdSync::command())
            .subcommand(CmdDump::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Commands::Dashboard(CmdDashboard::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => {
                    Commands::EventList(CmdEventList::from(matches))
                }
                _ => return Err("Unknown event command".into()),
            },
            Some((CmdStatus::NAME, matches)) => Commands::Status(CmdStatus::from(matches)),
            Some((CmdSync::NAME, matches)) => Commands::Sync(CmdSync::from(matches)),
            Some((CmdDump::NAME, matches)) => Commands::Dump(CmdDump::from(matches)),
            None => Commands::Dashboard(CmdDashboard),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the status and today's events
    Dashboard(CmdDashboard),

    /// List events in a date range
    EventList(CmdEventList),

    /// Print the status label
    Status(CmdStatus),

    /// Synchronize calendars from their remote locations
    Sync(CmdSync),

    /// Print an iCalendar file as JSON
    Dump(CmdDump),
}

impl Commands {
    /// Run the command with the given configuration
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        match self {
            Commands::Dashboard(a) => a.run(&Self::agenda(config).await?),
            Commands::EventList(a) => a.run(&Self::agenda(config).await?),
            Commands::Status(a) => a.run(&Self::agenda(config).await?),
            Commands::Sync(a) => a.run(&mut Self::agenda(config).await?).await,
            Commands::Dump(a) => a.run().await,
        }
    }

    async fn agenda(config: Option<PathBuf>) -> Result<Agenda<FileSync>, Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        Agenda::with_sync(config, FileSync).await
    }
}
