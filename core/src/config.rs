// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};

/// The name of the application.
pub const APP_NAME: &str = "unifiedagenda";

/// Configuration of the agenda.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Calendars to read events from.
    #[serde(default)]
    pub calendars: Vec<CalendarSource>,

    /// If true, the status shows the time left in the current event.
    #[serde(default = "default_show_remaining")]
    pub show_remaining: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendars: Vec::new(),
            show_remaining: default_show_remaining(),
        }
    }
}

const fn default_show_remaining() -> bool {
    true
}

impl Config {
    /// Normalize the configuration.
    ///
    /// Expands the calendar paths, drops sources without a path and rejects
    /// duplicated calendar names.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be expanded or two calendars share a
    /// name.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        let mut names = HashSet::new();
        let mut calendars = Vec::with_capacity(self.calendars.len());
        for mut calendar in self.calendars.drain(..) {
            if !names.insert(calendar.name.clone()) {
                return Err(format!("Duplicate calendar name: {}", calendar.name).into());
            }

            if calendar.path.as_os_str().is_empty() {
                tracing::warn!(calendar = %calendar.name, "calendar has no path, ignoring");
                continue;
            }
            calendar.path = expand_path(&calendar.path).map_err(|e| {
                format!("Failed to expand path of calendar {}: {e}", calendar.name)
            })?;

            if calendar.url.as_deref().is_some_and(str::is_empty) {
                calendar.url = None;
            }
            calendars.push(calendar);
        }
        self.calendars = calendars;
        Ok(())
    }
}

/// A calendar file, optionally mirrored from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CalendarSource {
    /// Display name, unique among the configured calendars.
    pub name: String,

    /// Path to the `.ics` file.
    #[serde(default)]
    pub path: PathBuf,

    /// Remote location the file is synchronized from.
    #[serde(default)]
    pub url: Option<String>,
}

impl CalendarSource {
    /// A local calendar file.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            url: None,
        }
    }

    /// Set the remote location.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

/// The user-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}
