// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use agenda_core::{APP_NAME, Config, get_config_dir};
use tokio::fs;

const AGENDA_CONFIG_ENV: &str = "AGENDA_CONFIG";

/// Locate and parse the configuration file.
///
/// The path is taken from `path`, then the `AGENDA_CONFIG` environment
/// variable, then `unifiedagenda/config.toml` in the user configuration
/// directory. A missing default file yields an empty configuration; an
/// explicitly given file must exist.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(AGENDA_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::info!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| a.core)
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e).into())
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
