// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! opctl configuration
//!
//! Loaded from `opctl.toml`. Every field is optional; missing fields fall
//! back to [`Config::default`].

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up inside the state directory
pub const CONFIG_FILE_NAME: &str = "opctl.toml";

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root directory of the local operation stores
    pub state_dir: PathBuf,
    /// Base URL of the install wizard's operator API
    pub operator_url: Option<String>,
    #[serde(with = "humantime_serde")]
    pub operator_timeout: Duration,
    /// Timeout handed to phase handlers when the CLI does not set one
    #[serde(with = "humantime_serde")]
    pub phase_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            operator_url: None,
            operator_timeout: Duration::from_secs(5),
            phase_timeout: Duration::from_secs(15 * 60),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Find and load the effective configuration.
    ///
    /// An explicit `config_path` must exist. Without one, `opctl.toml` in the
    /// state directory is used when present, otherwise defaults apply. An
    /// explicit `state_dir` always wins over the file's value.
    pub fn discover(
        config_path: Option<&Path>,
        state_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = state_dir
                    .clone()
                    .unwrap_or_else(default_state_dir)
                    .join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::load(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(dir) = state_dir {
            config.state_dir = dir;
        }
        Ok(config)
    }

    /// Store for operations replicated into the cluster
    pub fn cluster_dir(&self) -> PathBuf {
        self.state_dir.join("cluster")
    }

    /// Local install wizard store
    pub fn wizard_dir(&self) -> PathBuf {
        self.state_dir.join("wizard")
    }

    pub fn update_dir(&self) -> PathBuf {
        self.state_dir.join("update")
    }

    pub fn join_dir(&self) -> PathBuf {
        self.state_dir.join("join")
    }
}

fn default_state_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .map(|dir| dir.join("opctl"))
        .unwrap_or_else(|| PathBuf::from(".opctl"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
