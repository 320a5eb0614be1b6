// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local environments handed to phase handlers

use op_core::Config;
use std::path::PathBuf;

/// Directories of the operation stores a handler may write to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environments {
    pub cluster_dir: PathBuf,
    pub wizard_dir: PathBuf,
    /// Only set while an update-type operation has a local environment
    pub update_dir: Option<PathBuf>,
    /// Only set while a join has a local environment
    pub join_dir: Option<PathBuf>,
}

impl Environments {
    /// Derive environments from configuration.
    ///
    /// The update and join environments are only supplied when their
    /// directories exist.
    pub fn from_config(config: &Config) -> Self {
        let existing = |dir: PathBuf| dir.is_dir().then_some(dir);
        Self {
            cluster_dir: config.cluster_dir(),
            wizard_dir: config.wizard_dir(),
            update_dir: existing(config.update_dir()),
            join_dir: existing(config.join_dir()),
        }
    }
}
