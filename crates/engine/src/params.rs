// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameters for a single phase action

use crate::{DefaultInstaller, Installer};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// ID of the root phase of every operation plan
pub const ROOT_PHASE: &str = "/";

/// Parameters for a single phase execution or rollback
#[derive(Clone)]
pub struct PhaseParams {
    /// Phase to execute or roll back
    pub phase_id: String,
    /// Operation to work with; the most recent one when unset
    pub operation_id: Option<String>,
    /// Run the phase even if safety checks would refuse
    pub force: bool,
    /// Passed through to the handler, which enforces it
    pub timeout: Duration,
    /// Skip the binary version compatibility check
    pub skip_version_check: bool,
    /// Handles installation-specific phases
    pub installer: Arc<dyn Installer>,
}

impl PhaseParams {
    pub fn for_phase(phase_id: impl Into<String>) -> Self {
        Self {
            phase_id: phase_id.into(),
            ..Self::default()
        }
    }

    /// The operation ID filter, with an empty ID meaning "no filter"
    pub fn operation_filter(&self) -> Option<&str> {
        self.operation_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Default for PhaseParams {
    fn default() -> Self {
        Self {
            phase_id: ROOT_PHASE.to_string(),
            operation_id: None,
            force: false,
            timeout: Duration::from_secs(15 * 60),
            skip_version_check: false,
            installer: Arc::new(<DefaultInstaller>::default()),
        }
    }
}

impl fmt::Debug for PhaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseParams")
            .field("phase_id", &self.phase_id)
            .field("operation_id", &self.operation_id)
            .field("force", &self.force)
            .field("timeout", &self.timeout)
            .field("skip_version_check", &self.skip_version_check)
            .finish_non_exhaustive()
    }
}
