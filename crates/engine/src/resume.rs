// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install resumption

use crate::{EngineError, PhaseDispatcher, PhaseParams, ROOT_PHASE};
use op_adapters::{ClusterBackend, EnvironmentBackend, OperatorClient};
use op_core::Operation;

/// Result of resuming the last operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The root phase of an existing operation was executed
    Resumed(Operation),
    /// No operation existed, so installation started over
    Restarted(Operation),
}

impl<C, E, O> PhaseDispatcher<C, E, O>
where
    C: ClusterBackend,
    E: EnvironmentBackend,
    O: OperatorClient,
{
    /// Resume the active operation from the root phase.
    ///
    /// When no operation can be found at all, the installer starts a fresh
    /// installation instead. Every other error is returned unchanged.
    pub fn resume_operation(&self, params: PhaseParams) -> Result<ResumeOutcome, EngineError> {
        let params = PhaseParams {
            phase_id: ROOT_PHASE.to_string(),
            ..params
        };

        match self.execute_phase(&params) {
            Ok(operation) => Ok(ResumeOutcome::Resumed(operation)),
            Err(e) if e.is_not_found() => {
                tracing::info!(reason = %e, "no operation to resume, restarting installation");
                let operation = params
                    .installer
                    .restart(self.environments())
                    .map_err(EngineError::Restart)?;
                Ok(ResumeOutcome::Restarted(operation))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
