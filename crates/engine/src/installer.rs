// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installation-specific phase handling

use crate::{Environments, HandlerError, JournalHandler, PhaseHandler, PhaseParams, StoreTarget};
use op_core::{Clock, IdGen, Operation, OperationKind, SystemClock, UuidIdGen};
use op_storage::OperationStore;

/// Handles phases of install operations and restarts installation
pub trait Installer: Send + Sync {
    fn execute_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError>;

    fn rollback_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError>;

    /// Start a fresh installation, returning the new install operation
    fn restart(&self, env: &Environments) -> Result<Operation, HandlerError>;
}

/// Settings for a fresh installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub cluster_name: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            cluster_name: "local".to_string(),
        }
    }
}

/// Installer journaling to the local install wizard store
#[derive(Debug, Clone)]
pub struct DefaultInstaller<C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    journal: JournalHandler,
    config: InstallConfig,
    clock: C,
    ids: G,
}

impl Default for DefaultInstaller {
    fn default() -> Self {
        Self::with_clock_and_ids(SystemClock, UuidIdGen)
    }
}

impl<C: Clock, G: IdGen> DefaultInstaller<C, G> {
    pub fn with_clock_and_ids(clock: C, ids: G) -> Self {
        Self {
            journal: JournalHandler::new(StoreTarget::Wizard),
            config: InstallConfig::default(),
            clock,
            ids,
        }
    }
}

impl<C: Clock, G: IdGen> Installer for DefaultInstaller<C, G> {
    fn execute_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.journal.execute_phase(env, params, operation)
    }

    fn rollback_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.journal.rollback_phase(env, params, operation)
    }

    fn restart(&self, env: &Environments) -> Result<Operation, HandlerError> {
        let operation = Operation::new(
            self.ids.next(),
            OperationKind::Install,
            self.config.cluster_name.clone(),
            &self.clock,
        );
        let mut store = OperationStore::open(&env.wizard_dir)?;
        store.put_operation(operation.clone())?;

        tracing::info!(
            operation_id = %operation.id,
            cluster = %operation.cluster,
            "started new installation"
        );
        Ok(operation)
    }
}

#[cfg(test)]
#[path = "installer_tests.rs"]
mod tests;
