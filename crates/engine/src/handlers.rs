// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type-specific phase handlers
//!
//! Every handler journals phase progress into the operation store of the
//! environment that owns the operation.

use crate::{Environments, HandlerError, PhaseParams};
use op_core::{Operation, OperationState};
use op_storage::{OperationStore, PhaseState};
use std::path::Path;

/// Executes and rolls back individual phases of an operation plan
pub trait PhaseHandler: Send + Sync {
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
}

/// Marks an operation plan as completed
pub trait PlanCompleter: Send + Sync {
    fn complete_plan(&self, env: &Environments, operation: &Operation) -> Result<(), HandlerError>;
}

/// A handler that supports the full plan lifecycle
pub trait PlanHandler: PhaseHandler + PlanCompleter {}

impl<T: PhaseHandler + PlanCompleter> PlanHandler for T {}

/// Operation store a [`JournalHandler`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTarget {
    Cluster,
    Wizard,
    Update,
    Join,
}

impl StoreTarget {
    fn dir<'a>(&self, env: &'a Environments) -> Result<&'a Path, HandlerError> {
        match self {
            StoreTarget::Cluster => Ok(&env.cluster_dir),
            StoreTarget::Wizard => Ok(&env.wizard_dir),
            StoreTarget::Update => env
                .update_dir
                .as_deref()
                .ok_or(HandlerError::MissingEnvironment("update")),
            StoreTarget::Join => env
                .join_dir
                .as_deref()
                .ok_or(HandlerError::MissingEnvironment("join")),
        }
    }
}

/// Records phase progress in an operation store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalHandler {
    target: StoreTarget,
}

impl JournalHandler {
    pub fn new(target: StoreTarget) -> Self {
        Self { target }
    }

    /// Open the target store, seeding it with the operation if absent
    fn open(&self, env: &Environments, operation: &Operation) -> Result<OperationStore, HandlerError> {
        let mut store = OperationStore::open(self.target.dir(env)?)?;
        if !store.state().operations.contains_key(&operation.id) {
            store.put_operation(operation.clone())?;
        }
        Ok(store)
    }

    fn record_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
        phase_state: PhaseState,
    ) -> Result<(), HandlerError> {
        if operation.is_completed() && !params.force {
            return Err(HandlerError::OperationCompleted(operation.id.clone()));
        }

        let mut store = self.open(env, operation)?;
        let current = store
            .state()
            .operations
            .get(&operation.id)
            .map(|op| op.state);
        if current == Some(OperationState::Initiated) {
            store.set_operation_state(&operation.id, OperationState::InProgress)?;
        }
        store.set_phase_state(&operation.id, &params.phase_id, phase_state)?;

        tracing::info!(
            operation_id = %operation.id,
            phase = %params.phase_id,
            state = ?phase_state,
            store = %store.dir().display(),
            "recorded phase"
        );
        Ok(())
    }
}

impl PhaseHandler for JournalHandler {
    fn execute_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.record_phase(env, params, operation, PhaseState::Completed)
    }

    fn rollback_phase(
        &self,
        env: &Environments,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        self.record_phase(env, params, operation, PhaseState::RolledBack)
    }
}

impl PlanCompleter for JournalHandler {
    fn complete_plan(&self, env: &Environments, operation: &Operation) -> Result<(), HandlerError> {
        let mut store = self.open(env, operation)?;
        store.set_operation_state(&operation.id, OperationState::Completed)?;
        tracing::info!(operation_id = %operation.id, "marked operation completed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
