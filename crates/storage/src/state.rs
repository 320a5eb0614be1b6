// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

use crate::StoreOp;
use op_core::Operation;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Recorded outcome of a plan phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    Completed,
    RolledBack,
    Failed,
}

/// Operations and phase outcomes built from store changes
#[derive(Debug, Default)]
pub struct MaterializedState {
    pub operations: HashMap<String, Operation>,
    /// Phase outcomes keyed by operation ID, then phase ID
    pub phases: HashMap<String, BTreeMap<String, PhaseState>>,
}

impl MaterializedState {
    /// Rebuild state by applying every change in order
    pub fn from_ops<'a>(ops: impl IntoIterator<Item = &'a StoreOp>) -> Self {
        let mut state = Self::default();
        for op in ops {
            state.apply(op);
        }
        state
    }

    /// All operations, most recently created first (ties by ID)
    pub fn operations_by_recency(&self) -> Vec<Operation> {
        let mut operations: Vec<Operation> = self.operations.values().cloned().collect();
        operations.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.id.cmp(&b.id)));
        operations
    }

    /// The most recently created operation
    pub fn last_operation(&self) -> Option<&Operation> {
        self.operations
            .values()
            .max_by(|a, b| a.created.cmp(&b.created).then_with(|| b.id.cmp(&a.id)))
    }

    pub fn phase_state(&self, operation_id: &str, phase: &str) -> Option<PhaseState> {
        self.phases.get(operation_id)?.get(phase).copied()
    }

    /// Apply a change to update the state
    pub fn apply(&mut self, op: &StoreOp) {
        match op {
            StoreOp::OperationCreate { operation } => {
                self.operations
                    .insert(operation.id.clone(), operation.clone());
            }

            StoreOp::OperationStateUpdate { id, state } => {
                if let Some(operation) = self.operations.get_mut(id) {
                    operation.state = *state;
                }
            }

            StoreOp::PhaseStateUpdate {
                operation_id,
                phase,
                state,
            } => {
                self.phases
                    .entry(operation_id.clone())
                    .or_default()
                    .insert(phase.clone(), *state);
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
