// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-backed operation store

use crate::{MaterializedState, PhaseState, StoreOp, Wal, WalError};
use op_core::{Operation, OperationState};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the log file inside a store directory
pub const LOG_FILE_NAME: &str = "operations.jsonl";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create store directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("store {}: {source}", path.display())]
    Wal { path: PathBuf, source: WalError },
    #[error("operation not found: {0}")]
    OperationNotFound(String),
}

/// A writable operation store rooted at a directory
pub struct OperationStore {
    dir: PathBuf,
    wal: Wal,
    state: MaterializedState,
}

impl OperationStore {
    /// Open (creating if needed) the store in `dir`
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let state = Self::read(dir)?;
        let log_path = dir.join(LOG_FILE_NAME);
        let wal = Wal::open(&log_path).map_err(|source| StoreError::Wal {
            path: log_path,
            source,
        })?;

        tracing::debug!(
            dir = %dir.display(),
            operations = state.operations.len(),
            "opened operation store"
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            wal,
            state,
        })
    }

    /// Replay the store in `dir` without creating anything on disk
    pub fn read(dir: &Path) -> Result<MaterializedState, StoreError> {
        let log_path = dir.join(LOG_FILE_NAME);
        let ops = Wal::replay(&log_path).map_err(|source| StoreError::Wal {
            path: log_path,
            source,
        })?;
        Ok(MaterializedState::from_ops(&ops))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn state(&self) -> &MaterializedState {
        &self.state
    }

    /// Persist a change, then apply it to the in-memory state
    pub fn apply(&mut self, op: StoreOp) -> Result<u64, StoreError> {
        let seq = self.wal.append(&op).map_err(|source| StoreError::Wal {
            path: self.dir.join(LOG_FILE_NAME),
            source,
        })?;
        self.state.apply(&op);
        Ok(seq)
    }

    /// Record an operation (replacing any stored copy with the same ID)
    pub fn put_operation(&mut self, operation: Operation) -> Result<(), StoreError> {
        self.apply(StoreOp::OperationCreate { operation })?;
        Ok(())
    }

    pub fn set_operation_state(&mut self, id: &str, state: OperationState) -> Result<(), StoreError> {
        if !self.state.operations.contains_key(id) {
            return Err(StoreError::OperationNotFound(id.to_string()));
        }
        self.apply(StoreOp::OperationStateUpdate {
            id: id.to_string(),
            state,
        })?;
        Ok(())
    }

    pub fn set_phase_state(
        &mut self,
        operation_id: &str,
        phase: &str,
        state: PhaseState,
    ) -> Result<(), StoreError> {
        if !self.state.operations.contains_key(operation_id) {
            return Err(StoreError::OperationNotFound(operation_id.to_string()));
        }
        self.apply(StoreOp::PhaseStateUpdate {
            operation_id: operation_id.to_string(),
            phase: phase.to_string(),
            state,
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
