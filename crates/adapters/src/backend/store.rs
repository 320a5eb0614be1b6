// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backends reading the file-backed operation stores

use super::{BackendError, ClusterBackend, EnvironmentBackend};
use op_core::Operation;
use op_storage::{MaterializedState, OperationStore};
use std::path::{Path, PathBuf};

fn read_state(dir: &Path) -> Result<MaterializedState, BackendError> {
    OperationStore::read(dir).map_err(|e| BackendError::Unavailable(e.to_string()))
}

/// Cluster store kept in a local directory.
///
/// The directory only exists once the cluster has been formed, so a
/// missing directory reports the backend as unavailable.
#[derive(Debug, Clone)]
pub struct StoreCluster {
    dir: PathBuf,
}

impl StoreCluster {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ClusterBackend for StoreCluster {
    fn list_operations(&self) -> Result<Vec<Operation>, BackendError> {
        if !self.dir.is_dir() {
            return Err(BackendError::Unavailable(format!(
                "cluster store {} is not initialized",
                self.dir.display()
            )));
        }
        Ok(read_state(&self.dir)?.operations_by_recency())
    }
}

/// Local environment store (wizard, update or join)
#[derive(Debug, Clone)]
pub struct StoreEnvironment {
    dir: PathBuf,
}

impl StoreEnvironment {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl EnvironmentBackend for StoreEnvironment {
    fn last_operation(&self) -> Result<Operation, BackendError> {
        read_state(&self.dir)?
            .last_operation()
            .cloned()
            .ok_or_else(|| {
                BackendError::NotFound(format!("no operation in {}", self.dir.display()))
            })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
