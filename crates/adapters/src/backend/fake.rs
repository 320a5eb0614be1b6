// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake backends for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BackendError, ClusterBackend, EnvironmentBackend};
use op_core::Operation;
use std::sync::{Arc, Mutex};

/// Recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    ListOperations,
    LastOperation,
}

/// Fake cluster store holding a fixed list of operations
#[derive(Clone, Default)]
pub struct FakeClusterBackend {
    operations: Arc<Mutex<Vec<Operation>>>,
    failure: Arc<Mutex<Option<BackendError>>>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl FakeClusterBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cluster store returning these operations (in the given order)
    pub fn with_operations(operations: Vec<Operation>) -> Self {
        let fake = Self::default();
        *fake.operations.lock().unwrap_or_else(|e| e.into_inner()) = operations;
        fake
    }

    /// Cluster store that fails every query
    pub fn failing(error: BackendError) -> Self {
        let fake = Self::default();
        *fake.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
        fake
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ClusterBackend for FakeClusterBackend {
    fn list_operations(&self) -> Result<Vec<Operation>, BackendError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(BackendCall::ListOperations);

        if let Some(error) = self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(error);
        }
        Ok(self
            .operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }
}

/// Fake environment store with at most one current operation
#[derive(Clone, Default)]
pub struct FakeEnvironmentBackend {
    operation: Arc<Mutex<Option<Operation>>>,
    failure: Arc<Mutex<Option<BackendError>>>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl FakeEnvironmentBackend {
    /// Environment with no operation (queries return `NotFound`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(operation: Operation) -> Self {
        let fake = Self::default();
        fake.set_operation(operation);
        fake
    }

    /// Environment that fails every query
    pub fn failing(error: BackendError) -> Self {
        let fake = Self::default();
        *fake.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
        fake
    }

    pub fn set_operation(&self, operation: Operation) {
        *self.operation.lock().unwrap_or_else(|e| e.into_inner()) = Some(operation);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EnvironmentBackend for FakeEnvironmentBackend {
    fn last_operation(&self) -> Result<Operation, BackendError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(BackendCall::LastOperation);

        if let Some(error) = self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(error);
        }
        self.operation
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| BackendError::NotFound("no operation".to_string()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
