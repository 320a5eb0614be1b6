// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake operator client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClusterHandle, OperatorClient};
use crate::BackendError;
use op_core::Operation;
use std::sync::{Arc, Mutex};

/// Recorded operator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorCall {
    LocalCluster,
    LastOperation { cluster: String },
}

/// Fake operator serving one cluster and at most one operation
#[derive(Clone, Default)]
pub struct FakeOperator {
    operation: Arc<Mutex<Option<Operation>>>,
    reachable: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<OperatorCall>>>,
}

impl FakeOperator {
    /// Reachable operator whose cluster has no operation yet
    pub fn new() -> Self {
        let fake = Self::default();
        *fake.reachable.lock().unwrap_or_else(|e| e.into_inner()) = true;
        fake
    }

    pub fn with_operation(operation: Operation) -> Self {
        let fake = Self::new();
        *fake.operation.lock().unwrap_or_else(|e| e.into_inner()) = Some(operation);
        fake
    }

    /// Operator that cannot be reached
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<OperatorCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: OperatorCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn check_reachable(&self) -> Result<(), BackendError> {
        if *self.reachable.lock().unwrap_or_else(|e| e.into_inner()) {
            Ok(())
        } else {
            Err(BackendError::Unavailable("connection refused".to_string()))
        }
    }
}

impl OperatorClient for FakeOperator {
    fn local_cluster(&self) -> Result<ClusterHandle, BackendError> {
        self.record(OperatorCall::LocalCluster);
        self.check_reachable()?;
        Ok(ClusterHandle {
            name: "local".to_string(),
        })
    }

    fn last_operation(&self, cluster: &ClusterHandle) -> Result<Operation, BackendError> {
        self.record(OperatorCall::LastOperation {
            cluster: cluster.name.clone(),
        });
        self.check_reachable()?;
        self.operation
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| BackendError::NotFound(format!("no operation for {}", cluster.name)))
    }
}
