// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator client for when no wizard is configured.

use super::{ClusterHandle, OperatorClient};
use crate::BackendError;
use op_core::Operation;

/// Operator that is never reachable.
///
/// Used when no operator URL is configured, so install resolution falls
/// straight through to the local wizard store.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpOperator;

impl NoOpOperator {
    pub fn new() -> Self {
        Self
    }
}

impl OperatorClient for NoOpOperator {
    fn local_cluster(&self) -> Result<ClusterHandle, BackendError> {
        Err(BackendError::NotConfigured("operator URL".to_string()))
    }

    fn last_operation(&self, _cluster: &ClusterHandle) -> Result<Operation, BackendError> {
        Err(BackendError::NotConfigured("operator URL".to_string()))
    }
}
