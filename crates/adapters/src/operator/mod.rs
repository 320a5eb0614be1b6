// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clients for the install wizard's operator API

mod http;
mod noop;

pub use http::HttpOperator;
pub use noop::NoOpOperator;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOperator, OperatorCall};

use crate::BackendError;
use op_core::Operation;
use serde::{Deserialize, Serialize};

/// Reference to a cluster managed by an operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHandle {
    pub name: String,
}

/// Remote operator API
pub trait OperatorClient: Send + Sync {
    /// The cluster this operator manages locally
    fn local_cluster(&self) -> Result<ClusterHandle, BackendError>;

    /// The cluster's current operation
    fn last_operation(&self, cluster: &ClusterHandle) -> Result<Operation, BackendError>;
}

impl<T: OperatorClient + ?Sized> OperatorClient for Box<T> {
    fn local_cluster(&self) -> Result<ClusterHandle, BackendError> {
        (**self).local_cluster()
    }

    fn last_operation(&self, cluster: &ClusterHandle) -> Result<Operation, BackendError> {
        (**self).last_operation(cluster)
    }
}
