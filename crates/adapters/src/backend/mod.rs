// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation backends: the cluster store and local environment stores

mod store;

pub use store::{StoreCluster, StoreEnvironment};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BackendCall, FakeClusterBackend, FakeEnvironmentBackend};

use op_core::Operation;
use thiserror::Error;

/// Errors from any operation source
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }

    /// Whether the source was never set up, as opposed to failing
    pub fn is_not_configured(&self) -> bool {
        matches!(self, BackendError::NotConfigured(_))
    }
}

/// The cluster's own durable operation store
pub trait ClusterBackend: Send + Sync {
    /// All operations known to the cluster, most recently created first
    fn list_operations(&self) -> Result<Vec<Operation>, BackendError>;
}

/// A local environment store (install wizard, update, join)
pub trait EnvironmentBackend: Send + Sync {
    /// The environment's current operation; `NotFound` when it has none
    fn last_operation(&self) -> Result<Operation, BackendError>;
}

impl<T: ClusterBackend + ?Sized> ClusterBackend for Box<T> {
    fn list_operations(&self) -> Result<Vec<Operation>, BackendError> {
        (**self).list_operations()
    }
}

impl<T: EnvironmentBackend + ?Sized> EnvironmentBackend for Box<T> {
    fn last_operation(&self) -> Result<Operation, BackendError> {
        (**self).last_operation()
    }
}
