// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the places operations are read from

pub mod backend;
pub mod operator;
pub mod traced;

pub use backend::{BackendError, ClusterBackend, EnvironmentBackend, StoreCluster, StoreEnvironment};
pub use operator::{ClusterHandle, HttpOperator, NoOpOperator, OperatorClient};
pub use traced::{TracedClusterBackend, TracedEnvironmentBackend, TracedOperator};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use backend::{BackendCall, FakeClusterBackend, FakeEnvironmentBackend};
#[cfg(any(test, feature = "test-support"))]
pub use operator::{FakeOperator, OperatorCall};
