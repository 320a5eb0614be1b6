// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::backend::{BackendError, ClusterBackend, EnvironmentBackend};
use crate::operator::{ClusterHandle, OperatorClient};
use op_core::Operation;
use std::time::Instant;

fn log_outcome(result: &Result<Operation, BackendError>, elapsed_ms: u64) {
    match result {
        Ok(op) => tracing::debug!(
            elapsed_ms,
            operation_id = %op.id,
            kind = %op.kind,
            state = %op.state,
            "fetched operation"
        ),
        Err(e) if e.is_not_found() => tracing::debug!(elapsed_ms, error = %e, "no operation"),
        // Callers decide whether a failure deserves a warning
        Err(e) => tracing::debug!(elapsed_ms, error = %e, "query failed"),
    }
}

/// Wrapper that adds tracing to any ClusterBackend
#[derive(Clone)]
pub struct TracedClusterBackend<C> {
    inner: C,
}

impl<C> TracedClusterBackend<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: ClusterBackend> ClusterBackend for TracedClusterBackend<C> {
    fn list_operations(&self) -> Result<Vec<Operation>, BackendError> {
        let span = tracing::debug_span!("cluster.list_operations");
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.list_operations();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(ops) => tracing::debug!(elapsed_ms, count = ops.len(), "listed operations"),
            Err(e) => tracing::debug!(elapsed_ms, error = %e, "query failed"),
        }

        result
    }
}

/// Wrapper that adds tracing to any EnvironmentBackend
#[derive(Clone)]
pub struct TracedEnvironmentBackend<E> {
    name: &'static str,
    inner: E,
}

impl<E> TracedEnvironmentBackend<E> {
    /// `name` identifies the environment in logs ("update", "expand", "install")
    pub fn new(name: &'static str, inner: E) -> Self {
        Self { name, inner }
    }
}

impl<E: EnvironmentBackend> EnvironmentBackend for TracedEnvironmentBackend<E> {
    fn last_operation(&self) -> Result<Operation, BackendError> {
        let span = tracing::debug_span!("environment.last_operation", context = self.name);
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.last_operation();
        log_outcome(&result, start.elapsed().as_millis() as u64);
        result
    }
}

/// Wrapper that adds tracing to any OperatorClient
#[derive(Clone)]
pub struct TracedOperator<O> {
    inner: O,
}

impl<O> TracedOperator<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }
}

impl<O: OperatorClient> OperatorClient for TracedOperator<O> {
    fn local_cluster(&self) -> Result<ClusterHandle, BackendError> {
        let span = tracing::debug_span!("operator.local_cluster");
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.local_cluster();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(cluster) => tracing::debug!(elapsed_ms, cluster = %cluster.name, "found cluster"),
            Err(e) => tracing::debug!(elapsed_ms, error = %e, "failed to connect to operator"),
        }

        result
    }

    fn last_operation(&self, cluster: &ClusterHandle) -> Result<Operation, BackendError> {
        let span = tracing::debug_span!("operator.last_operation", cluster = %cluster.name);
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.last_operation(cluster);
        log_outcome(&result, start.elapsed().as_millis() as u64);
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
