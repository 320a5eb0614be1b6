// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-backend operation resolution
//!
//! During install, node join and updates the same operation may be
//! recorded by several stores at once, and they lag behind each other.
//! The resolver reads every applicable source in a fixed order and keeps
//! one copy per operation ID: a later source overwrites an earlier one.
//!
//! Source failures never fail resolution. They are logged and returned as
//! [`SourceDiagnostic`]s next to the merged set; a query that finds
//! nothing reports `NotFound`.

use crate::EngineError;
use op_adapters::{BackendError, ClusterBackend, EnvironmentBackend, OperatorClient};
use op_core::{Operation, OperationKind};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A place operations are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Cluster,
    UpdateEnv,
    JoinEnv,
    /// Remote operator API of the install wizard
    Operator,
    /// Local install wizard store
    Wizard,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Cluster => "cluster",
            SourceKind::UpdateEnv => "update",
            SourceKind::JoinEnv => "expand",
            SourceKind::Operator => "operator",
            SourceKind::Wizard => "wizard",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStage {
    Cluster,
    UpdateEnv,
    JoinEnv,
    /// Operator API, falling back to the local wizard store
    Install,
}

/// Merge precedence: later stages overwrite earlier ones
pub const MERGE_ORDER: [MergeStage; 4] = [
    MergeStage::Cluster,
    MergeStage::UpdateEnv,
    MergeStage::JoinEnv,
    MergeStage::Install,
];

/// A source that failed to answer during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDiagnostic {
    pub source: SourceKind,
    pub error: BackendError,
}

/// Operations merged from every source in one resolution pass
#[derive(Debug, Default)]
pub struct ResolvedOperations {
    pub operations: HashMap<String, Operation>,
    /// Source that supplied the copy kept for each operation ID
    pub origins: HashMap<String, SourceKind>,
    /// Most recent operation known to the cluster store
    pub cluster_operation: Option<Operation>,
    pub diagnostics: Vec<SourceDiagnostic>,
}

/// Most recent first; equal timestamps order by ID so sorting is total
fn by_recency(a: &Operation, b: &Operation) -> Ordering {
    b.created.cmp(&a.created).then_with(|| a.id.cmp(&b.id))
}

fn not_found(id_filter: Option<&str>) -> EngineError {
    match id_filter {
        Some(id) => EngineError::NotFound(format!("no operation with ID {} found", id)),
        None => EngineError::NotFound("no operation found".to_string()),
    }
}

fn candidate_list(operations: &[Operation]) -> String {
    operations
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl ResolvedOperations {
    /// Insert or overwrite the copy of an operation
    pub fn insert(&mut self, source: SourceKind, operation: Operation) {
        self.origins.insert(operation.id.clone(), source);
        self.operations.insert(operation.id.clone(), operation);
    }

    pub fn record_failure(&mut self, source: SourceKind, error: BackendError) {
        self.diagnostics.push(SourceDiagnostic { source, error });
    }

    /// Whether the install sources must be consulted.
    ///
    /// Once the cluster records a non-install operation the wizard is
    /// irrelevant. While an install is in flight the cluster store can
    /// report completion before the wizard does, so the wizard stays the
    /// source of truth.
    pub fn needs_install_sources(&self) -> bool {
        match &self.cluster_operation {
            None => true,
            Some(op) => op.kind == OperationKind::Install,
        }
    }

    /// Operations matching the filter, most recent first
    pub fn candidates(&self, id_filter: Option<&str>) -> Vec<Operation> {
        let id_filter = id_filter.filter(|id| !id.is_empty());
        let mut result: Vec<Operation> = self
            .operations
            .values()
            .filter(|op| match id_filter {
                Some(id) => op.id == id,
                None => true,
            })
            .cloned()
            .collect();
        result.sort_by(by_recency);
        result
    }

    /// The most recently created operation matching the filter
    pub fn most_recent(&self, id_filter: Option<&str>) -> Result<Operation, EngineError> {
        let id_filter = id_filter.filter(|id| !id.is_empty());
        let candidates = self.candidates(id_filter);
        tracing::debug!(operations = %candidate_list(&candidates), "fetched backend operations");

        if candidates.len() > 1 {
            tracing::warn!(
                "Multiple operations found:\n{}\nplease specify operation with --operation-id. \
                 Using the most recent operation.",
                candidate_list(&candidates)
            );
        }
        candidates
            .into_iter()
            .next()
            .ok_or_else(|| not_found(id_filter))
    }

    /// The most recent incomplete operation matching the filter
    pub fn active(&self, id_filter: Option<&str>) -> Result<Operation, EngineError> {
        let id_filter = id_filter.filter(|id| !id.is_empty());
        let candidates = self.candidates(id_filter);
        tracing::debug!(operations = %candidate_list(&candidates), "fetched backend operations");

        if candidates.is_empty() {
            return Err(not_found(id_filter));
        }
        candidates
            .into_iter()
            .find(|op| !op.is_completed())
            .ok_or_else(|| EngineError::NotFound("no active operations found".to_string()))
    }
}

/// Reads operations from every configured source.
///
/// The update and join environments are optional: they are only supplied
/// while such an operation has local state.
pub struct OperationResolver<C, E, O> {
    cluster: Option<C>,
    update: Option<E>,
    join: Option<E>,
    operator: Option<O>,
    wizard: Option<E>,
}

impl<C, E, O> Default for OperationResolver<C, E, O> {
    fn default() -> Self {
        Self {
            cluster: None,
            update: None,
            join: None,
            operator: None,
            wizard: None,
        }
    }
}

impl<C, E, O> OperationResolver<C, E, O>
where
    C: ClusterBackend,
    E: EnvironmentBackend,
    O: OperatorClient,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: C) -> Self {
        self.cluster = Some(cluster);
        self
    }

    pub fn with_update_env(mut self, update: E) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_join_env(mut self, join: E) -> Self {
        self.join = Some(join);
        self
    }

    pub fn with_operator(mut self, operator: O) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn with_wizard(mut self, wizard: E) -> Self {
        self.wizard = Some(wizard);
        self
    }

    /// Merge operations from all sources in [`MERGE_ORDER`]
    pub fn list(&self) -> ResolvedOperations {
        let mut resolved = ResolvedOperations::default();
        for stage in MERGE_ORDER {
            match stage {
                MergeStage::Cluster => self.merge_cluster(&mut resolved),
                MergeStage::UpdateEnv => {
                    merge_environment(SourceKind::UpdateEnv, self.update.as_ref(), &mut resolved)
                }
                MergeStage::JoinEnv => {
                    merge_environment(SourceKind::JoinEnv, self.join.as_ref(), &mut resolved)
                }
                MergeStage::Install => {
                    if resolved.needs_install_sources() {
                        self.merge_install(&mut resolved);
                    } else {
                        tracing::debug!("cluster operation is not an install, skipping wizard");
                    }
                }
            }
        }
        resolved
    }

    pub fn most_recent(&self, id_filter: Option<&str>) -> Result<Operation, EngineError> {
        self.list().most_recent(id_filter)
    }

    pub fn active(&self, id_filter: Option<&str>) -> Result<Operation, EngineError> {
        self.list().active(id_filter)
    }

    fn merge_cluster(&self, resolved: &mut ResolvedOperations) {
        let Some(cluster) = &self.cluster else {
            return;
        };
        match cluster.list_operations() {
            Ok(operations) => {
                resolved.cluster_operation =
                    operations.iter().min_by(|a, b| by_recency(a, b)).cloned();
                for op in operations {
                    resolved.insert(SourceKind::Cluster, op);
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to query cluster operations");
                resolved.record_failure(SourceKind::Cluster, e);
            }
        }
    }

    /// Operator API first; the local wizard store only if the operator fails
    fn merge_install(&self, resolved: &mut ResolvedOperations) {
        if let Some(operator) = &self.operator {
            let result = operator
                .local_cluster()
                .and_then(|cluster| operator.last_operation(&cluster));
            match result {
                Ok(op) => {
                    resolved.insert(SourceKind::Operator, op);
                    return;
                }
                Err(e) => {
                    if e.is_not_configured() {
                        tracing::debug!(error = %e, "using local wizard store");
                    } else {
                        tracing::warn!(error = %e, "failed to connect to operator");
                    }
                    resolved.record_failure(SourceKind::Operator, e);
                }
            }
        }
        merge_environment(SourceKind::Wizard, self.wizard.as_ref(), resolved);
    }
}

fn merge_environment<E: EnvironmentBackend>(
    source: SourceKind,
    env: Option<&E>,
    resolved: &mut ResolvedOperations,
) {
    let Some(env) = env else {
        return;
    };
    match env.last_operation() {
        // Environment copy takes precedence over what was merged before
        Ok(op) => resolved.insert(source, op),
        Err(e) => {
            if e.is_not_found() {
                tracing::debug!(context = %source, error = %e, "no operation in environment");
            } else {
                tracing::warn!(context = %source, error = %e, "failed to query operation");
            }
            resolved.record_failure(source, e);
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
