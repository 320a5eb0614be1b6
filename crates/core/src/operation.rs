// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster operation records
//!
//! An operation is one tracked cluster lifecycle action. The same record
//! may be stored by several backends at once (install wizard, local
//! update/join environments, the cluster store); the ID is what ties the
//! copies together.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors parsing operation fields from text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown operation type: {0}")]
    UnknownKind(String),
    #[error("unknown operation state: {0}")]
    UnknownState(String),
}

/// The type of a cluster operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Install,
    /// Node join
    Expand,
    Update,
    UpdateRuntimeEnviron,
    UpdateConfig,
    GarbageCollect,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Install,
        OperationKind::Expand,
        OperationKind::Update,
        OperationKind::UpdateRuntimeEnviron,
        OperationKind::UpdateConfig,
        OperationKind::GarbageCollect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Install => "install",
            OperationKind::Expand => "expand",
            OperationKind::Update => "update",
            OperationKind::UpdateRuntimeEnviron => "update_runtime_environ",
            OperationKind::UpdateConfig => "update_config",
            OperationKind::GarbageCollect => "garbage_collect",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

/// Persisted state of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    Initiated,
    InProgress,
    Completed,
    /// Completed with an error
    Failed,
}

impl OperationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationState::Initiated => "initiated",
            OperationState::InProgress => "in_progress",
            OperationState::Completed => "completed",
            OperationState::Failed => "failed",
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiated" => Ok(OperationState::Initiated),
            "in_progress" => Ok(OperationState::InProgress),
            "completed" => Ok(OperationState::Completed),
            "failed" => Ok(OperationState::Failed),
            other => Err(ParseError::UnknownState(other.to_string())),
        }
    }
}

/// Coarse status derived from [`OperationState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Active,
    Completed,
    Failed,
}

/// A cluster lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub kind: OperationKind,
    /// Name of the cluster the operation belongs to
    #[serde(default)]
    pub cluster: String,
    pub state: OperationState,
    pub created: DateTime<Utc>,
}

impl Operation {
    /// Create a freshly initiated operation stamped with the clock's time
    pub fn new(
        id: impl Into<String>,
        kind: OperationKind,
        cluster: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            cluster: cluster.into(),
            state: OperationState::Initiated,
            created: clock.now(),
        }
    }

    pub fn with_state(mut self, state: OperationState) -> Self {
        self.state = state;
        self
    }

    /// Completed either successfully or with an error
    pub fn is_completed(&self) -> bool {
        matches!(
            self.state,
            OperationState::Completed | OperationState::Failed
        )
    }

    pub fn is_failed(&self) -> bool {
        self.state == OperationState::Failed
    }

    pub fn status(&self) -> OperationStatus {
        match self.state {
            OperationState::Completed => OperationStatus::Completed,
            OperationState::Failed => OperationStatus::Failed,
            OperationState::Initiated | OperationState::InProgress => OperationStatus::Active,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, created={}, state={})",
            self.kind,
            self.id,
            self.created.to_rfc3339(),
            self.state
        )
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
