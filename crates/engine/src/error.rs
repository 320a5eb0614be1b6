// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for resolution and dispatch

use crate::PlanAction;
use op_core::OperationKind;
use op_storage::StoreError;
use thiserror::Error;

/// Coarse classification that survives wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No matching or no active operation
    NotFound,
    /// The request cannot be served for this operation
    BadParameter,
    /// A type-specific handler failed
    Handler,
}

/// Failures from type-specific phase handlers and installers
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("operation {0} is already completed, use --force to run its phases anyway")]
    OperationCompleted(String),
    #[error("no {0} environment available")]
    MissingEnvironment(&'static str),
    #[error("{0}")]
    Failed(String),
}

/// Errors that can occur resolving or dispatching an operation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    NotFound(String),
    #[error("operation type \"{kind}\" does not support plan {action}")]
    Unsupported {
        kind: OperationKind,
        action: PlanAction,
    },
    #[error("invalid parameter: {0}")]
    BadParameter(String),
    #[error("{kind} plan {action} failed: {source}")]
    Handler {
        kind: OperationKind,
        action: PlanAction,
        source: HandlerError,
    },
    #[error("failed to restart installation: {0}")]
    Restart(#[source] HandlerError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound(_) => ErrorKind::NotFound,
            EngineError::Unsupported { .. } | EngineError::BadParameter(_) => {
                ErrorKind::BadParameter
            }
            EngineError::Handler { .. } | EngineError::Restart(_) => ErrorKind::Handler,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
