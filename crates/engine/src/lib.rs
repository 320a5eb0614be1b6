// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Operation resolution and phase dispatch
//!
//! A top-level request (resume, execute, rollback, complete) asks the
//! [`OperationResolver`] for the authoritative operation across every
//! backend, then the [`PhaseDispatcher`] routes it to the handler for the
//! operation's type.

mod dispatch;
mod env;
mod error;
mod handlers;
mod installer;
mod params;
mod resolver;
mod resume;

#[cfg(test)]
mod test_support;

pub use dispatch::{route, Handlers, HandlerTarget, PhaseDispatcher, PlanAction};
pub use env::Environments;
pub use error::{EngineError, ErrorKind, HandlerError};
pub use handlers::{JournalHandler, PhaseHandler, PlanCompleter, PlanHandler, StoreTarget};
pub use installer::{DefaultInstaller, InstallConfig, Installer};
pub use params::{PhaseParams, ROOT_PHASE};
pub use resolver::{
    MergeStage, OperationResolver, ResolvedOperations, SourceDiagnostic, SourceKind, MERGE_ORDER,
};
pub use resume::ResumeOutcome;
