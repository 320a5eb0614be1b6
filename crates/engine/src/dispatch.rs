// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase dispatch by operation type

use crate::{
    EngineError, Environments, HandlerError, JournalHandler, OperationResolver, PhaseHandler,
    PhaseParams, PlanCompleter, PlanHandler, StoreTarget,
};
use op_adapters::{ClusterBackend, EnvironmentBackend, OperatorClient};
use op_core::{Operation, OperationKind};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// What a plan request asks a handler to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Execute,
    Rollback,
    Complete,
}

impl PlanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanAction::Execute => "execution",
            PlanAction::Rollback => "rollback",
            PlanAction::Complete => "completion",
        }
    }
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler a request is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerTarget {
    /// The injectable installer carried by the phase parameters
    Installer,
    InstallCompleter,
    Expand,
    Update,
    Environ,
    Config,
    GarbageCollect,
}

/// Route an operation kind and action to its handler.
///
/// Garbage collection can only be executed.
pub fn route(kind: OperationKind, action: PlanAction) -> Result<HandlerTarget, EngineError> {
    use OperationKind as K;
    use PlanAction as A;

    match (kind, action) {
        (K::Install, A::Execute | A::Rollback) => Ok(HandlerTarget::Installer),
        (K::Install, A::Complete) => Ok(HandlerTarget::InstallCompleter),
        (K::Expand, _) => Ok(HandlerTarget::Expand),
        (K::Update, _) => Ok(HandlerTarget::Update),
        (K::UpdateRuntimeEnviron, _) => Ok(HandlerTarget::Environ),
        (K::UpdateConfig, _) => Ok(HandlerTarget::Config),
        (K::GarbageCollect, A::Execute) => Ok(HandlerTarget::GarbageCollect),
        (K::GarbageCollect, A::Rollback | A::Complete) => {
            Err(EngineError::Unsupported { kind, action })
        }
    }
}

/// Type-specific handlers, one per routing target
#[derive(Clone)]
pub struct Handlers {
    pub install_completer: Arc<dyn PlanCompleter>,
    pub expand: Arc<dyn PlanHandler>,
    pub update: Arc<dyn PlanHandler>,
    pub environ: Arc<dyn PlanHandler>,
    pub config: Arc<dyn PlanHandler>,
    pub garbage_collect: Arc<dyn PhaseHandler>,
}

impl Handlers {
    /// Handlers journaling into the store of the owning environment
    pub fn journal() -> Self {
        Self {
            install_completer: Arc::new(JournalHandler::new(StoreTarget::Wizard)),
            expand: Arc::new(JournalHandler::new(StoreTarget::Join)),
            update: Arc::new(JournalHandler::new(StoreTarget::Update)),
            environ: Arc::new(JournalHandler::new(StoreTarget::Update)),
            config: Arc::new(JournalHandler::new(StoreTarget::Update)),
            garbage_collect: Arc::new(JournalHandler::new(StoreTarget::Cluster)),
        }
    }

    fn plan_handler(&self, target: HandlerTarget) -> Option<&dyn PlanHandler> {
        match target {
            HandlerTarget::Expand => Some(&*self.expand),
            HandlerTarget::Update => Some(&*self.update),
            HandlerTarget::Environ => Some(&*self.environ),
            HandlerTarget::Config => Some(&*self.config),
            HandlerTarget::Installer
            | HandlerTarget::InstallCompleter
            | HandlerTarget::GarbageCollect => None,
        }
    }
}

impl Default for Handlers {
    fn default() -> Self {
        Self::journal()
    }
}

/// Resolves the target operation and runs the handler for its type
pub struct PhaseDispatcher<C, E, O> {
    resolver: OperationResolver<C, E, O>,
    handlers: Handlers,
    env: Environments,
}

impl<C, E, O> PhaseDispatcher<C, E, O>
where
    C: ClusterBackend,
    E: EnvironmentBackend,
    O: OperatorClient,
{
    pub fn new(resolver: OperationResolver<C, E, O>, handlers: Handlers, env: Environments) -> Self {
        Self {
            resolver,
            handlers,
            env,
        }
    }

    pub fn resolver(&self) -> &OperationResolver<C, E, O> {
        &self.resolver
    }

    pub fn environments(&self) -> &Environments {
        &self.env
    }

    /// Execute a phase of the active operation
    pub fn execute_phase(&self, params: &PhaseParams) -> Result<Operation, EngineError> {
        self.resolve_and_dispatch(PlanAction::Execute, params)
    }

    /// Roll back a phase of the active operation
    pub fn rollback_phase(&self, params: &PhaseParams) -> Result<Operation, EngineError> {
        self.resolve_and_dispatch(PlanAction::Rollback, params)
    }

    /// Mark the active operation's plan completed
    pub fn complete_plan(&self, operation_id: Option<&str>) -> Result<Operation, EngineError> {
        let params = PhaseParams {
            operation_id: operation_id.map(str::to_string),
            ..PhaseParams::default()
        };
        self.resolve_and_dispatch(PlanAction::Complete, &params)
    }

    fn resolve_and_dispatch(
        &self,
        action: PlanAction,
        params: &PhaseParams,
    ) -> Result<Operation, EngineError> {
        if action != PlanAction::Complete && params.phase_id.is_empty() {
            return Err(EngineError::BadParameter(
                "phase ID must not be empty".to_string(),
            ));
        }
        let operation = self.resolver.active(params.operation_filter())?;
        self.dispatch(&operation, action, params)?;
        Ok(operation)
    }

    /// Run `action` on an already resolved operation
    pub fn dispatch(
        &self,
        operation: &Operation,
        action: PlanAction,
        params: &PhaseParams,
    ) -> Result<(), EngineError> {
        let span = tracing::info_span!(
            "plan.dispatch",
            operation_id = %operation.id,
            kind = %operation.kind,
            %action,
            phase = %params.phase_id
        );
        let _guard = span.enter();

        let target = route(operation.kind, action)?;
        tracing::debug!(?target, "routing operation");

        let start = Instant::now();
        let result = self.run(target, action, params, operation);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                tracing::info!(elapsed_ms, "handler finished");
                Ok(())
            }
            Err(source) => {
                tracing::info!(elapsed_ms, error = %source, "handler failed");
                Err(EngineError::Handler {
                    kind: operation.kind,
                    action,
                    source,
                })
            }
        }
    }

    fn run(
        &self,
        target: HandlerTarget,
        action: PlanAction,
        params: &PhaseParams,
        operation: &Operation,
    ) -> Result<(), HandlerError> {
        let env = &self.env;
        match (target, action) {
            (HandlerTarget::Installer, PlanAction::Execute) => {
                params.installer.execute_phase(env, params, operation)
            }
            (HandlerTarget::Installer, PlanAction::Rollback) => {
                params.installer.rollback_phase(env, params, operation)
            }
            (HandlerTarget::InstallCompleter, _) => {
                self.handlers.install_completer.complete_plan(env, operation)
            }
            (HandlerTarget::GarbageCollect, _) => {
                self.handlers
                    .garbage_collect
                    .execute_phase(env, params, operation)
            }
            (target, action) => match (self.handlers.plan_handler(target), action) {
                (Some(handler), PlanAction::Execute) => {
                    handler.execute_phase(env, params, operation)
                }
                (Some(handler), PlanAction::Rollback) => {
                    handler.rollback_phase(env, params, operation)
                }
                (Some(handler), PlanAction::Complete) => handler.complete_plan(env, operation),
                (None, _) => Err(HandlerError::Failed(format!(
                    "no handler for {:?} {}",
                    target, action
                ))),
            },
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
