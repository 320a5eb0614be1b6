// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{
    recording_handlers, recording_params, unused_environments, CallLog, RecordingHandler,
};
use crate::{DefaultInstaller, Environments, ErrorKind, Handlers, OperationResolver};
use op_adapters::{BackendError, FakeClusterBackend, FakeEnvironmentBackend, FakeOperator};
use op_core::{FakeClock, OperationKind, OperationState, SequentialIdGen};
use op_storage::{OperationStore, PhaseState};
use std::sync::Arc;
use tempfile::TempDir;

type FakeDispatcher = PhaseDispatcher<FakeClusterBackend, FakeEnvironmentBackend, FakeOperator>;

fn operation(id: &str, kind: OperationKind, state: OperationState) -> Operation {
    Operation::new(id, kind, "prod", &FakeClock::new()).with_state(state)
}

fn dispatcher(cluster: FakeClusterBackend, handlers: Handlers) -> FakeDispatcher {
    PhaseDispatcher::new(
        OperationResolver::new().with_cluster(cluster),
        handlers,
        unused_environments(),
    )
}

#[test]
fn resume_executes_root_phase_of_active_operation() {
    let log = CallLog::default();
    let op = operation("op-1", OperationKind::Install, OperationState::InProgress);
    let dispatcher = dispatcher(
        FakeClusterBackend::with_operations(vec![op.clone()]),
        recording_handlers(&log),
    );

    let outcome = dispatcher
        .resume_operation(recording_params("/masters/node-1", &log))
        .unwrap();

    assert_eq!(outcome, ResumeOutcome::Resumed(op));
    assert_eq!(log.entries(), vec!["installer:execute:op-1:/"]);
}

#[test]
fn resume_without_operations_restarts_installation() {
    let log = CallLog::default();
    let dispatcher = dispatcher(
        FakeClusterBackend::failing(BackendError::Unavailable("down".to_string())),
        recording_handlers(&log),
    );

    let outcome = dispatcher
        .resume_operation(recording_params("/", &log))
        .unwrap();

    assert!(matches!(outcome, ResumeOutcome::Restarted(ref op) if op.id == "restarted-install"));
    assert_eq!(log.entries(), vec!["installer:restart"]);
}

#[test]
fn resume_with_only_completed_operations_restarts_installation() {
    let log = CallLog::default();
    let op = operation("op-1", OperationKind::Install, OperationState::Completed);
    let dispatcher = dispatcher(
        FakeClusterBackend::with_operations(vec![op]),
        recording_handlers(&log),
    );

    let outcome = dispatcher
        .resume_operation(recording_params("/", &log))
        .unwrap();

    assert!(matches!(outcome, ResumeOutcome::Restarted(_)));
    assert_eq!(log.entries(), vec!["installer:restart"]);
}

#[test]
fn resume_propagates_handler_errors_without_restart() {
    let log = CallLog::default();
    let handlers = Handlers {
        update: Arc::new(RecordingHandler::failing("update", &log)),
        ..recording_handlers(&log)
    };
    let op = operation("op-1", OperationKind::Update, OperationState::InProgress);
    let dispatcher = dispatcher(FakeClusterBackend::with_operations(vec![op]), handlers);

    let err = dispatcher
        .resume_operation(recording_params("/", &log))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Handler);
    assert_eq!(log.entries(), vec!["update:execute:op-1:/"]);
}

#[test]
fn resume_executes_garbage_collection() {
    let log = CallLog::default();
    let op = operation("op-1", OperationKind::GarbageCollect, OperationState::InProgress);
    let dispatcher = dispatcher(
        FakeClusterBackend::with_operations(vec![op]),
        recording_handlers(&log),
    );

    dispatcher
        .resume_operation(recording_params("/", &log))
        .unwrap();
    assert_eq!(log.entries(), vec!["gc:execute:op-1:/"]);
}

#[test]
fn default_installer_restart_then_resume_journals_wizard_store() {
    let tmp = TempDir::new().unwrap();
    let env = Environments {
        cluster_dir: tmp.path().join("cluster"),
        wizard_dir: tmp.path().join("wizard"),
        update_dir: None,
        join_dir: None,
    };
    let installer = Arc::new(DefaultInstaller::with_clock_and_ids(
        FakeClock::new(),
        SequentialIdGen::new("install"),
    ));
    let params = PhaseParams {
        installer,
        ..PhaseParams::default()
    };
    let resolver = OperationResolver::<FakeClusterBackend, _, FakeOperator>::new().with_wizard(
        op_adapters::StoreEnvironment::new(env.wizard_dir.clone()),
    );
    let dispatcher = PhaseDispatcher::new(resolver, Handlers::journal(), env.clone());

    let first = dispatcher.resume_operation(params.clone()).unwrap();
    assert!(matches!(first, ResumeOutcome::Restarted(ref op) if op.id == "install-1"));

    let second = dispatcher.resume_operation(params).unwrap();
    assert!(matches!(second, ResumeOutcome::Resumed(ref op) if op.id == "install-1"));

    let state = OperationStore::read(&env.wizard_dir).unwrap();
    assert_eq!(state.phase_state("install-1", "/"), Some(PhaseState::Completed));
    assert_eq!(state.operations["install-1"].state, OperationState::InProgress);
}
