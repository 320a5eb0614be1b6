// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use op_core::{FakeClock, OperationKind};
use std::path::PathBuf;
use tempfile::TempDir;

fn environments(root: &Path) -> Environments {
    Environments {
        cluster_dir: root.join("cluster"),
        wizard_dir: root.join("wizard"),
        update_dir: Some(root.join("update")),
        join_dir: None,
    }
}

fn operation(state: OperationState) -> Operation {
    Operation::new("op-1", OperationKind::Update, "prod", &FakeClock::new()).with_state(state)
}

fn read(dir: PathBuf) -> op_storage::MaterializedState {
    OperationStore::read(&dir).unwrap()
}

#[test]
fn execute_seeds_operation_and_records_phase() {
    let tmp = TempDir::new().unwrap();
    let env = environments(tmp.path());
    let handler = JournalHandler::new(StoreTarget::Update);
    let params = PhaseParams::for_phase("/masters/node-1");

    handler
        .execute_phase(&env, &params, &operation(OperationState::Initiated))
        .unwrap();

    let state = read(tmp.path().join("update"));
    assert_eq!(state.operations["op-1"].state, OperationState::InProgress);
    assert_eq!(
        state.phase_state("op-1", "/masters/node-1"),
        Some(PhaseState::Completed)
    );
}

#[test]
fn rollback_records_rolled_back_phase() {
    let tmp = TempDir::new().unwrap();
    let env = environments(tmp.path());
    let handler = JournalHandler::new(StoreTarget::Cluster);
    let params = PhaseParams::for_phase("/gc");
    let op = operation(OperationState::InProgress);

    handler.execute_phase(&env, &params, &op).unwrap();
    handler.rollback_phase(&env, &params, &op).unwrap();

    let state = read(tmp.path().join("cluster"));
    assert_eq!(state.phase_state("op-1", "/gc"), Some(PhaseState::RolledBack));
}

#[test]
fn completed_operation_is_refused_without_force() {
    let tmp = TempDir::new().unwrap();
    let env = environments(tmp.path());
    let handler = JournalHandler::new(StoreTarget::Update);
    let op = operation(OperationState::Completed);

    let err = handler
        .execute_phase(&env, &PhaseParams::for_phase("/"), &op)
        .unwrap_err();
    assert!(matches!(err, HandlerError::OperationCompleted(ref id) if id == "op-1"));
    assert!(!tmp.path().join("update").exists());

    let params = PhaseParams {
        force: true,
        ..PhaseParams::for_phase("/")
    };
    handler.execute_phase(&env, &params, &op).unwrap();
    assert_eq!(
        read(tmp.path().join("update")).phase_state("op-1", "/"),
        Some(PhaseState::Completed)
    );
}

#[test]
fn missing_environment_is_reported() {
    let tmp = TempDir::new().unwrap();
    let env = environments(tmp.path());
    let handler = JournalHandler::new(StoreTarget::Join);

    let err = handler
        .execute_phase(&env, &PhaseParams::default(), &operation(OperationState::Initiated))
        .unwrap_err();

    assert!(matches!(err, HandlerError::MissingEnvironment("join")));
}

#[test]
fn complete_marks_operation_completed() {
    let tmp = TempDir::new().unwrap();
    let env = environments(tmp.path());
    let handler = JournalHandler::new(StoreTarget::Wizard);

    handler
        .complete_plan(&env, &operation(OperationState::InProgress))
        .unwrap();

    let state = read(tmp.path().join("wizard"));
    assert_eq!(state.operations["op-1"].state, OperationState::Completed);
}
