// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use op_core::{FakeClock, OperationKind};

fn install_op(id: &str) -> Operation {
    Operation::new(id, OperationKind::Install, "prod", &FakeClock::new())
}

#[test]
fn open_creates_directory_and_starts_empty() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("wizard");

    let store = OperationStore::open(&dir).unwrap();

    assert!(dir.is_dir());
    assert_eq!(store.dir(), dir);
    assert!(store.state().operations.is_empty());
}

#[test]
fn changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = OperationStore::open(dir.path()).unwrap();
        store.put_operation(install_op("op-1")).unwrap();
        store
            .set_operation_state("op-1", OperationState::InProgress)
            .unwrap();
        store
            .set_phase_state("op-1", "/", PhaseState::Completed)
            .unwrap();
    }

    let store = OperationStore::open(dir.path()).unwrap();
    let op = &store.state().operations["op-1"];
    assert_eq!(op.state, OperationState::InProgress);
    assert_eq!(
        store.state().phase_state("op-1", "/"),
        Some(PhaseState::Completed)
    );
}

#[test]
fn read_does_not_create_anything() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("missing");

    let state = OperationStore::read(&dir).unwrap();

    assert!(state.operations.is_empty());
    assert!(!dir.exists());
}

#[test]
fn updating_unknown_operation_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = OperationStore::open(dir.path()).unwrap();

    let err = store
        .set_operation_state("ghost", OperationState::Completed)
        .unwrap_err();
    assert!(matches!(err, StoreError::OperationNotFound(id) if id == "ghost"));

    let err = store
        .set_phase_state("ghost", "/", PhaseState::Completed)
        .unwrap_err();
    assert!(matches!(err, StoreError::OperationNotFound(_)));
}

#[test]
fn corrupt_log_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(LOG_FILE_NAME), "garbage\n").unwrap();

    let err = OperationStore::read(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Wal { .. }));
    assert!(err.to_string().contains(LOG_FILE_NAME));
}
