// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use op_core::{FakeClock, Operation, OperationKind, OperationState};
use op_storage::{MaterializedState, OperationStore};
use std::path::Path;
use tempfile::TempDir;

/// `opctl` bound to an isolated state directory
pub fn opctl(state: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("opctl").unwrap();
    cmd.env("OPCTL_STATE_DIR", state.path())
        .env_remove("OPCTL_CONFIG")
        .env_remove("OPCTL_LOG");
    cmd
}

/// Operation created `secs` seconds after the epoch
pub fn operation(id: &str, kind: OperationKind, secs: i64, state: OperationState) -> Operation {
    let clock = FakeClock::new();
    clock.advance_secs(secs);
    Operation::new(id, kind, "prod", &clock).with_state(state)
}

/// Record operations in the store under `state/<store>`
pub fn seed(state: &TempDir, store: &str, operations: Vec<Operation>) {
    let mut store = OperationStore::open(&state.path().join(store)).unwrap();
    for op in operations {
        store.put_operation(op).unwrap();
    }
}

pub fn read(state: &TempDir, store: &str) -> MaterializedState {
    OperationStore::read(&state.path().join(store)).unwrap()
}

pub fn write_config(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}
