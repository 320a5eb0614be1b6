// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use op_core::{FakeClock, OperationKind};

fn create(id: &str) -> StoreOp {
    StoreOp::OperationCreate {
        operation: Operation::new(id, OperationKind::Update, "prod", &FakeClock::new()),
    }
}

#[test]
fn wal_replays_appended_changes_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.jsonl");

    {
        let mut wal = Wal::open(&path).unwrap();
        wal.append(&create("op-1")).unwrap();
        wal.append(&StoreOp::OperationStateUpdate {
            id: "op-1".to_string(),
            state: OperationState::InProgress,
        })
        .unwrap();
        wal.append(&StoreOp::PhaseStateUpdate {
            operation_id: "op-1".to_string(),
            phase: "/masters".to_string(),
            state: PhaseState::Completed,
        })
        .unwrap();
    }

    let ops = Wal::replay(&path).unwrap();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0], create("op-1"));
    assert!(matches!(ops[1], StoreOp::OperationStateUpdate { .. }));
    assert!(matches!(ops[2], StoreOp::PhaseStateUpdate { .. }));
}

#[test]
fn wal_sequence_continues_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.jsonl");

    {
        let mut wal = Wal::open(&path).unwrap();
        assert_eq!(wal.append(&create("op-1")).unwrap(), 1);
    }

    let mut wal = Wal::open(&path).unwrap();
    assert_eq!(wal.append(&create("op-2")).unwrap(), 2);
}

#[test]
fn wal_replay_of_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let ops = Wal::replay(&dir.path().join("absent.jsonl")).unwrap();
    assert!(ops.is_empty());
}

#[test]
fn wal_replay_reports_corrupt_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.jsonl");
    {
        let mut wal = Wal::open(&path).unwrap();
        wal.append(&create("op-1")).unwrap();
    }
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file, "{{not json").unwrap();

    let err = Wal::replay(&path).unwrap_err();
    assert!(matches!(err, WalError::Json { line: 2, .. }));
}

#[test]
fn store_ops_are_tagged_on_the_wire() {
    let json = serde_json::to_value(StoreOp::OperationStateUpdate {
        id: "op-1".to_string(),
        state: OperationState::Completed,
    })
    .unwrap();

    assert_eq!(json["type"], "operation_state_update");
    assert_eq!(json["state"], "completed");
}
