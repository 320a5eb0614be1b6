// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of operation store changes

use crate::PhaseState;
use op_core::{Operation, OperationState};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Changes persisted to an operation store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreOp {
    /// Record a new operation (or replace an existing copy with the same ID)
    OperationCreate { operation: Operation },

    /// Move an operation to a new state
    OperationStateUpdate { id: String, state: OperationState },

    /// Record the outcome of a single plan phase
    PhaseStateUpdate {
        operation_id: String,
        phase: String,
        state: PhaseState,
    },
}

/// Append-only log, one JSON entry per line
pub struct Wal {
    file: File,
    sequence: u64,
}

impl Wal {
    /// Open or create a WAL at the given path
    pub fn open(path: &Path) -> Result<Self, WalError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        let reader = BufReader::new(File::open(path)?);
        let sequence = reader.lines().count() as u64;

        Ok(Self { file, sequence })
    }

    /// Append a change to the log and sync it to disk
    pub fn append(&mut self, op: &StoreOp) -> Result<u64, WalError> {
        self.sequence += 1;
        let entry = WalEntry {
            seq: self.sequence,
            op: op.clone(),
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        Ok(self.sequence)
    }

    /// Replay all changes from the log. A missing log is an empty log.
    pub fn replay(path: &Path) -> Result<Vec<StoreOp>, WalError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut ops = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: WalEntry = serde_json::from_str(&line).map_err(|source| WalError::Json {
                line: index + 1,
                source,
            })?;
            ops.push(entry.op);
        }

        Ok(ops)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WalEntry {
    seq: u64,
    op: StoreOp,
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
