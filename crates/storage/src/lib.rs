// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! File-backed operation stores
//!
//! Each local environment (install wizard, update, join, and the local
//! view of the cluster store) is a directory holding an append-only log of
//! [`StoreOp`] entries. The log is replayed into [`MaterializedState`].

mod state;
mod store;
mod wal;

pub use state::{MaterializedState, PhaseState};
pub use store::{OperationStore, StoreError, LOG_FILE_NAME};
pub use wal::{StoreOp, Wal, WalError};
