// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! op-core: shared types for the opctl cluster operation tool
//!
//! This crate provides:
//! - The operation record shared by every backend
//! - Clock and ID abstractions so time and identity are testable
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod id;
pub mod operation;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use operation::{Operation, OperationKind, OperationState, OperationStatus, ParseError};
