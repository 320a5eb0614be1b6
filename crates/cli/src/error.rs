// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error carries the message, the context lines explaining it, the
//! suggestions for fixing it and the process exit code.

use op_engine::{EngineError, ErrorKind, HandlerError};
use std::fmt;

/// Exit code for any failure without a more specific code
pub const EXIT_FAILURE: u8 = 1;
/// Exit code when no (active) operation could be found
pub const EXIT_NOT_FOUND: u8 = 2;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    pub exit_code: u8,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            exit_code: EXIT_FAILURE,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_exit_code(mut self, code: u8) -> Self {
        self.exit_code = code;
        self
    }

    /// Convert a command failure, keeping the kind of engine errors
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        if let Some(engine) = err.downcast_ref::<EngineError>() {
            return Self::from_engine(engine);
        }
        err.chain()
            .skip(1)
            .fold(Self::new(err.to_string()), |e, cause| {
                e.with_context(cause.to_string())
            })
    }

    pub fn from_engine(err: &EngineError) -> Self {
        let error = Self::new(err.to_string());
        if err.kind() == ErrorKind::NotFound {
            return error
                .with_exit_code(EXIT_NOT_FOUND)
                .with_suggestion("List known operations: opctl operation list")
                .with_suggestion("Start over with: opctl plan resume");
        }
        match err {
            EngineError::Handler {
                source: HandlerError::OperationCompleted(_),
                ..
            } => error.with_suggestion("Re-run the command with --force"),
            EngineError::Handler {
                source: HandlerError::MissingEnvironment(_),
                ..
            } => error.with_context("The operation's local environment directory does not exist"),
            _ => error,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {}
