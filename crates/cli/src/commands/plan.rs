// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan commands

use crate::context::Context;
use clap::{Args, Subcommand};
use op_engine::{PhaseParams, ResumeOutcome, ROOT_PHASE};
use std::time::Duration;

#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommand,
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Resume the last operation, or start installation if there is none
    Resume(PhaseOptions),
    /// Execute a phase of the active operation's plan
    Execute {
        /// Phase to execute
        #[arg(long)]
        phase: String,
        #[command(flatten)]
        options: PhaseOptions,
    },
    /// Roll back a phase of the active operation's plan
    Rollback {
        /// Phase to roll back
        #[arg(long)]
        phase: String,
        #[command(flatten)]
        options: PhaseOptions,
    },
    /// Mark the active operation's plan completed
    Complete {
        /// Operation to complete (defaults to the most recent active one)
        #[arg(long)]
        operation_id: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct PhaseOptions {
    /// Operation to work with (defaults to the most recent active one)
    #[arg(long)]
    pub operation_id: Option<String>,
    /// Run the phase even if it would be refused otherwise
    #[arg(long)]
    pub force: bool,
    /// Phase execution timeout, e.g. "10m" (defaults to the configured one)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
    /// Skip the binary version compatibility check
    #[arg(long)]
    pub skip_version_check: bool,
}

impl PhaseOptions {
    fn into_params(self, phase: impl Into<String>, default_timeout: Duration) -> PhaseParams {
        PhaseParams {
            phase_id: phase.into(),
            operation_id: self.operation_id,
            force: self.force,
            timeout: self.timeout.unwrap_or(default_timeout),
            skip_version_check: self.skip_version_check,
            ..PhaseParams::default()
        }
    }
}

pub fn handle(command: PlanCommand, ctx: &Context) -> anyhow::Result<()> {
    let dispatcher = ctx.dispatcher();
    let timeout = ctx.config.phase_timeout;

    match command {
        PlanCommand::Resume(options) => {
            match dispatcher.resume_operation(options.into_params(ROOT_PHASE, timeout))? {
                ResumeOutcome::Resumed(op) => println!("Resumed {}", op),
                ResumeOutcome::Restarted(op) => {
                    println!("No operation to resume, started installation {}", op.id)
                }
            }
        }
        PlanCommand::Execute { phase, options } => {
            let op = dispatcher.execute_phase(&options.into_params(phase.as_str(), timeout))?;
            println!("Executed phase {} of {}", phase, op);
        }
        PlanCommand::Rollback { phase, options } => {
            let op = dispatcher.rollback_phase(&options.into_params(phase.as_str(), timeout))?;
            println!("Rolled back phase {} of {}", phase, op);
        }
        PlanCommand::Complete { operation_id } => {
            let op = dispatcher.complete_plan(operation_id.as_deref())?;
            println!("Completed {}", op.id);
        }
    }
    Ok(())
}
