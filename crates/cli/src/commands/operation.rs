// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation commands

use crate::context::Context;
use crate::output::{self, OutputFormat};
use clap::{Args, Subcommand};
use op_core::{Operation, OperationStatus};
use op_engine::SourceKind;
use op_storage::{OperationStore, PhaseState};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Args)]
pub struct OperationArgs {
    #[command(subcommand)]
    pub command: OperationCommand,
}

#[derive(Subcommand)]
pub enum OperationCommand {
    /// List operations merged from every store
    List {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the most recent operation
    Show {
        /// Operation to show
        #[arg(long)]
        operation_id: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct OperationInfo {
    id: String,
    kind: String,
    cluster: String,
    state: String,
    status: OperationStatus,
    created: String,
    source: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    phases: BTreeMap<String, PhaseState>,
}

impl OperationInfo {
    fn new(op: &Operation, source: Option<SourceKind>) -> Self {
        Self {
            id: op.id.clone(),
            kind: op.kind.to_string(),
            cluster: op.cluster.clone(),
            state: op.state.to_string(),
            status: op.status(),
            created: op.created.to_rfc3339(),
            source: source.map(|s| s.to_string()),
            phases: BTreeMap::new(),
        }
    }
}

impl fmt::Display for OperationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<38} {:<24} {:<12} {:<26} {}",
            self.id,
            self.kind,
            self.state,
            self.created,
            self.source.as_deref().unwrap_or("-")
        )?;
        for (phase, state) in &self.phases {
            write!(f, "\n  {:<36} {:?}", phase, state)?;
        }
        Ok(())
    }
}

pub fn handle(command: OperationCommand, ctx: &Context) -> anyhow::Result<()> {
    match command {
        OperationCommand::List { format } => list(ctx, format),
        OperationCommand::Show {
            operation_id,
            format,
        } => show(ctx, operation_id.as_deref(), format),
    }
}

fn list(ctx: &Context, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = ctx.resolver().list();
    for diagnostic in &resolved.diagnostics {
        if !diagnostic.error.is_not_found() {
            eprintln!("warning: {}: {}", diagnostic.source, diagnostic.error);
        }
    }

    let infos: Vec<OperationInfo> = resolved
        .candidates(None)
        .iter()
        .map(|op| OperationInfo::new(op, resolved.origins.get(&op.id).copied()))
        .collect();
    output::print_list(&infos, format, "No operations found")
}

fn show(ctx: &Context, operation_id: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = ctx.resolver().list();
    let op = resolved.most_recent(operation_id)?;
    let source = resolved.origins.get(&op.id).copied();

    let mut info = OperationInfo::new(&op, source);
    if let Some(dir) = source.and_then(|s| ctx.source_dir(s)) {
        let state = OperationStore::read(dir)?;
        if let Some(phases) = state.phases.get(&op.id) {
            info.phases = phases.clone();
        }
    }
    output::print(&info, format)
}
