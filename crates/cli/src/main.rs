// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! opctl - cluster operation plan control

mod commands;
mod completions;
mod context;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{operation, plan};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::context::Context;
use crate::error::CliError;

#[derive(Parser)]
#[command(
    name = "opctl",
    version,
    about = "opctl - resume, execute and roll back cluster operation plans"
)]
struct Cli {
    /// Root directory of the local operation stores
    #[arg(long, global = true, env = "OPCTL_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Configuration file (defaults to opctl.toml in the state directory)
    #[arg(long, global = true, env = "OPCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Operation plan management
    Plan(plan::PlanArgs),
    /// Inspect operations across all stores
    Operation(operation::OperationArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err = CliError::from_anyhow(e);
            eprint!("{}", err);
            ExitCode::from(err.exit_code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Completions need no configuration
    if let Commands::Completions(args) = &cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let ctx = Context::load(cli.config.as_deref(), cli.state_dir)?;
    tracing::debug!(state_dir = %ctx.config.state_dir.display(), "loaded configuration");

    match cli.command {
        Commands::Plan(args) => plan::handle(args.command, &ctx),
        Commands::Operation(args) => operation::handle(args.command, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

fn setup_logging(debug: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("OPCTL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}
