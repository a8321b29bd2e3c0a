// crates/goneat-cli/src/main.rs
// ============================================================================
// Binary: goneat
// Description: Parses the CLI grammar and dispatches to the `assess`,
//              `hooks`, and `doctor` command families (§6).
// Purpose: The process entry point; holds no logic beyond parse, dispatch,
//          and the single Ctrl-C -> cancellation wire-up `assess` needs (§5).
// Dependencies: clap, tokio, tokio-util
// ============================================================================

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! `goneat`: a repository-assessment CLI orchestrator.

mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser as _;
use tokio_util::sync::CancellationToken;

use cli::Cli;
use cli::Commands;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Assess(args) => run_assess(args).await,
        Commands::Hooks(args) => match commands::hooks::run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => output::emit_error(&format!("error: {err}")),
        },
        Commands::Doctor(args) => match commands::doctor::run(args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => output::emit_error(&format!("error: {err}")),
        },
    }
}

/// Runs `assess`, wiring `Ctrl-C` to the run's [`CancellationToken`] so a
/// runner mid-flight gets a chance to stop at its next checkpoint (§5).
async fn run_assess(args: cli::AssessArgs) -> ExitCode {
    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });
    commands::assess::run(args, cancellation).await
}
