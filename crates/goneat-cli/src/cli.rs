// crates/goneat-cli/src/cli.rs
// ============================================================================
// Module: CLI Surface
// Description: clap derive definitions for `goneat`'s three command
//              families (§6): `assess`, `hooks` (+ `hooks policy`), and
//              `doctor tools`.
// Purpose: Be the one place the command-line grammar is declared, kept free
//          of any command's actual logic.
// Dependencies: clap
// ============================================================================

//! ## Overview
//! Raw, loosely-typed flags (CSV strings, duration/severity text) are kept
//! as `String`/`Option<String>` here and parsed by `goneat-config`'s helpers
//! inside each command function, rather than as clap value parsers — the
//! same validation errors then flow through one `CliError` path regardless
//! of whether they came from a flag, `goneat.yaml`, or a manifest.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

/// Top-level `goneat` CLI definition.
#[derive(Parser, Debug)]
#[command(name = "goneat", arg_required_else_help = true)]
pub struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported top-level subcommands (§6).
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs registered checkers over a target and reports findings.
    Assess(AssessArgs),
    /// Manages the git hook manifest and generated/installed scripts.
    Hooks(HooksArgs),
    /// Probes and manages external tool versions.
    Doctor(DoctorArgs),
}

// ============================================================================
// SECTION: assess
// ============================================================================

/// Output format for a rendered [`goneat_core::AssessmentReport`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Per-issue text report (the default).
    Text,
    /// The full report as JSON.
    Json,
    /// A minimal HTML summary table.
    Html,
    /// A markdown summary table.
    Markdown,
    /// One line per category.
    Concise,
}

/// Run mode accepted by `--mode`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Report findings only.
    Check,
    /// Apply fixes where a runner supports it.
    Fix,
    /// Plan without executing any runner.
    NoOp,
}

/// Arguments for `goneat assess`.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Comma-separated category list; empty selects every registered category.
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
    /// Run mode.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    /// Worker pool size; `0` or absent means "auto".
    #[arg(long)]
    pub concurrency: Option<String>,
    /// Per-runner timeout, Go-style (`30s`, `2m`).
    #[arg(long)]
    pub timeout: Option<String>,
    /// Minimum severity that causes a non-zero exit.
    #[arg(long = "fail-on")]
    pub fail_on: Option<String>,
    /// Comma-separated `category=priority` overrides.
    #[arg(long, value_delimiter = ',')]
    pub priority: Vec<String>,
    /// Name of the hook this invocation runs on behalf of, if any.
    #[arg(long)]
    pub hook: Option<String>,
    /// Path to the hook manifest to read `--hook`'s optimization defaults from.
    #[arg(long = "hook-manifest")]
    pub hook_manifest: Option<PathBuf>,
    /// Restrict the run to paths staged for commit.
    #[arg(long = "staged-only")]
    pub staged_only: bool,
    /// Select at package (directory) granularity; delegated to runners.
    #[arg(long = "package-mode")]
    pub package_mode: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Write the rendered report to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Raise the diagnostics sink's minimum level from `warn` to `debug`.
    #[arg(long)]
    pub verbose: bool,
    /// Target path to assess; defaults to the current directory.
    pub target: Option<PathBuf>,
}

// ============================================================================
// SECTION: hooks
// ============================================================================

/// Arguments for `goneat hooks`.
#[derive(Args, Debug)]
pub struct HooksArgs {
    /// Selected hooks subcommand.
    #[command(subcommand)]
    pub command: HooksCommand,
}

/// `goneat hooks` subcommands (§6).
#[derive(Subcommand, Debug)]
pub enum HooksCommand {
    /// Writes a starter `.goneat/hooks.yaml` if none exists.
    Init,
    /// Renders hook scripts from the manifest under `.goneat/hooks/`.
    Generate,
    /// Installs generated scripts into `.git/hooks/`.
    Install,
    /// Validates the manifest against its embedded schema.
    Validate,
    /// Prints a machine-readable inspection of the manifest.
    Inspect,
    /// Removes installed hook scripts, restoring any backup.
    Remove(HooksRemoveArgs),
    /// Re-renders and re-installs every hook the manifest configures.
    Upgrade,
    /// Edits manifest fields directly.
    Policy(HooksPolicyArgs),
}

/// Arguments for `goneat hooks remove`.
#[derive(Args, Debug)]
pub struct HooksRemoveArgs {
    /// Do not restore a preserved third-party hook backup.
    #[arg(long = "no-restore")]
    pub no_restore: bool,
}

/// Arguments for `goneat hooks policy`.
#[derive(Args, Debug)]
pub struct HooksPolicyArgs {
    /// Selected policy subcommand.
    #[command(subcommand)]
    pub command: HooksPolicyCommand,
}

/// `goneat hooks policy` subcommands.
#[derive(Subcommand, Debug)]
pub enum HooksPolicyCommand {
    /// Prints the manifest's `optimization` block.
    Show,
    /// Sets one `optimization` field.
    Set(HooksPolicySetArgs),
    /// Resets `optimization` to its defaults.
    Reset,
    /// Validates the manifest without printing it.
    Validate,
}

/// Arguments for `goneat hooks policy set`.
#[derive(Args, Debug)]
pub struct HooksPolicySetArgs {
    /// Field to set: `only-changed-files`, `content-source`, `parallel`, `cache-results`.
    pub field: String,
    /// New value for `field`.
    pub value: String,
}

// ============================================================================
// SECTION: doctor
// ============================================================================

/// Arguments for `goneat doctor`.
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Selected doctor subcommand.
    #[command(subcommand)]
    pub command: DoctorCommand,
}

/// `goneat doctor` subcommands.
#[derive(Subcommand, Debug)]
pub enum DoctorCommand {
    /// Probes, and optionally installs, tools from `.goneat/tools.yaml`.
    Tools(ToolsArgs),
}

/// Arguments for `goneat doctor tools`.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Restrict to tools in this named scope.
    #[arg(long)]
    pub scope: Option<String>,
    /// Comma-separated tool name filter.
    #[arg(long, value_delimiter = ',')]
    pub tools: Vec<String>,
    /// Install tools that are missing or below policy.
    #[arg(long)]
    pub install: bool,
    /// Skip the interactive confirmation before installing.
    #[arg(long)]
    pub yes: bool,
    /// Ignore the cooling policy when deciding whether to install.
    #[arg(long = "no-cooling")]
    pub no_cooling: bool,
    /// Query upstream for newer releases before evaluating policy.
    #[arg(long = "check-updates")]
    pub check_updates: bool,
    /// Report what would happen without installing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
    /// List the scopes present in `.goneat/tools.yaml` and exit.
    #[arg(long = "list-scopes")]
    pub list_scopes: bool,
}
