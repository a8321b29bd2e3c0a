// crates/goneat-cli/src/commands/assess.rs
// ============================================================================
// Module: `goneat assess`
// Description: Resolves the four-layer config ladder (base < project file <
//              hook-derived < CLI flags), builds the runner registry, and
//              drives one orchestrator run (§4.6, §6, §7).
// Purpose: Be the single place that turns `AssessArgs` into an
//          `AssessmentReport` and an exit code.
// Dependencies: goneat-config, goneat-core, goneat-doctor, goneat-hooks,
//               goneat-orchestrator, goneat-registry, tokio-util
// ============================================================================

//! ## Overview
//! The four layers are resolved as two [`merge_assessment_config`] calls,
//! since that function is strictly two-layer: first `base + project file +
//! hook-derived` produces an intermediate config, then
//! `intermediate + (empty) + CLI flags` lets flags win over everything
//! else (§4.6). Exit codes follow §7: `0` clean; `1` when the fail-on
//! threshold is met (severity gate), regardless of whether any runner also
//! failed — that precedence is the resolution of Open Question #2; `2` for
//! a rejected configuration; `3` when the severity gate did not fire but at
//! least one category had no successful runner (`report.failed_runners` is
//! non-empty) or the report otherwise couldn't be rendered or written.

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use goneat_config::PartialAssessmentConfig;
use goneat_config::TOOLS_MANIFEST_FILE_NAME;
use goneat_config::load_hooks_manifest;
use goneat_config::load_project_assessment_defaults;
use goneat_config::load_tools_manifest;
use goneat_config::merge_assessment_config;
use goneat_config::parse_categories_csv;
use goneat_config::parse_concurrency;
use goneat_config::parse_priority_overrides;
use goneat_config::parse_severity;
use goneat_config::parse_timeout;
use goneat_config::to_policy_entries;
use goneat_core::AssessmentConfig;
use goneat_core::DiagnosticsSink;
use goneat_core::Level;
use goneat_core::Mode;
use goneat_core::StderrSink;
use goneat_core::SystemClock;
use goneat_core::should_fail;
use goneat_doctor::ToolsRunner;
use goneat_registry::RunnerRegistry;
use tokio_util::sync::CancellationToken;

use crate::cli::AssessArgs;
use crate::cli::ModeArg;
use crate::output;

/// A failure that aborts `assess` before a report can be produced.
enum AssessError {
    /// Rejected configuration (bad flag, bad manifest, invalid merged config).
    Config(String),
    /// Everything else: I/O failure rendering or writing the report.
    Internal(String),
}

impl From<goneat_config::ConfigError> for AssessError {
    fn from(err: goneat_config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<goneat_hooks::HooksError> for AssessError {
    fn from(err: goneat_hooks::HooksError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Runs `goneat assess` end to end, returning the process exit code.
pub async fn run(args: AssessArgs, cancellation: CancellationToken) -> ExitCode {
    match run_inner(args, cancellation).await {
        Ok(code) => code,
        Err(AssessError::Config(message)) => {
            let _ = output::write_stderr_line(&format!("error: {message}"));
            ExitCode::from(2)
        }
        Err(AssessError::Internal(message)) => {
            let _ = output::write_stderr_line(&format!("error: {message}"));
            ExitCode::from(3)
        }
    }
}

/// Resolves config, builds the registry, and drives one orchestrator run.
async fn run_inner(args: AssessArgs, cancellation: CancellationToken) -> Result<ExitCode, AssessError> {
    let target = args.target.clone().unwrap_or_else(|| PathBuf::from("."));
    let hook_layer = resolve_hook_layer(&target, args.hook.as_deref(), args.hook_manifest.as_deref(), args.staged_only)?;
    let file_layer = load_project_assessment_defaults(&target)?;
    let flags_layer = resolve_flags_layer(&args, &target)?;

    let intermediate = merge_assessment_config(AssessmentConfig::default(), &file_layer, &hook_layer)?;
    let config = merge_assessment_config(intermediate, &PartialAssessmentConfig::default(), &flags_layer)?;

    let sink = StderrSink::new(config.verbose);
    if args.package_mode {
        sink.emit(Level::Debug, "package-mode requested; granularity is delegated to individual runners");
    }

    let registry = build_registry(&target, &sink)?;
    let report = goneat_orchestrator::run_cancellable_with_diagnostics(&target, &config, &SystemClock, &registry, cancellation, &sink).await;

    let failed_gate = should_fail(&report, config.fail_on);
    let has_failed_runners = !report.failed_runners.is_empty();

    let rendered = output::render_report(&report, args.format).map_err(AssessError::Internal)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered).map_err(|err| AssessError::Internal(format!("failed to write {}: {err}", path.display())))?,
        None => output::write_stdout_line(&rendered).map_err(|err| AssessError::Internal(err.to_string()))?,
    }

    let code = if failed_gate {
        1
    } else if has_failed_runners {
        3
    } else {
        0
    };
    Ok(ExitCode::from(code))
}

/// Builds the registry from `.goneat/tools.yaml`, if present; every other
/// category is left unregistered, which the orchestrator reports as a
/// [`goneat_core::FailedRunner`] rather than an error (§4.3).
fn build_registry(target: &Path, sink: &dyn DiagnosticsSink) -> Result<RunnerRegistry, AssessError> {
    let mut registry = RunnerRegistry::new();
    let tools_path = target.join(TOOLS_MANIFEST_FILE_NAME);
    if tools_path.exists() {
        let entries = load_tools_manifest(target)?;
        let policy_entries = to_policy_entries(&entries);
        sink.emit(Level::Debug, &format!("loaded {} tool polic(y/ies) from {}", policy_entries.len(), tools_path.display()));
        registry.register(Arc::new(ToolsRunner::new(policy_entries)));
    }
    Ok(registry)
}

/// Derives the hook-layer overrides implied by `--hook`/`--hook-manifest`.
///
/// Only populated when `--hook` names a hook this run executes on behalf of;
/// its manifest's `optimization.only_changed_files` (or `--staged-only`
/// alone) restricts the run to currently staged paths.
fn resolve_hook_layer(
    target: &Path,
    hook: Option<&str>,
    hook_manifest_path: Option<&Path>,
    staged_only_flag: bool,
) -> Result<PartialAssessmentConfig, AssessError> {
    let mut layer = PartialAssessmentConfig::default();
    let only_changed_files = if let Some(_hook_name) = hook {
        let manifest = match hook_manifest_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|err| AssessError::Config(format!("failed to read hook manifest {}: {err}", path.display())))?;
                goneat_hooks::parse_manifest(&raw)?
            }
            None => load_hooks_manifest(target)?,
        };
        manifest.optimization.only_changed_files
    } else {
        false
    };

    if only_changed_files || staged_only_flag {
        layer.selected_paths = Some(collect_staged_paths(target)?);
    }
    Ok(layer)
}

/// Lists paths staged for commit via `git diff --name-only --cached`.
///
/// Returns an empty list (rather than failing the whole run) when `git` is
/// unavailable or the target is not a repository, matching §4.3's stance
/// that a runner's own narrowing logic is advisory, not load-bearing.
fn collect_staged_paths(target: &Path) -> Result<Vec<PathBuf>, AssessError> {
    let output = std::process::Command::new("git")
        .arg("diff")
        .arg("--name-only")
        .arg("--cached")
        .current_dir(target)
        .output();
    let Ok(output) = output else {
        return Ok(Vec::new());
    };
    if !output.status.success() {
        return Ok(Vec::new());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().filter(|line| !line.is_empty()).map(PathBuf::from).collect())
}

/// Parses every raw `--categories`/`--mode`/... flag into one CLI-layer
/// [`PartialAssessmentConfig`].
fn resolve_flags_layer(args: &AssessArgs, target: &Path) -> Result<PartialAssessmentConfig, AssessError> {
    let mut layer = PartialAssessmentConfig::default();

    if !args.categories.is_empty() {
        layer.categories = Some(parse_categories_csv(&args.categories.join(","))?);
    }
    if let Some(mode) = args.mode {
        layer.mode = Some(match mode {
            ModeArg::Check => Mode::Check,
            ModeArg::Fix => Mode::Fix,
            ModeArg::NoOp => Mode::NoOp,
        });
    }
    if let Some(raw) = &args.concurrency {
        layer.concurrency = Some(parse_concurrency(raw)?);
    }
    if let Some(raw) = &args.timeout {
        layer.timeout = Some(parse_timeout(raw)?);
    }
    if let Some(raw) = &args.fail_on {
        layer.fail_on = Some(parse_severity(raw)?);
    }
    if !args.priority.is_empty() {
        layer.priority_overrides = Some(parse_priority_overrides(args.priority.iter().map(String::as_str))?);
    }
    if args.staged_only {
        layer.selected_paths = Some(collect_staged_paths(target)?);
    }
    layer.verbose = Some(args.verbose);

    Ok(layer)
}
