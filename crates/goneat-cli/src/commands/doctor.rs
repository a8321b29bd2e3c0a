// crates/goneat-cli/src/commands/doctor.rs
// ============================================================================
// Module: `goneat doctor`
// Description: Probes `.goneat/tools.yaml` policies against the installed
//              toolchain, optionally checking upstream releases and
//              installing what policy allows (§4.4, §6).
// Purpose: Translate `doctor tools` flags into `goneat-doctor` calls and a
//          per-tool status report.
// Dependencies: goneat-config, goneat-core, goneat-doctor
// ============================================================================

//! ## Overview
//! `--check-updates` and `--install` are the two paths that touch the
//! network: both open a [`goneat_doctor::ToolMetadataCache`] under the
//! resolved state root ([`goneat_config::EnvOverrides::state_root`]) and a
//! [`goneat_doctor::GitHubReleaseFetcher`], then ask
//! [`goneat_doctor::check_cooling`] per tool that declares a `github_repo`.
//! `--install` never prompts on stdin; an install proceeds only when `--yes`
//! is also given, matching this crate's non-interactive posture elsewhere.
//! Cooling safety is the default for `--install`: unless `--no-cooling` is
//! given, a tool still inside its cooling window is skipped regardless of
//! whether `--check-updates` was also passed (§4.4).

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use goneat_config::EnvOverrides;
use goneat_config::ToolManifestEntry;
use goneat_config::repo_for_tool;
use goneat_core::Clock;
use goneat_core::SystemClock;
use goneat_doctor::CoolingVerdict;
use goneat_doctor::DEFAULT_TTL;
use goneat_doctor::GitHubReleaseFetcher;
use goneat_doctor::ToolCheck;
use goneat_doctor::ToolMetadataCache;
use goneat_doctor::VersionVerdict;

use crate::cli::DoctorArgs;
use crate::cli::DoctorCommand;
use crate::cli::ToolsArgs;
use crate::error::CliError;
use crate::error::CliResult;
use crate::output;

/// Runs `goneat doctor <subcommand>` against the current directory.
pub async fn run(args: DoctorArgs) -> CliResult<()> {
    match args.command {
        DoctorCommand::Tools(tools_args) => tools(tools_args).await,
    }
}

fn current_root() -> CliResult<PathBuf> {
    std::env::current_dir().map_err(|err| CliError::new(format!("failed to resolve current directory: {err}")))
}

fn write_line(message: &str) -> CliResult<()> {
    output::write_stdout_line(message).map_err(|err| CliError::new(err.to_string()))
}

async fn tools(args: ToolsArgs) -> CliResult<()> {
    let root = current_root()?;
    let entries = goneat_config::load_tools_manifest(&root)?;

    if args.list_scopes {
        let scopes: BTreeSet<&str> = entries.iter().map(|entry| entry.scope.as_str()).filter(|scope| !scope.is_empty()).collect();
        if scopes.is_empty() {
            write_line("(no scopes configured)")?;
        }
        for scope in scopes {
            write_line(scope)?;
        }
        return Ok(());
    }

    let selected: Vec<&ToolManifestEntry> = entries
        .iter()
        .filter(|entry| args.scope.as_deref().is_none_or(|scope| entry.scope == scope))
        .filter(|entry| args.tools.is_empty() || args.tools.iter().any(|name| name == &entry.policy.tool))
        .collect();

    if selected.is_empty() {
        return write_line("no tools matched the given filters");
    }

    let needs_cache = args.check_updates || (args.install && !args.no_cooling);
    let cache = if needs_cache { Some(open_metadata_cache(&root, &entries)?) } else { None };

    for entry in selected {
        let check = goneat_doctor::check(&entry.policy, &entry.version_flag);
        report_check(&entry.policy.tool, &check)?;

        if args.check_updates {
            if let Some((cache, fetcher)) = &cache {
                if entry.github_repo.is_some() {
                    match goneat_doctor::check_cooling(&entry.policy, cache, fetcher, SystemClock.now()).await {
                        Ok(verdict) => report_cooling(&entry.policy.tool, &verdict)?,
                        Err(err) => write_line(&format!("  {}: failed to check upstream releases: {err}", entry.policy.tool))?,
                    }
                }
            }
        }

        if args.install {
            maybe_install(entry, &check, &args, cache.as_ref()).await?;
        }
    }
    Ok(())
}

/// Opens the shared tool-metadata cache and a `GitHubReleaseFetcher` seeded
/// from `entries`' `github_repo` fields and any `GONEAT_GITHUB_TOKEN`.
fn open_metadata_cache(root: &Path, entries: &[ToolManifestEntry]) -> CliResult<(ToolMetadataCache, GitHubReleaseFetcher)> {
    let env = EnvOverrides::from_current_env();
    let state_root = env.state_root(root);
    std::fs::create_dir_all(&state_root).map_err(|err| CliError::new(format!("failed to create {}: {err}", state_root.display())))?;
    let cache = ToolMetadataCache::open(&state_root.join("tool-metadata.sqlite3"), DEFAULT_TTL)?;
    let fetcher = GitHubReleaseFetcher::new(repo_for_tool(entries), env.github_token.clone());
    Ok((cache, fetcher))
}

fn report_check(tool: &str, check: &ToolCheck) -> CliResult<()> {
    let line = match check {
        ToolCheck::UnsupportedPlatform => format!("{tool}: unsupported on this platform"),
        ToolCheck::NotInstalled => format!("{tool}: not installed"),
        ToolCheck::Installed { version, verdict } => format!("{tool}: {version} ({})", describe_verdict(verdict)),
    };
    write_line(&line)
}

fn describe_verdict(verdict: &VersionVerdict) -> String {
    match verdict {
        VersionVerdict::Allowed => "ok".to_string(),
        VersionVerdict::Disallowed { matched } => format!("disallowed, matches {matched}"),
        VersionVerdict::BelowMinimum { installed, minimum } => format!("below minimum {minimum} (have {installed})"),
        VersionVerdict::BelowRecommended { installed, recommended } => format!("below recommended {recommended} (have {installed})"),
    }
}

fn report_cooling(tool: &str, verdict: &CoolingVerdict) -> CliResult<()> {
    let status = if verdict.cooled {
        "cooled".to_string()
    } else {
        match verdict.remaining {
            Some(remaining) => format!("cooling, {} remaining", goneat_core::time::format_duration_go_style(std::time::Duration::from_secs(remaining.whole_seconds().max(0) as u64))),
            None => "cooling".to_string(),
        }
    };
    let alert_note = if verdict.alert_only { " (alert-only)" } else { "" };
    write_line(&format!("  {tool}: upstream release {status}{alert_note}"))
}

/// Installs `entry` when its check warrants it, honoring `--dry-run`,
/// `--yes`, and `--no-cooling`. `cache` is populated whenever cooling must
/// be enforced (`!args.no_cooling`), independent of `--check-updates`.
async fn maybe_install(entry: &ToolManifestEntry, check: &ToolCheck, args: &ToolsArgs, cache: Option<&(ToolMetadataCache, GitHubReleaseFetcher)>) -> CliResult<()> {
    let needs_install = matches!(check, ToolCheck::NotInstalled) || matches!(check, ToolCheck::Installed { verdict: VersionVerdict::BelowMinimum { .. }, .. });
    if !needs_install {
        return Ok(());
    }
    if entry.install.is_empty() {
        return write_line(&format!("  {}: no install command configured", entry.policy.tool));
    }
    if args.dry_run {
        return write_line(&format!("  {}: would run `{}`", entry.policy.tool, entry.install.join(" ")));
    }
    if !args.yes {
        return write_line(&format!("  {}: pass --yes to install (`{}`)", entry.policy.tool, entry.install.join(" ")));
    }
    if !args.no_cooling {
        if let Some((cache, fetcher)) = cache {
            if entry.github_repo.is_some() {
                let verdict = goneat_doctor::check_cooling(&entry.policy, cache, fetcher, SystemClock.now()).await?;
                if !verdict.cooled && !verdict.alert_only {
                    return write_line(&format!("  {}: skipped install, release is still cooling", entry.policy.tool));
                }
            }
        }
    }
    let outcome = goneat_doctor::install(&entry.install).await?;
    let status = if outcome.success { "succeeded" } else { "failed" };
    write_line(&format!("  {}: install {status}", entry.policy.tool))
}
