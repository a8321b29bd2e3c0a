// crates/goneat-doctor/src/doctor.rs
// ============================================================================
// Module: Doctor Operations
// Description: check/install/check_cooling entry points combining platform
//              filtering, installed-version detection, and policy evaluation
//              (§4.4).
// Purpose: The public surface the CLI's `doctor` subcommand calls into.
// Dependencies: goneat-core, semver, time, tokio
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Stdio;

use semver::Version;
use time::OffsetDateTime;
use tokio::process::Command;

use crate::cache::ToolMetadataCache;
use crate::error::DoctorError;
use crate::error::DoctorResult;
use crate::fetch::MetadataFetcher;
use crate::platform::applies_to_current_host;
use crate::policy::CoolingVerdict;
use crate::policy::ToolPolicy;
use crate::policy::VersionVerdict;
use crate::policy::evaluate_cooling;
use crate::policy::evaluate_version;

// ============================================================================
// SECTION: Check
// ============================================================================

/// Result of [`check`]: whether this host is even in scope for `tool`, what
/// version (if any) is installed, and how it fares against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCheck {
    /// The policy's `supported_platforms` excludes this host; nothing else is evaluated.
    UnsupportedPlatform,
    /// No installed version could be detected.
    NotInstalled,
    /// An installed version was detected and evaluated against the policy.
    Installed {
        /// Detected installed version.
        version: Version,
        /// Policy verdict for that version.
        verdict: VersionVerdict,
    },
}

/// Checks `policy.tool`'s installation and version-policy status.
///
/// Runs `{tool} {version_flag}` and extracts the first semver-shaped
/// substring from its output. Returns [`ToolCheck::UnsupportedPlatform`]
/// without spawning anything when the policy excludes this host (§4.4,
/// Testable Property #6).
#[must_use]
pub fn check(policy: &ToolPolicy, version_flag: &str) -> ToolCheck {
    if !applies_to_current_host(&policy.supported_platforms) {
        return ToolCheck::UnsupportedPlatform;
    }

    let Some(version) = detect_installed_version(&policy.tool, version_flag) else {
        return ToolCheck::NotInstalled;
    };
    let verdict = evaluate_version(&version, policy);
    ToolCheck::Installed { version, verdict }
}

/// Runs `{command} {version_flag}` and extracts the first semver-shaped
/// substring (`MAJOR.MINOR.PATCH`, with an optional leading `v`) from its
/// combined stdout/stderr.
fn detect_installed_version(command: &str, version_flag: &str) -> Option<Version> {
    let output = std::process::Command::new(command).arg(version_flag).output().ok()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push(' ');
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    extract_semver(&text)
}

/// Scans `text` token by token for the first `MAJOR.MINOR.PATCH` shape.
fn extract_semver(text: &str) -> Option<Version> {
    for token in text.split(|c: char| c.is_whitespace() || c == ',') {
        let candidate = token.trim_start_matches('v').trim_matches(|c: char| !c.is_ascii_digit() && c != '.');
        if let Ok(version) = Version::parse(candidate) {
            return Some(version);
        }
    }
    None
}

// ============================================================================
// SECTION: Cooling
// ============================================================================

/// Checks whether the latest upstream release of `policy.tool` has cooled,
/// per §4.4, fetching through `cache`/`fetcher` and evaluating against `policy`.
///
/// # Errors
///
/// Propagates cache and fetch errors from [`ToolMetadataCache::get_or_fetch`].
pub async fn check_cooling(policy: &ToolPolicy, cache: &ToolMetadataCache, fetcher: &dyn MetadataFetcher, now: OffsetDateTime) -> DoctorResult<CoolingVerdict> {
    let release = cache.get_or_fetch(&policy.tool, fetcher, now).await?;
    Ok(evaluate_cooling(release.published_at, now, policy))
}

// ============================================================================
// SECTION: Install
// ============================================================================

/// Outcome of running an install command via [`install`].
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Whether the command exited successfully.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Runs an install command (`argv[0]` as the program, the rest as args) to
/// completion, capturing its output.
///
/// Goneat does not know how to install any particular tool; the command
/// comes from the tool's own policy/config entry (§4.4's "installers are
/// configured, not hardcoded" note).
///
/// # Errors
///
/// Returns [`DoctorError::Install`] when `argv` is empty or the process
/// cannot be spawned.
pub async fn install(argv: &[String]) -> DoctorResult<InstallOutcome> {
    let (program, args) = argv.split_first().ok_or_else(|| DoctorError::Install("install command is empty".to_string()))?;

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|err| DoctorError::Install(format!("failed to spawn '{program}': {err}")))?;

    Ok(InstallOutcome {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
