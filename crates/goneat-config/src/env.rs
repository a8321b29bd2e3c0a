// crates/goneat-config/src/env.rs
// ============================================================================
// Module: Environment Variables
// Description: Reads the environment variables goneat recognizes (§4.6).
// Purpose: Keep every `std::env::var` call in one place so the behaviors
//          they drive (state root, offline schema validation, GitHub
//          metadata fetching, CI prompt suppression) are easy to audit.
// Dependencies: none
// ============================================================================

//! ## Overview
//! None of these variables feed [`goneat_core::AssessmentConfig`] directly;
//! they control ambient behavior (where state lives, whether to fetch remote
//! schemas, whether to prompt interactively) that sits alongside it.

use std::env;
use std::path::PathBuf;

/// Snapshot of the environment variables goneat recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvOverrides {
    /// `GONEAT_HOME`: overrides the state root (cache, installed hooks dir).
    pub goneat_home: Option<PathBuf>,
    /// `GONEAT_OFFLINE_SCHEMA_VALIDATION`: when set truthy, drops `$schema`
    /// references before compiling embedded schemas, so validation never
    /// attempts a remote fetch.
    pub offline_schema_validation: bool,
    /// `GITHUB_TOKEN`: bearer token for the doctor's metadata fetcher.
    pub github_token: Option<String>,
    /// `GITHUB_ACTIONS`: true when running inside a GitHub Actions job.
    pub github_actions: bool,
    /// `GITHUB_PATH`: file to append `PATH` entries to after `doctor --install`.
    pub github_path: Option<PathBuf>,
    /// `CI`: true when running under any recognized CI provider; suppresses
    /// interactive prompts.
    pub ci: bool,
}

impl EnvOverrides {
    /// Reads the current process environment.
    #[must_use]
    pub fn from_current_env() -> Self {
        Self {
            goneat_home: env::var_os("GONEAT_HOME").map(PathBuf::from),
            offline_schema_validation: is_truthy(env::var("GONEAT_OFFLINE_SCHEMA_VALIDATION").ok().as_deref()),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|value| !value.is_empty()),
            github_actions: is_truthy(env::var("GITHUB_ACTIONS").ok().as_deref()),
            github_path: env::var_os("GITHUB_PATH").map(PathBuf::from),
            ci: is_truthy(env::var("CI").ok().as_deref()),
        }
    }

    /// Resolves the effective state root: `GONEAT_HOME` if set, else the
    /// platform user-config directory's `goneat` subdirectory, else `.goneat`
    /// under the current directory as a last resort.
    #[must_use]
    pub fn state_root(&self, fallback_project_root: &std::path::Path) -> PathBuf {
        if let Some(home) = &self.goneat_home {
            return home.clone();
        }
        if let Some(config_dir) = dirs_config_dir() {
            return config_dir.join("goneat");
        }
        fallback_project_root.join(".goneat")
    }
}

/// Returns the platform's user config directory without pulling in a
/// dedicated crate: `$XDG_CONFIG_HOME` or `$HOME/.config` on Unix,
/// `%APPDATA%` on Windows.
fn dirs_config_dir() -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    if let Some(appdata) = env::var_os("APPDATA") {
        return Some(PathBuf::from(appdata));
    }
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
}

/// Parses a shell-style truthy environment value (`"1"`, `"true"`, `"yes"`,
/// case-insensitively); anything else, including unset, is falsy.
fn is_truthy(value: Option<&str>) -> bool {
    matches!(value.map(str::trim).map(str::to_ascii_lowercase).as_deref(), Some("1" | "true" | "yes" | "on"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
