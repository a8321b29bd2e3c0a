// crates/goneat-hooks/src/install.rs
// ============================================================================
// Module: Hook Install/Remove
// Description: Copies generated scripts into `.git/hooks/`, preserving any
//              pre-existing third-party hook as a backup (§4.5).
// Purpose: The two filesystem-mutating halves of the hook lifecycle.
// Dependencies: goneat-core
// ============================================================================

//! ## Overview
//! Both operations are idempotent. `install_hook` only takes a backup the
//! first time it overwrites a hook that does not carry
//! [`crate::generator::GONEAT_MARKER`]; re-installing a goneat-managed hook
//! just overwrites it in place. `remove_hook` deletes the installed script
//! and, unless told not to, restores the backup it shadowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use crate::error::HooksError;
use crate::error::HooksResult;
use crate::generator::GONEAT_MARKER;
use crate::generator::GeneratedHook;
use crate::manifest::HookName;

/// Outcome of installing one hook script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Hook that was installed.
    pub name: HookName,
    /// Path the script was written to (`.git/hooks/<name>`).
    pub installed_path: PathBuf,
    /// Whether a pre-existing non-goneat hook was preserved as a backup.
    pub backed_up: bool,
}

/// Installs `generated` into `git_hooks_dir`, backing up any existing
/// non-goneat hook of the same name as `<name>.backup` first.
///
/// # Errors
///
/// Returns [`HooksError::Io`] on any filesystem failure.
pub fn install_hook(git_hooks_dir: &Path, generated: &GeneratedHook) -> HooksResult<InstallOutcome> {
    std::fs::create_dir_all(git_hooks_dir).map_err(|err| HooksError::Io(err.to_string()))?;
    let target = git_hooks_dir.join(generated.name.as_str());
    let backed_up = back_up_if_foreign(&target)?;
    std::fs::write(&target, &generated.content).map_err(|err| HooksError::Io(err.to_string()))?;
    set_executable(&target)?;
    Ok(InstallOutcome { name: generated.name, installed_path: target, backed_up })
}

/// Removes the installed hook, restoring its backup unless `restore_backup`
/// is `false`.
///
/// # Errors
///
/// Returns [`HooksError::Io`] on any filesystem failure.
pub fn remove_hook(git_hooks_dir: &Path, name: HookName, restore_backup: bool) -> HooksResult<bool> {
    let target = git_hooks_dir.join(name.as_str());
    let backup = backup_path(git_hooks_dir, name);
    if target.exists() {
        std::fs::remove_file(&target).map_err(|err| HooksError::Io(err.to_string()))?;
    }
    if restore_backup && backup.exists() {
        std::fs::rename(&backup, &target).map_err(|err| HooksError::Io(err.to_string()))?;
        return Ok(true);
    }
    Ok(false)
}

/// Backs up `target` as `<name>.backup` when it exists and is not already a
/// goneat-managed hook. Returns whether a backup was taken.
fn back_up_if_foreign(target: &Path) -> HooksResult<bool> {
    if !target.exists() {
        return Ok(false);
    }
    let content = std::fs::read_to_string(target).unwrap_or_default();
    if content.contains(GONEAT_MARKER) {
        return Ok(false);
    }
    let Some(name) = target.file_name() else {
        return Ok(false);
    };
    let backup = target.with_file_name(format!("{}.backup", name.to_string_lossy()));
    std::fs::rename(target, &backup).map_err(|err| HooksError::Io(err.to_string()))?;
    Ok(true)
}

/// Computes the backup path for a hook name under `git_hooks_dir`.
fn backup_path(git_hooks_dir: &Path, name: HookName) -> PathBuf {
    git_hooks_dir.join(format!("{}.backup", name.as_str()))
}

/// Sets mode `0700` on Unix so git will execute the hook; a no-op elsewhere.
#[cfg(unix)]
fn set_executable(path: &Path) -> HooksResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700)).map_err(|err| HooksError::Io(err.to_string()))
}

/// Sets mode `0700` on Unix so git will execute the hook; a no-op elsewhere.
#[cfg(not(unix))]
fn set_executable(_path: &Path) -> HooksResult<()> {
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
