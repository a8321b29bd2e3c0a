// crates/goneat-hooks/src/generator.rs
// ============================================================================
// Module: Hook Script Generator
// Description: Renders a hook's manifest entries into an executable script
//              for the host's shell flavor (§4.5).
// Purpose: Turn a validated manifest into bytes `install` can place under
//          `.git/hooks/`.
// Dependencies: goneat-core
// ============================================================================

//! ## Overview
//! Rendering never touches the filesystem; [`render_hook`] is pure given a
//! manifest and a hook name. [`write_generated`] is the one function that
//! writes the rendered script to `.goneat/hooks/<name>` with mode `0700`
//! (§6, persisted state layout).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use crate::error::HooksError;
use crate::error::HooksResult;
use crate::manifest::EntryKind;
use crate::manifest::HookEntry;
use crate::manifest::HookManifest;
use crate::manifest::HookName;

/// Marker embedded in every generated script, used by `install` to tell a
/// goneat-managed hook apart from a pre-existing third-party one.
pub const GONEAT_MARKER: &str = "# generated by goneat; do not edit by hand";

/// Fixed search order the rendered script uses to locate the `goneat` binary.
pub const BINARY_SEARCH_ORDER: [&str; 4] = ["./bin/goneat", "./dist/goneat", "$PATH", "$GOPATH/bin/goneat"];

/// Shell dialect a generated script is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
    /// POSIX `sh`, used on Unix-like hosts.
    Posix,
    /// Windows PowerShell.
    PowerShell,
}

impl ShellFlavor {
    /// Picks the shell flavor for the host this process is running on.
    #[must_use]
    pub const fn for_host() -> Self {
        if cfg!(target_os = "windows") { Self::PowerShell } else { Self::Posix }
    }

    /// File extension convention for a script in this flavor (empty for
    /// POSIX, since git hook filenames carry no extension).
    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Posix => "",
            Self::PowerShell => ".ps1",
        }
    }
}

/// A rendered, not-yet-written hook script.
#[derive(Debug, Clone)]
pub struct GeneratedHook {
    /// Hook this script implements.
    pub name: HookName,
    /// Shell flavor the script was rendered for.
    pub shell: ShellFlavor,
    /// Full script content, including the goneat marker and shebang.
    pub content: String,
}

/// Renders `manifest`'s entries for `name` into an executable script.
///
/// # Errors
///
/// Returns [`HooksError::NotFound`] when the manifest has no entries
/// configured for `name`.
pub fn render_hook(manifest: &HookManifest, name: HookName) -> HooksResult<GeneratedHook> {
    let entries = manifest.hooks.get(&name).filter(|entries| !entries.is_empty()).ok_or_else(|| HooksError::NotFound(name.as_str().to_string()))?;
    let shell = ShellFlavor::for_host();
    let content = match shell {
        ShellFlavor::Posix => render_posix(manifest, name, entries),
        ShellFlavor::PowerShell => render_powershell(manifest, name, entries),
    };
    Ok(GeneratedHook { name, shell, content })
}

/// Builds the invocation line for one entry, applying the internal-command
/// flag derivation described in §4.5 step 2.
pub(crate) fn render_entry_invocation(manifest: &HookManifest, name: HookName, entry: &HookEntry) -> String {
    let mut parts: Vec<String> = Vec::new();
    match entry.classification() {
        EntryKind::Internal => {
            parts.push("\"$GONEAT_BIN\"".to_string());
            parts.push(entry.command.clone());
            if entry.command == "assess" {
                parts.push(format!("--hook {}", name.as_str()));
                parts.push("--hook-manifest .goneat/hooks.yaml".to_string());
                if manifest.optimization.only_changed_files {
                    parts.push("--staged-only".to_string());
                }
                parts.push("--package-mode".to_string());
            }
        }
        EntryKind::External => parts.push(entry.command.clone()),
    }
    parts.extend(entry.args.iter().cloned());
    parts.join(" ")
}

/// Renders a POSIX `sh` script.
fn render_posix(manifest: &HookManifest, name: HookName, entries: &[HookEntry]) -> String {
    let mut script = String::new();
    script.push_str("#!/usr/bin/env sh\n");
    script.push_str(GONEAT_MARKER);
    script.push('\n');
    script.push_str("set -e\n\n");
    script.push_str("GONEAT_BIN=\"\"\n");
    script.push_str("for candidate in ./bin/goneat ./dist/goneat; do\n");
    script.push_str("  if [ -x \"$candidate\" ]; then\n");
    script.push_str("    GONEAT_BIN=\"$candidate\"\n");
    script.push_str("    break\n");
    script.push_str("  fi\n");
    script.push_str("done\n");
    script.push_str("if [ -z \"$GONEAT_BIN\" ] && command -v goneat >/dev/null 2>&1; then\n");
    script.push_str("  GONEAT_BIN=\"$(command -v goneat)\"\n");
    script.push_str("fi\n");
    script.push_str("if [ -z \"$GONEAT_BIN\" ] && [ -n \"$GOPATH\" ] && [ -x \"$GOPATH/bin/goneat\" ]; then\n");
    script.push_str("  GONEAT_BIN=\"$GOPATH/bin/goneat\"\n");
    script.push_str("fi\n");
    script.push_str("if [ -z \"$GONEAT_BIN\" ]; then\n");
    script.push_str("  echo \"goneat: no goneat binary found (checked ./bin/goneat, ./dist/goneat, \\$PATH, \\$GOPATH/bin/goneat)\" >&2\n");
    script.push_str("  exit 1\n");
    script.push_str("fi\n\n");

    if let Some(guardian) = &manifest.guardian {
        script.push_str(&format!("\"$GONEAT_BIN\" guardian check {} {}\n\n", guardian.scope, guardian.operation));
    }

    for entry in entries {
        script.push_str(&render_entry_invocation(manifest, name, entry));
        script.push('\n');
    }
    script
}

/// Renders a Windows PowerShell script.
fn render_powershell(manifest: &HookManifest, name: HookName, entries: &[HookEntry]) -> String {
    let mut script = String::new();
    script.push_str(GONEAT_MARKER);
    script.push('\n');
    script.push_str("$ErrorActionPreference = \"Stop\"\n\n");
    script.push_str("$goneatBin = $null\n");
    script.push_str("foreach ($candidate in @(\".\\bin\\goneat.exe\", \".\\dist\\goneat.exe\")) {\n");
    script.push_str("  if (Test-Path $candidate) { $goneatBin = $candidate; break }\n");
    script.push_str("}\n");
    script.push_str("if (-not $goneatBin) {\n");
    script.push_str("  $onPath = Get-Command goneat -ErrorAction SilentlyContinue\n");
    script.push_str("  if ($onPath) { $goneatBin = $onPath.Source }\n");
    script.push_str("}\n");
    script.push_str("if (-not $goneatBin -and $env:GOPATH -and (Test-Path \"$env:GOPATH\\bin\\goneat.exe\")) {\n");
    script.push_str("  $goneatBin = \"$env:GOPATH\\bin\\goneat.exe\"\n");
    script.push_str("}\n");
    script.push_str("if (-not $goneatBin) {\n");
    script.push_str("  Write-Error \"goneat: no goneat binary found\"\n");
    script.push_str("  exit 1\n");
    script.push_str("}\n\n");

    if let Some(guardian) = &manifest.guardian {
        script.push_str(&format!("& $goneatBin guardian check {} {}\n\n", guardian.scope, guardian.operation));
    }

    for entry in entries {
        let invocation = render_entry_invocation(manifest, name, entry).replace("\"$GONEAT_BIN\"", "& $goneatBin");
        script.push_str(&invocation);
        script.push('\n');
    }
    script
}

/// Writes `generated` to `dir/<hook-name>`, creating `dir` if needed and
/// setting mode `0700` on Unix hosts.
///
/// # Errors
///
/// Returns [`HooksError::Io`] on any filesystem failure.
pub fn write_generated(dir: &Path, generated: &GeneratedHook) -> HooksResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|err| HooksError::Io(err.to_string()))?;
    let path = dir.join(generated.name.as_str());
    std::fs::write(&path, &generated.content).map_err(|err| HooksError::Io(err.to_string()))?;
    set_owner_executable_only(&path)?;
    Ok(path)
}

/// Sets mode `0700` on Unix; a no-op elsewhere (execute bits are not a
/// meaningful concept for the destination platform's script runner).
#[cfg(unix)]
fn set_owner_executable_only(path: &Path) -> HooksResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700)).map_err(|err| HooksError::Io(err.to_string()))
}

/// Sets mode `0700` on Unix; a no-op elsewhere (execute bits are not a
/// meaningful concept for the destination platform's script runner).
#[cfg(not(unix))]
fn set_owner_executable_only(_path: &Path) -> HooksResult<()> {
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
