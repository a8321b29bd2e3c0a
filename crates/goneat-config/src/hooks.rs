// crates/goneat-config/src/hooks.rs
// ============================================================================
// Module: Hooks Manifest Loading
// Description: Reads `.goneat/hooks.yaml` from disk and hands it to
//              `goneat_hooks::parse_manifest` (§4.5, §4.6).
// Purpose: Let the CLI load a hook manifest the same way it loads
//          `tools.yaml`/`goneat.yaml` — by path, with one error type.
// Dependencies: goneat-hooks
// ============================================================================

//! ## Overview
//! All manifest shape and schema validation lives in `goneat-hooks`; this
//! module only owns the filesystem read and the path-carrying I/O error.

use std::path::Path;

use goneat_hooks::HookManifest;

use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Default hook manifest path, relative to the project root.
pub const HOOKS_MANIFEST_FILE_NAME: &str = ".goneat/hooks.yaml";

/// Reads and validates `<project_root>/.goneat/hooks.yaml`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Hooks`] when its contents fail schema validation or
/// parsing.
pub fn load_hooks_manifest(project_root: &Path) -> ConfigResult<HookManifest> {
    let path = project_root.join(HOOKS_MANIFEST_FILE_NAME);
    let raw = std::fs::read_to_string(&path).map_err(|err| ConfigError::Io {
        path: path.display().to_string(),
        source: err.to_string(),
    })?;
    Ok(goneat_hooks::parse_manifest(&raw)?)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn a_missing_manifest_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        assert!(matches!(load_hooks_manifest(dir.path()), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn a_valid_manifest_on_disk_loads() {
        let dir = tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".goneat")).expect("mkdir");
        std::fs::write(
            dir.path().join(HOOKS_MANIFEST_FILE_NAME),
            "version: 1\nhooks:\n  pre-commit:\n    - command: assess\n      args: []\n      stage_fixed: false\n      priority: 100\n",
        )
        .expect("write hooks.yaml");
        let manifest = load_hooks_manifest(dir.path()).expect("valid manifest");
        assert_eq!(manifest.version, goneat_hooks::MANIFEST_VERSION);
    }
}
