// crates/goneat-hooks/src/state.rs
// ============================================================================
// Module: Hook State Machine
// Description: Derives a hook's current lifecycle state from the filesystem
//              (§4.5: absent -> generated -> installed -> (removed | regenerated)).
// Purpose: Let `hooks inspect`/`hooks generate`/`hooks install` agree on what
//          "already done" means without duplicating the logic.
// Dependencies: none
// ============================================================================

//! ## Overview
//! `Removed` is a transition, not a steady state: once removed, a hook is
//! simply `Absent` again. This module only reports the three persisted
//! states; callers that need to know "was this just removed" read it off
//! the return value of [`crate::install::remove_hook`] instead.

use std::path::Path;

use crate::manifest::HookName;

/// Lifecycle state of one hook, derived from the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    /// Neither a generated nor an installed script exists.
    Absent,
    /// A script exists under `.goneat/hooks/` but is not installed.
    Generated,
    /// A script is installed under `.git/hooks/`.
    Installed,
}

/// Derives `name`'s current state from `generated_dir` and `git_hooks_dir`.
#[must_use]
pub fn detect_state(generated_dir: &Path, git_hooks_dir: &Path, name: HookName) -> HookState {
    if git_hooks_dir.join(name.as_str()).exists() {
        return HookState::Installed;
    }
    if generated_dir.join(name.as_str()).exists() {
        return HookState::Generated;
    }
    HookState::Absent
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neither_path_existing_is_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(detect_state(&dir.path().join("generated"), &dir.path().join("installed"), HookName::PreCommit), HookState::Absent);
    }

    #[test]
    fn only_the_generated_copy_existing_is_generated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generated_dir = dir.path().join("generated");
        std::fs::create_dir_all(&generated_dir).expect("mkdir");
        std::fs::write(generated_dir.join("pre-commit"), "script").expect("write");
        assert_eq!(detect_state(&generated_dir, &dir.path().join("installed"), HookName::PreCommit), HookState::Generated);
    }

    #[test]
    fn an_installed_copy_wins_even_if_the_generated_copy_is_also_present() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generated_dir = dir.path().join("generated");
        let installed_dir = dir.path().join("installed");
        std::fs::create_dir_all(&generated_dir).expect("mkdir");
        std::fs::create_dir_all(&installed_dir).expect("mkdir");
        std::fs::write(generated_dir.join("pre-commit"), "script").expect("write");
        std::fs::write(installed_dir.join("pre-commit"), "script").expect("write");
        assert_eq!(detect_state(&generated_dir, &installed_dir, HookName::PreCommit), HookState::Installed);
    }
}
