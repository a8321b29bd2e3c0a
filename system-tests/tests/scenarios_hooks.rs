// system-tests/tests/scenarios_hooks.rs
// ============================================================================
// Module: Hook Generation Round-Trip Scenario
// Description: S6 from the hook manifest's acceptance suite.
// Purpose: Exercise generate -> install -> inspect -> remove end to end
//          against a real temporary `.git/hooks` directory.
// Dependencies: goneat-hooks, tempfile
// ============================================================================

use std::error::Error;

use goneat_hooks::HookEntry;
use goneat_hooks::HookManifest;
use goneat_hooks::HookName;
use goneat_hooks::MAX_HEALTH_SCORE;
use goneat_hooks::install_hook;
use goneat_hooks::inspect;
use goneat_hooks::remove_hook;
use goneat_hooks::render_hook;

fn assess_entry() -> HookEntry {
    HookEntry {
        command: "assess".to_string(),
        args: vec!["--categories".to_string(), "format,lint".to_string(), "--fail-on".to_string(), "high".to_string()],
        stage_fixed: false,
        priority: 0,
        timeout: None,
        fallback: None,
    }
}

fn round_trip_manifest() -> HookManifest {
    let mut manifest = HookManifest::default();
    manifest.hooks.insert(HookName::PreCommit, vec![assess_entry()]);
    manifest.hooks.insert(HookName::PrePush, vec![assess_entry()]);
    manifest
}

/// `generate` produces an executable script, `install` copies it into
/// `.git/hooks/pre-commit`, and `inspect` reports a perfect health score and
/// an effective invocation carrying the hook-mode flags the generator
/// derives for an `assess` entry.
#[tokio::test(flavor = "multi_thread")]
async fn hook_generation_installs_and_inspects_cleanly() -> Result<(), Box<dyn Error>> {
    let manifest = round_trip_manifest();
    let generated = render_hook(&manifest, HookName::PreCommit)?;
    assert!(generated.content.contains(goneat_hooks::GONEAT_MARKER));

    let git_hooks_dir = tempfile::tempdir()?;
    let outcome = install_hook(git_hooks_dir.path(), &generated)?;
    assert!(!outcome.backed_up, "a clean directory has nothing to back up");
    assert!(outcome.installed_path.exists());

    let inspection = inspect(&manifest);
    assert_eq!(inspection.health.score, MAX_HEALTH_SCORE);
    assert!(inspection.health.findings.is_empty());

    let pre_commit = inspection.hooks.iter().find(|hook| hook.name == HookName::PreCommit).ok_or("pre-commit inspection missing")?;
    let invocation = &pre_commit.effective_invocation;
    for expected in ["assess", "--hook pre-commit", "--hook-manifest .goneat/hooks.yaml", "--package-mode", "--categories", "format,lint", "--fail-on", "high"] {
        assert!(invocation.contains(expected), "effective invocation `{invocation}` missing `{expected}`");
    }

    let restored = remove_hook(git_hooks_dir.path(), HookName::PreCommit, true)?;
    assert!(!restored, "there was no prior hook to restore");
    assert!(!git_hooks_dir.path().join(HookName::PreCommit.as_str()).exists());
    Ok(())
}

/// `generate -> install -> remove` restores a pre-existing foreign hook
/// byte-for-byte when a backup was taken (Testable Property #7).
#[tokio::test(flavor = "multi_thread")]
async fn removing_an_installed_hook_restores_the_foreign_hook_it_replaced() -> Result<(), Box<dyn Error>> {
    let manifest = round_trip_manifest();
    let generated = render_hook(&manifest, HookName::PreCommit)?;

    let git_hooks_dir = tempfile::tempdir()?;
    let foreign_content = "#!/bin/sh\necho pre-existing hook\n";
    std::fs::write(git_hooks_dir.path().join(HookName::PreCommit.as_str()), foreign_content)?;

    let outcome = install_hook(git_hooks_dir.path(), &generated)?;
    assert!(outcome.backed_up, "a foreign hook must be backed up before being overwritten");

    let restored = remove_hook(git_hooks_dir.path(), HookName::PreCommit, true)?;
    assert!(restored);
    let restored_content = std::fs::read_to_string(git_hooks_dir.path().join(HookName::PreCommit.as_str()))?;
    assert_eq!(restored_content, foreign_content);
    Ok(())
}
