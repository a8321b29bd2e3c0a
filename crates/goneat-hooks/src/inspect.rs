// crates/goneat-hooks/src/inspect.rs
// ============================================================================
// Module: Hook Inspection
// Description: Machine-readable view of a manifest: per-entry classification,
//              mutator flags, effective invocation strings, and a health
//              score over common anti-patterns (§4.5).
// Purpose: Back the `goneat hooks inspect` subcommand.
// Dependencies: goneat-core
// ============================================================================

//! ## Overview
//! `health_score` is scored out of [`MAX_HEALTH_SCORE`] criteria, one point
//! each, over the whole manifest rather than per-hook: a manifest with both
//! hooks configured, a current schema version, no unfallback'd external
//! commands, and no suspect `make` targets scores the maximum. The exact
//! checklist is this crate's own design decision; see `DESIGN.md` for the
//! rationale.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::generator::render_entry_invocation;
use crate::manifest::EntryKind;
use crate::manifest::HookEntry;
use crate::manifest::HookManifest;
use crate::manifest::HookName;
use crate::manifest::MANIFEST_VERSION;

/// Maximum possible [`HookHealth::score`].
pub const MAX_HEALTH_SCORE: u32 = 7;

/// `make` targets considered risky to run unattended from a git hook.
const SUSPECT_MAKE_TARGETS: [&str; 5] = ["clean", "install", "publish", "push", "deploy"];

/// Mutator flags observed on one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutatorFlags {
    /// Entry is configured to re-stage files it fixes.
    pub stage_fixed: bool,
    /// Entry's args include a `--fix` flag.
    pub fix_flag: bool,
    /// Entry runs `make` against a target commonly used for destructive or
    /// side-effecting operations.
    pub suspect_make_target: bool,
}

impl MutatorFlags {
    /// Derives the mutator flags for `entry`.
    #[must_use]
    fn derive(entry: &HookEntry) -> Self {
        let fix_flag = entry.args.iter().any(|arg| arg == "--fix");
        let suspect_make_target = entry.command == "make" && entry.args.iter().any(|arg| SUSPECT_MAKE_TARGETS.contains(&arg.as_str()));
        Self { stage_fixed: entry.stage_fixed, fix_flag, suspect_make_target }
    }

    /// Whether this entry is a mutator by any flag.
    #[must_use]
    pub const fn is_mutator(self) -> bool {
        self.stage_fixed || self.fix_flag || self.suspect_make_target
    }
}

/// Inspection of one configured entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInspection {
    /// The entry's command name, verbatim.
    pub command: String,
    /// Internal vs. external classification.
    pub classification: EntryKind,
    /// Observed mutator flags.
    pub mutator: MutatorFlags,
}

/// Inspection of one configured hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInspection {
    /// Hook name this inspection covers.
    pub name: HookName,
    /// Per-entry inspections, in manifest order.
    pub entries: Vec<EntryInspection>,
    /// The shell-agnostic invocation line the generator would render for
    /// each entry, joined with ` && `.
    pub effective_invocation: String,
}

/// Health findings over the whole manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookHealth {
    /// Points earned, out of [`MAX_HEALTH_SCORE`].
    pub score: u32,
    /// Human-readable description of each anti-pattern found (empty entries
    /// earned their point and have no finding to report).
    pub findings: Vec<String>,
}

/// Full manifest inspection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInspection {
    /// One inspection per hook that has at least one configured entry.
    pub hooks: Vec<HookInspection>,
    /// Manifest-wide health score.
    pub health: HookHealth,
}

/// Inspects `manifest`, producing a per-hook breakdown and a health score.
#[must_use]
pub fn inspect(manifest: &HookManifest) -> ManifestInspection {
    let mut hooks = Vec::new();
    for name in HookName::ALL {
        let Some(entries) = manifest.hooks.get(&name) else {
            continue;
        };
        if entries.is_empty() {
            continue;
        }
        let entry_inspections: Vec<EntryInspection> =
            entries.iter().map(|entry| EntryInspection { command: entry.command.clone(), classification: entry.classification(), mutator: MutatorFlags::derive(entry) }).collect();
        let effective_invocation = entries.iter().map(|entry| render_entry_invocation(manifest, name, entry)).collect::<Vec<_>>().join(" && ");
        hooks.push(HookInspection { name, entries: entry_inspections, effective_invocation });
    }
    ManifestInspection { health: score_manifest(manifest), hooks }
}

/// Computes the manifest-wide health score described in the module overview.
fn score_manifest(manifest: &HookManifest) -> HookHealth {
    let mut score = 0;
    let mut findings = Vec::new();

    grade(&mut score, &mut findings, manifest.version == MANIFEST_VERSION, "manifest version is stale; regenerate against the current schema");
    grade(&mut score, &mut findings, !manifest.hooks.is_empty(), "no hooks are configured");
    grade(
        &mut score,
        &mut findings,
        manifest.hooks.get(&HookName::PreCommit).is_some_and(|entries| !entries.is_empty()),
        "pre-commit has no configured entries",
    );
    grade(
        &mut score,
        &mut findings,
        manifest.hooks.get(&HookName::PrePush).is_some_and(|entries| !entries.is_empty()),
        "pre-push has no configured entries",
    );

    let all_entries: Vec<&HookEntry> = manifest.hooks.values().flatten().collect();
    grade(
        &mut score,
        &mut findings,
        all_entries.iter().filter(|entry| entry.classification() == EntryKind::External).all(|entry| entry.fallback.is_some()),
        "an external command has no configured fallback",
    );
    grade(&mut score, &mut findings, manifest.optimization.only_changed_files, "only_changed_files is disabled; every hook run scans the whole tree");
    grade(
        &mut score,
        &mut findings,
        !all_entries.iter().any(|entry| MutatorFlags::derive(entry).suspect_make_target),
        "a configured entry runs `make` against a destructive-looking target",
    );

    HookHealth { score, findings }
}

/// Awards one point when `healthy`, otherwise records `finding`.
fn grade(score: &mut u32, findings: &mut Vec<String>, healthy: bool, finding: &str) {
    if healthy {
        *score += 1;
    } else {
        findings.push(finding.to_string());
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
