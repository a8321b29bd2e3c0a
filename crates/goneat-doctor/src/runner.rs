// crates/goneat-doctor/src/runner.rs
// ============================================================================
// Module: Tools Category Runner
// Description: Wires the doctor's `check` operation into the orchestrator as
//              the `Category::Tools` runner.
// Purpose: Let `goneat assess` report missing/out-of-policy tools as Issues
//          alongside every other category, instead of only through the
//          separate `goneat doctor` subcommand.
// Dependencies: goneat-core
// ============================================================================

//! ## Overview
//! This is the one place `goneat-doctor` implements [`goneat_core::Runner`].
//! It runs synchronously under the hood (tool version checks are local,
//! fast process spawns, per the `Runner::is_available` contract) and never
//! touches the metadata cache or network fetcher: cooling-policy checks are
//! the `goneat doctor` subcommand's job, not the assessment's.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use goneat_core::AssessmentContext;
use goneat_core::Category;
use goneat_core::CategoryResult;
use goneat_core::Issue;
use goneat_core::Runner;
use goneat_core::RunnerError;
use goneat_core::Severity;

use crate::doctor::ToolCheck;
use crate::doctor::check;
use crate::policy::ToolPolicy;
use crate::policy::VersionVerdict;

/// Checks a fixed set of tool policies and reports findings under `Category::Tools`.
pub struct ToolsRunner {
    policies: Vec<(ToolPolicy, String)>,
}

impl ToolsRunner {
    /// Builds a runner over `policies`, each paired with the flag used to
    /// print its version (e.g. `"--version"`).
    #[must_use]
    pub fn new(policies: Vec<(ToolPolicy, String)>) -> Self {
        Self { policies }
    }
}

#[async_trait]
impl Runner for ToolsRunner {
    fn category(&self) -> Category {
        Category::Tools
    }

    fn name(&self) -> &str {
        "goneat-doctor"
    }

    fn can_run_in_parallel(&self) -> bool {
        true
    }

    fn estimated_time(&self, _target: &Path) -> Duration {
        Duration::from_millis(u64::try_from(self.policies.len()).unwrap_or(u64::MAX).saturating_mul(50))
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn assess(&self, _ctx: &AssessmentContext<'_>, _target: &Path) -> Result<CategoryResult, RunnerError> {
        let mut issues = Vec::new();
        for (policy, version_flag) in &self.policies {
            match check(policy, version_flag) {
                ToolCheck::UnsupportedPlatform => {}
                ToolCheck::NotInstalled => {
                    issues.push(
                        Issue::new(Category::Tools, Severity::High, format!("{} is not installed", policy.tool))
                            .with_tool(policy.tool.clone()),
                    );
                }
                ToolCheck::Installed { version, verdict } => {
                    if let Some(issue) = verdict_issue(&policy.tool, &version, &verdict) {
                        issues.push(issue);
                    }
                }
            }
        }
        Ok(CategoryResult::success(Category::Tools, self.name(), issues, Duration::ZERO, Duration::ZERO))
    }
}

/// Maps a [`VersionVerdict`] to an [`Issue`], or `None` when the version is allowed.
fn verdict_issue(tool: &str, version: &semver::Version, verdict: &VersionVerdict) -> Option<Issue> {
    match verdict {
        VersionVerdict::Allowed => None,
        VersionVerdict::Disallowed { matched } => Some(
            Issue::new(Category::Tools, Severity::Critical, format!("{tool} {version} is disallowed (matches {matched})")).with_tool(tool),
        ),
        VersionVerdict::BelowMinimum { installed, minimum } => Some(
            Issue::new(Category::Tools, Severity::High, format!("{tool} {installed} is below the minimum supported version {minimum}"))
                .with_tool(tool),
        ),
        VersionVerdict::BelowRecommended { installed, recommended } => Some(
            Issue::new(Category::Tools, Severity::Low, format!("{tool} {installed} is below the recommended version {recommended}"))
                .with_tool(tool),
        ),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
