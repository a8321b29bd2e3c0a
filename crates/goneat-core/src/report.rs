// crates/goneat-core/src/report.rs
// ============================================================================
// Module: Assessment Report Model
// Description: Per-category results and the global aggregate report.
// Purpose: Give the orchestrator a single accumulation target and give
//          renderers/fail-on evaluation a stable, serializable shape.
// Dependencies: crate::category, crate::issue, crate::severity, crate::time, serde
// ============================================================================

//! ## Overview
//! [`AssessmentReport`] is the sole output of one orchestrator run. It is
//! built by insertion only — see §3's lifecycle invariant — and is never
//! mutated after the orchestrator returns it to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::category::Category;
use crate::issue::Issue;
use crate::severity::Severity;
use crate::time::Timestamp;

// ============================================================================
// SECTION: Mode
// ============================================================================

/// Requested run mode.
///
/// # Invariants
/// - A runner that does not implement fixing is expected to ignore `Fix`
///   rather than error (§9 open question 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Report findings only; make no changes.
    Check,
    /// Apply fixes where the runner supports it.
    Fix,
    /// Plan the run without executing any runner (dry run).
    NoOp,
}

impl Mode {
    /// Returns the kebab-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Fix => "fix",
            Self::NoOp => "no-op",
        }
    }
}

// ============================================================================
// SECTION: Category Result
// ============================================================================

/// Output of one runner over one target.
///
/// # Invariants
/// - Every issue in `issues` has `category == self.category` (§3).
/// - `issue_count == issues.len()`.
/// - `error_message` is set exactly when `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Category this result was produced for.
    pub category: Category,
    /// Identity of the runner that produced this result (for display/debugging).
    pub command_name: String,
    /// Whether the runner completed without error.
    pub success: bool,
    /// Wall-clock time the runner actually took.
    #[serde(with = "crate::time::duration_go_style")]
    pub execution_time: Duration,
    /// Findings produced by the runner, in the runner's own order.
    pub issues: Vec<Issue>,
    /// Number of findings; always equal to `issues.len()`.
    pub issue_count: usize,
    /// Set when the runner failed to run, distinct from "ran and found issues".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// The runner's own estimate of how long it would take, used for planning.
    #[serde(with = "crate::time::duration_go_style")]
    pub estimated_time: Duration,
}

impl CategoryResult {
    /// Builds a successful result from a set of issues.
    #[must_use]
    pub fn success(
        category: Category,
        command_name: impl Into<String>,
        issues: Vec<Issue>,
        execution_time: Duration,
        estimated_time: Duration,
    ) -> Self {
        let issue_count = issues.len();
        Self {
            category,
            command_name: command_name.into(),
            success: true,
            execution_time,
            issues,
            issue_count,
            error_message: None,
            estimated_time,
        }
    }

    /// Builds a failed result carrying no issues, e.g. a timeout or panic.
    #[must_use]
    pub fn failed(
        category: Category,
        command_name: impl Into<String>,
        error_message: impl Into<String>,
        execution_time: Duration,
    ) -> Self {
        Self {
            category,
            command_name: command_name.into(),
            success: false,
            execution_time,
            issues: Vec::new(),
            issue_count: 0,
            error_message: Some(error_message.into()),
            estimated_time: Duration::ZERO,
        }
    }

    /// Highest severity among this result's issues, if any.
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|issue| issue.severity).max()
    }
}

// ============================================================================
// SECTION: Failed Runner Entry
// ============================================================================

/// One entry in [`AssessmentReport::failed_runners`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRunner {
    /// Category whose runner failed (or was never registered).
    pub category: Category,
    /// Human-readable error, including the [`crate::error::RunnerFailureKind`] label.
    pub error: String,
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// Global metrics rolled up across every category in a report.
///
/// # Invariants
/// - `total_issues == Σ categories[c].issue_count` (§3).
/// - `by_severity` values sum to `total_issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metrics {
    /// Total issue count across every executed category.
    pub total_issues: usize,
    /// Issue counts broken down by severity.
    pub by_severity: BTreeMap<Severity, usize>,
    /// Sum of each runner's own `execution_time`.
    #[serde(with = "crate::time::duration_go_style")]
    pub total_execution_time: Duration,
    /// Wall-clock time for the whole orchestrator run.
    #[serde(with = "crate::time::duration_go_style")]
    pub wall_time: Duration,
    /// Highest number of runners that were observed executing concurrently.
    pub parallelism_utilized: usize,
}

impl Metrics {
    /// Folds one [`CategoryResult`] into the running metrics.
    pub fn record(&mut self, result: &CategoryResult) {
        self.total_issues += result.issue_count;
        for issue in &result.issues {
            *self.by_severity.entry(issue.severity).or_insert(0) += 1;
        }
        self.total_execution_time += result.execution_time;
    }
}

// ============================================================================
// SECTION: Assessment Report
// ============================================================================

/// Global aggregate produced by one orchestrator run.
///
/// # Invariants
/// - `categories` keys are unique by construction (`BTreeMap`).
/// - A category absent from `categories` was not attempted; it is not
///   treated as passed (§3).
/// - `failed_runners` is disjoint from categories with `success == true`,
///   though a category may appear in both `categories` (success = false)
///   and `failed_runners`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// When this report was generated.
    pub generated_at: Timestamp,
    /// Path the assessment ran against, rendered as a display string.
    pub target: String,
    /// Mode the run executed under.
    pub mode: Mode,
    /// Per-category results, keyed by category.
    pub categories: BTreeMap<Category, CategoryResult>,
    /// Rolled-up metrics across `categories`.
    pub metrics: Metrics,
    /// Categories that failed to produce a successful result.
    pub failed_runners: Vec<FailedRunner>,
}

impl AssessmentReport {
    /// Starts an empty report for `target` under `mode`, stamped with `generated_at`.
    #[must_use]
    pub fn new(target: impl Into<String>, mode: Mode, generated_at: Timestamp) -> Self {
        Self {
            generated_at,
            target: target.into(),
            mode,
            categories: BTreeMap::new(),
            metrics: Metrics::default(),
            failed_runners: Vec::new(),
        }
    }

    /// Inserts `result` for `category`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `category` already has a result; per §4.3
    /// this indicates an orchestrator programming error, not a runtime
    /// condition callers should handle.
    pub fn record_success(&mut self, category: Category, result: CategoryResult) {
        debug_assert!(
            !self.categories.contains_key(&category),
            "category {category} already has a recorded result",
        );
        self.metrics.record(&result);
        self.categories.insert(category, result);
    }

    /// Inserts a failed `result` for `category` and appends a [`FailedRunner`] entry.
    pub fn record_failure(&mut self, category: Category, result: CategoryResult, error: impl Into<String>) {
        debug_assert!(
            !self.categories.contains_key(&category),
            "category {category} already has a recorded result",
        );
        self.metrics.record(&result);
        self.categories.insert(category, result);
        self.failed_runners.push(FailedRunner {
            category,
            error: error.into(),
        });
    }

    /// Records that `category` was never attempted because no runner is registered.
    pub fn record_no_runner(&mut self, category: Category) {
        self.failed_runners.push(FailedRunner {
            category,
            error: format!("{category}: {}", crate::error::RunnerFailureKind::NoRunner.as_str()),
        });
    }

    /// All issues across every category, concatenated in category order.
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.categories.values().flat_map(|result| result.issues.iter())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
