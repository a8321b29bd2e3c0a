// crates/goneat-core/src/runner.rs
// ============================================================================
// Module: Runner Contract
// Description: The trait every checker implements to plug into the orchestrator.
// Purpose: Define the backend-agnostic contract (§4.1) so the orchestrator,
//          registry, and individual checkers agree on one shape.
// Dependencies: async-trait, crate::category, crate::config, crate::report, thiserror
// ============================================================================

//! ## Overview
//! A runner wraps one external tool (or a built-in check) and normalizes its
//! output into [`crate::report::CategoryResult`]. Runners are the only place
//! execution may suspend (§5); the orchestrator treats them as opaque,
//! possibly slow, possibly failing, possibly panicking black boxes and
//! contains every one of those outcomes at the invocation boundary.
//!
//! Security posture: runner implementations may invoke external processes
//! and parse untrusted tool output; they must not let malformed tool output
//! propagate as anything other than a normalized [`crate::issue::Issue`] or a
//! [`RunnerError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::category::Category;
use crate::config::AssessmentConfig;
use crate::report::CategoryResult;

// ============================================================================
// SECTION: Runner Errors
// ============================================================================

/// Errors a runner's `assess` may return.
///
/// # Invariants
/// - Variants are stable for [`crate::error::RunnerFailureKind`] mapping.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The external tool the runner wraps is not installed or not on PATH.
    #[error("required tool unavailable: {0}")]
    ToolUnavailable(String),
    /// The runner's subprocess or I/O failed.
    #[error("runner execution failed: {0}")]
    Execution(String),
    /// The runner could not parse its own tool's output.
    #[error("failed to parse tool output: {0}")]
    OutputParse(String),
}

// ============================================================================
// SECTION: Assessment Context
// ============================================================================

/// Context passed to a runner's `assess` call.
///
/// # Invariants
/// - `selected_paths` is a subset of files under `target` when non-empty;
///   restricting work to it is the runner's responsibility (§4.3).
#[derive(Debug, Clone)]
pub struct AssessmentContext<'a> {
    /// Config for the overall run (categories, mode, fail-on, ...).
    pub config: &'a AssessmentConfig,
    /// Per-runner deadline already narrowed to `min(config.timeout, remaining_budget)`.
    pub deadline: Duration,
}

impl<'a> AssessmentContext<'a> {
    /// Builds a context for one runner invocation.
    #[must_use]
    pub const fn new(config: &'a AssessmentConfig, deadline: Duration) -> Self {
        Self {
            config,
            deadline,
        }
    }
}

// ============================================================================
// SECTION: Runner Trait
// ============================================================================

/// The contract every checker implements to plug into the orchestrator.
///
/// # Invariants
/// - `is_available` must be fast and local: no network I/O, no long installs
///   (§4.1). It answers "can I meaningfully run right now", not "is my tool
///   up to date".
/// - `assess` must honor cancellation promptly at its next I/O or checkpoint
///   (§5); it must not swallow the context's deadline.
#[async_trait]
pub trait Runner: Send + Sync {
    /// The category this runner implements checks for.
    fn category(&self) -> Category;

    /// A short identifier used as `CategoryResult.command_name`.
    fn name(&self) -> &str;

    /// Whether this runner may execute concurrently with other runners.
    ///
    /// Runners returning `false` run exclusively (§4.3): the orchestrator
    /// never overlaps them with any other runner, parallel-safe or not.
    fn can_run_in_parallel(&self) -> bool;

    /// This runner's declared default priority, used when no
    /// `priority_overrides` entry exists for its category (§4.3).
    fn default_priority(&self) -> i32 {
        crate::config::DEFAULT_PRIORITY
    }

    /// Quick, local estimate of how long `assess` will take over `target`.
    fn estimated_time(&self, target: &Path) -> Duration;

    /// Fast, local check for whether this runner can meaningfully run.
    fn is_available(&self) -> bool;

    /// Runs the check over `target` and returns a normalized result.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] when the runner could not produce a result at
    /// all (missing tool, execution failure, unparsable output). Findings
    /// themselves are never errors; they are [`crate::issue::Issue`] values
    /// inside a successful [`CategoryResult`].
    async fn assess(
        &self,
        ctx: &AssessmentContext<'_>,
        target: &Path,
    ) -> Result<CategoryResult, RunnerError>;
}
