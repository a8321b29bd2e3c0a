// crates/goneat-core/src/error.rs
// ============================================================================
// Module: Core Error Taxonomy
// Description: Error kinds shared by the orchestrator, registry, and CLI.
// Purpose: Give every caller a stable, matchable error shape instead of
//          ad hoc strings, per the §7 error handling design.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Runner-level failures are data (`CategoryResult.error_message`,
//! `AssessmentReport.failed_runners`); [`CoreError`] is reserved for failures
//! that must abort the surrounding operation rather than being folded into a
//! report: invalid configuration and schema validation failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Core Errors
// ============================================================================

/// Errors that abort an operation rather than surfacing as report data.
///
/// # Invariants
/// - Variants are stable for CLI exit-code mapping (§6, §7).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A flag, config field, or manifest value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A manifest failed embedded JSON Schema validation.
    #[error("schema validation failed: {0}")]
    SchemaInvalid(String),
}

/// Result alias for fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// ============================================================================
// SECTION: Runner-Level Failure Kinds
// ============================================================================

/// Why a category produced no successful [`crate::report::CategoryResult`].
///
/// # Invariants
/// - Every variant maps to exactly one entry in
///   [`crate::report::FailedRunner`]; never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerFailureKind {
    /// The selected category has no runner registered.
    NoRunner,
    /// The runner returned an error from `assess`.
    RunnerExecution,
    /// The runner's per-runner deadline elapsed before it returned.
    Timeout,
    /// The overall run was cancelled before the runner returned.
    Cancelled,
    /// The runner panicked; the panic was caught at the invocation boundary.
    Panicked,
}

impl RunnerFailureKind {
    /// Returns the wire label used in JSON/text reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoRunner => "no_runner",
            Self::RunnerExecution => "runner_execution",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Panicked => "panicked",
        }
    }
}
