// crates/goneat-core/src/fail_on.rs
// ============================================================================
// Module: Fail-On Evaluator
// Description: Turns a report + threshold into a pass/fail verdict (§4.2).
// Purpose: Be the single authority the CLI consults for the severity-gate
//          exit code; deliberately ignorant of runner execution failures.
// Dependencies: crate::report, crate::severity
// ============================================================================

//! ## Overview
//! `should_fail` is intentionally small: it is the one place "does this
//! report fail the build" is decided, so every caller (CLI, tests, hook
//! scripts inspecting a prior report) gets the same answer. It does not
//! consider `failed_runners` — those raise a separate, non-zero advisory
//! exit category at the CLI boundary (§6, §7).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::report::AssessmentReport;
use crate::severity::Severity;

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Returns `true` iff some issue in `report` meets or exceeds `threshold`.
///
/// Equivalent to, and implemented as, per-category `max_severity(...) >=
/// threshold` short-circuiting on the first hit, which is the efficient
/// formulation named in §4.2.
#[must_use]
pub fn should_fail(report: &AssessmentReport, threshold: Severity) -> bool {
    report
        .categories
        .values()
        .any(|result| result.max_severity().is_some_and(|severity| severity >= threshold))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
