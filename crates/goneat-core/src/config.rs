// crates/goneat-core/src/config.rs
// ============================================================================
// Module: Assessment Config
// Description: The configuration the CLI boundary hands to the orchestrator.
// Purpose: Give the orchestrator a single, validated input shape; parsing and
//          layered merging (file/env/flags) live in `goneat-config` (§4.6).
// Dependencies: crate::category, crate::error, crate::report, crate::severity, serde
// ============================================================================

//! ## Overview
//! `AssessmentConfig` is consumed by the orchestrator, not owned by it: the
//! CLI/config layer constructs and validates one before calling
//! `goneat_orchestrator::assess`. This module only defines the shape and its
//! validation, so the orchestrator and the config loader agree on exactly
//! what "valid" means.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::category::Category;
use crate::error::CoreError;
use crate::error::CoreResult;
use crate::report::Mode;
use crate::severity::Severity;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default per-runner timeout when the caller does not specify one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
/// Default fail-on threshold when the caller does not specify one.
pub const DEFAULT_FAIL_ON: Severity = Severity::High;
/// Default runner priority when neither an override nor a runner default applies.
pub const DEFAULT_PRIORITY: i32 = 100;

// ============================================================================
// SECTION: Assessment Config
// ============================================================================

/// Validated configuration for one orchestrator run.
///
/// # Invariants
/// - `concurrency >= 0`; `0` means "auto" (§4.3).
/// - `timeout > Duration::ZERO`.
/// - `priority_overrides` keys are categories that may or may not end up in
///   the plan; unknown categories here are not an error (they simply never
///   match a planned category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Categories to run; empty means "all registered".
    pub categories: BTreeSet<Category>,
    /// Requested run mode.
    pub mode: Mode,
    /// Parallelism budget; `0` means auto.
    pub concurrency: u32,
    /// Per-runner wall-clock timeout.
    pub timeout: Duration,
    /// Minimum severity that causes a failing verdict.
    pub fail_on: Severity,
    /// Per-category priority overrides (lower runs earlier).
    pub priority_overrides: BTreeMap<Category, i32>,
    /// Hook-mode staged-file list; empty means "whole target".
    pub selected_paths: Vec<PathBuf>,
    /// Raises diagnostic verbosity (§4.7).
    pub verbose: bool,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            mode: Mode::Check,
            concurrency: 0,
            timeout: DEFAULT_TIMEOUT,
            fail_on: DEFAULT_FAIL_ON,
            priority_overrides: BTreeMap::new(),
            selected_paths: Vec::new(),
            verbose: false,
        }
    }
}

impl AssessmentConfig {
    /// Validates invariants that the orchestrator relies on without re-checking.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] when `timeout` is zero, matching
    /// the §7 contract that unparsable/degenerate config is a parse-time error.
    pub fn validate(&self) -> CoreResult<()> {
        if self.timeout.is_zero() {
            return Err(CoreError::InvalidConfig("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Resolves the effective priority for `category` per §4.3 step 3.
    #[must_use]
    pub fn priority_for(&self, category: Category, runner_default: i32) -> i32 {
        self.priority_overrides
            .get(&category)
            .copied()
            .unwrap_or(runner_default)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::AssessmentConfig;
    use crate::category::Category;

    #[test]
    fn default_config_is_valid() {
        assert!(AssessmentConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = AssessmentConfig::default();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn priority_override_wins_over_runner_default() {
        let mut config = AssessmentConfig::default();
        config.priority_overrides.insert(Category::Security, 1);
        assert_eq!(config.priority_for(Category::Security, 100), 1);
        assert_eq!(config.priority_for(Category::Lint, 100), 100);
    }
}
