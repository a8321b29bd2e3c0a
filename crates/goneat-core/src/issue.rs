// crates/goneat-core/src/issue.rs
// ============================================================================
// Module: Issue Model
// Description: A single normalized finding emitted by a runner.
// Purpose: Give every checker a common shape regardless of its underlying tool.
// Dependencies: crate::category, crate::severity, serde
// ============================================================================

//! ## Overview
//! Every runner, no matter what external tool it wraps, must normalize its
//! findings into [`Issue`]. This is the only shape the orchestrator, the
//! fail-on evaluator, and the report renderers understand.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::category::Category;
use crate::severity::Severity;

// ============================================================================
// SECTION: Issue
// ============================================================================

/// A single finding produced by one runner.
///
/// # Invariants
/// - `line == 0` means "no specific line" (repo-wide or file-wide finding).
/// - `file` may be empty for findings that are not file-scoped at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Path relative to the assessment target; empty for repo-wide findings.
    pub file: String,
    /// 1-based line number; `0` when not applicable.
    pub line: u32,
    /// Severity of the finding.
    pub severity: Severity,
    /// Category this finding belongs to; must match the owning `CategoryResult`.
    pub category: Category,
    /// One-line human-readable message.
    pub message: String,
    /// Optional machine-readable rule identifier (e.g. a lint rule name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Optional name of the underlying tool that produced this finding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Optional human-readable suggested fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    /// Whether the runner can automatically apply a fix for this finding.
    pub auto_fixable: bool,
}

impl Issue {
    /// Builds a minimal issue with no optional fields set.
    #[must_use]
    pub fn new(
        category: Category,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: String::new(),
            line: 0,
            severity,
            category,
            message: message.into(),
            rule_id: None,
            tool: None,
            suggested_fix: None,
            auto_fixable: false,
        }
    }

    /// Sets the file/line location of the issue.
    #[must_use]
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Sets the rule identifier.
    #[must_use]
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Sets the originating tool name.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Issue;
    use crate::category::Category;
    use crate::severity::Severity;

    #[test]
    fn builder_sets_location_and_metadata() {
        let issue = Issue::new(Category::Lint, Severity::Medium, "unused import")
            .at("src/lib.rs", 12)
            .with_rule_id("unused_imports")
            .with_tool("clippy");
        assert_eq!(issue.file, "src/lib.rs");
        assert_eq!(issue.line, 12);
        assert_eq!(issue.rule_id.as_deref(), Some("unused_imports"));
        assert_eq!(issue.tool.as_deref(), Some("clippy"));
        assert!(!issue.auto_fixable);
    }

    #[test]
    fn default_location_is_repo_wide() {
        let issue = Issue::new(Category::Maturity, Severity::Low, "missing LICENSE");
        assert_eq!(issue.file, "");
        assert_eq!(issue.line, 0);
    }

    #[test]
    fn optional_fields_are_omitted_from_json_when_absent() {
        let issue = Issue::new(Category::Security, Severity::High, "hardcoded secret");
        let json = serde_json::to_string(&issue).expect("serialize issue");
        assert!(!json.contains("rule_id"));
        assert!(!json.contains("suggested_fix"));
    }
}
