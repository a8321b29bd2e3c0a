// crates/goneat-core/tests/report_invariants.rs
// ============================================================================
// Test: Assessment Report Invariants
// Description: Exercises the §3/§8 invariants across a full report, not just
//              a single CategoryResult, to catch cross-category regressions.
// ============================================================================

use std::time::Duration;

use goneat_core::AssessmentReport;
use goneat_core::Category;
use goneat_core::CategoryResult;
use goneat_core::FixedClock;
use goneat_core::Issue;
use goneat_core::Mode;
use goneat_core::Severity;
use goneat_core::Timestamp;
use time::macros::datetime;

fn stamp() -> Timestamp {
    Timestamp::now(&FixedClock(datetime!(2026 - 07 - 28 00:00:00 UTC)))
}

#[test]
fn invariant_total_issues_equals_sum_of_category_issue_counts() {
    let mut report = AssessmentReport::new("/repo", Mode::Check, stamp());

    report.record_success(
        Category::Format,
        CategoryResult::success(
            Category::Format,
            "fake-format",
            vec![Issue::new(Category::Format, Severity::Low, "trailing whitespace")],
            Duration::from_millis(5),
            Duration::from_millis(10),
        ),
    );
    report.record_success(
        Category::Security,
        CategoryResult::success(
            Category::Security,
            "fake-security",
            vec![
                Issue::new(Category::Security, Severity::Critical, "hardcoded key"),
                Issue::new(Category::Security, Severity::Medium, "weak hash"),
            ],
            Duration::from_millis(20),
            Duration::from_millis(30),
        ),
    );
    report.record_no_runner(Category::Dependencies);

    let expected_total: usize = report.categories.values().map(|c| c.issue_count).sum();
    assert_eq!(report.metrics.total_issues, expected_total);
    assert_eq!(report.metrics.total_issues, 3);

    for result in report.categories.values() {
        assert_eq!(result.issue_count, result.issues.len());
        for issue in &result.issues {
            assert_eq!(issue.category, result.category);
        }
    }

    // Dependencies was never attempted: absent from categories, present in failed_runners.
    assert!(!report.categories.contains_key(&Category::Dependencies));
    assert!(report.failed_runners.iter().any(|f| f.category == Category::Dependencies));
}

#[test]
fn invariant_severity_counts_are_consistent_with_issues() {
    let mut report = AssessmentReport::new("/repo", Mode::Check, stamp());
    let issues = vec![
        Issue::new(Category::Lint, Severity::High, "a"),
        Issue::new(Category::Lint, Severity::High, "b"),
        Issue::new(Category::Lint, Severity::Info, "c"),
    ];
    report.record_success(
        Category::Lint,
        CategoryResult::success(Category::Lint, "fake-lint", issues, Duration::ZERO, Duration::ZERO),
    );

    assert_eq!(report.metrics.by_severity.get(&Severity::High), Some(&2));
    assert_eq!(report.metrics.by_severity.get(&Severity::Info), Some(&1));
    let severity_sum: usize = report.metrics.by_severity.values().sum();
    assert_eq!(severity_sum, report.metrics.total_issues);
}

#[test]
fn a_category_absent_from_the_report_is_not_treated_as_passed() {
    let report = AssessmentReport::new("/repo", Mode::Check, stamp());
    assert!(!report.categories.contains_key(&Category::Security));
    // Absence is simply absence; callers must not infer success from it.
    assert!(report.categories.get(&Category::Security).is_none());
}
