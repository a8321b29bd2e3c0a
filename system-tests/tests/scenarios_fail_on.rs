// system-tests/tests/scenarios_fail_on.rs
// ============================================================================
// Module: Fail-On & No-Runner Scenarios
// Description: S1-S3 from the assessment orchestrator's acceptance suite.
// Purpose: Exercise the real registry/orchestrator/fail-on evaluator
//          together, with a scripted runner standing in for a real tool.
// Dependencies: goneat-core, goneat-orchestrator, goneat-registry
// ============================================================================

mod helpers;

use std::path::Path;
use std::sync::Arc;

use goneat_core::AssessmentConfig;
use goneat_core::Category;
use goneat_core::FixedClock;
use goneat_core::Severity;
use goneat_core::should_fail;
use goneat_registry::RunnerRegistry;
use helpers::ScriptedRunner;
use helpers::high_and_low_issues;
use time::macros::datetime;

fn clock() -> FixedClock {
    FixedClock(datetime!(2026 - 07 - 28 00:00:00 UTC))
}

/// S1: a security runner emits one `high` and one `low` issue; `fail_on=medium`
/// puts the report over the threshold.
#[tokio::test(flavor = "multi_thread")]
async fn fail_on_threshold_present_fails_the_run() {
    let mut registry = RunnerRegistry::new();
    registry.register(Arc::new(ScriptedRunner::with_issues(Category::Security, high_and_low_issues(Category::Security))));

    let config = AssessmentConfig {
        categories: [Category::Security].into_iter().collect(),
        fail_on: Severity::Medium,
        ..AssessmentConfig::default()
    };

    let report = goneat_orchestrator::run(Path::new("."), &config, &clock(), &registry).await;

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.metrics.total_issues, 2);
    assert!(should_fail(&report, config.fail_on));
}

/// S2: same report, `fail_on=critical` is above every issue's severity.
#[tokio::test(flavor = "multi_thread")]
async fn fail_on_threshold_above_every_issue_passes_the_run() {
    let mut registry = RunnerRegistry::new();
    registry.register(Arc::new(ScriptedRunner::with_issues(Category::Security, high_and_low_issues(Category::Security))));

    let config = AssessmentConfig {
        categories: [Category::Security].into_iter().collect(),
        fail_on: Severity::Critical,
        ..AssessmentConfig::default()
    };

    let report = goneat_orchestrator::run(Path::new("."), &config, &clock(), &registry).await;

    assert!(!should_fail(&report, config.fail_on));
}

/// S3: a selected category with nothing registered for it surfaces as a
/// `FailedRunner`, never as an entry in `categories`, and never trips the
/// severity gate on its own.
#[tokio::test(flavor = "multi_thread")]
async fn a_category_with_no_registered_runner_is_recorded_but_does_not_fail_the_gate() {
    let registry = RunnerRegistry::new();

    let config = AssessmentConfig {
        categories: [Category::Lint].into_iter().collect(),
        fail_on: Severity::Critical,
        ..AssessmentConfig::default()
    };

    let report = goneat_orchestrator::run(Path::new("."), &config, &clock(), &registry).await;

    assert!(report.categories.is_empty());
    assert_eq!(report.failed_runners.len(), 1);
    assert_eq!(report.failed_runners[0].category, Category::Lint);
    assert!(!should_fail(&report, config.fail_on));
}
