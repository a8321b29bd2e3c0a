// crates/goneat-orchestrator/src/lib.rs
// ============================================================================
// Crate: goneat-orchestrator
// Description: Plans and executes an assessment run against a registry (§4.3).
// Purpose: The heart of goneat: turn (target, config, registry) into an
//          AssessmentReport.
// Dependencies: goneat-core, goneat-registry, tokio, tokio-util
// ============================================================================

//! ## Overview
//! This crate has exactly two phases, kept in separate modules so each can be
//! tested without the other: [`plan`] decides which runners execute and in
//! what order; [`execute`] runs them and folds results into a report. The
//! top-level [`run`] function is the common path; callers that need to wire
//! up their own cancellation (e.g. SIGINT handling in the CLI) should call
//! [`plan::build_plan`] and [`execute::execute`] directly instead.

pub mod execute;
pub mod plan;

use std::path::Path;

use goneat_core::AssessmentConfig;
use goneat_core::AssessmentReport;
use goneat_core::Clock;
use goneat_core::DiagnosticsSink;
use goneat_core::Level;
use goneat_core::NullSink;
use goneat_registry::RunnerRegistry;
use tokio_util::sync::CancellationToken;

pub use execute::CANCELLATION_GRACE;
pub use plan::Plan;
pub use plan::PlanEntry;
pub use plan::build_plan;

/// Plans and executes an assessment of `target` under `config` against
/// `registry`, stamping the report with `clock.now()`.
///
/// This is the common entry point described in §4.3: build a plan, run it to
/// completion with no external cancellation, and return the folded report.
/// Emits no diagnostics; callers that want plan/completion events should use
/// [`run_with_diagnostics`].
pub async fn run(target: &Path, config: &AssessmentConfig, clock: &dyn Clock, registry: &RunnerRegistry) -> AssessmentReport {
    run_with_diagnostics(target, config, clock, registry, &NullSink).await
}

/// Same as [`run`], but honors an externally-owned [`CancellationToken`]
/// (e.g. one cancelled from a SIGINT handler).
pub async fn run_cancellable(
    target: &Path,
    config: &AssessmentConfig,
    clock: &dyn Clock,
    registry: &RunnerRegistry,
    cancellation: CancellationToken,
) -> AssessmentReport {
    run_cancellable_with_diagnostics(target, config, clock, registry, cancellation, &NullSink).await
}

/// Same as [`run`], additionally emitting plan-constructed and
/// assessment-finished events to `sink` (§4.7). The per-runner
/// started/finished/timed-out events are the execution engine's own
/// concern and are emitted from [`execute::execute`] directly.
pub async fn run_with_diagnostics(
    target: &Path,
    config: &AssessmentConfig,
    clock: &dyn Clock,
    registry: &RunnerRegistry,
    sink: &dyn DiagnosticsSink,
) -> AssessmentReport {
    run_cancellable_with_diagnostics(target, config, clock, registry, CancellationToken::new(), sink).await
}

/// Same as [`run_cancellable`], additionally emitting diagnostics to `sink`.
pub async fn run_cancellable_with_diagnostics(
    target: &Path,
    config: &AssessmentConfig,
    clock: &dyn Clock,
    registry: &RunnerRegistry,
    cancellation: CancellationToken,
    sink: &dyn DiagnosticsSink,
) -> AssessmentReport {
    let plan = build_plan(config, registry);
    sink.emit(
        Level::Info,
        &format!(
            "plan constructed: {} parallel, {} exclusive, {} unresolved",
            plan.parallel.len(),
            plan.exclusive.len(),
            plan.unresolved.len()
        ),
    );
    for category in &plan.unresolved {
        sink.emit(Level::Warn, &format!("no runner registered for category {}", category.as_str()));
    }
    let report = execute::execute(target, config, clock, plan, cancellation).await;
    sink.emit(
        Level::Info,
        &format!(
            "assessment finished: {} categories assessed, {} failed",
            report.categories.len(),
            report.failed_runners.len()
        ),
    );
    report
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use async_trait::async_trait;
    use goneat_core::AssessmentContext;
    use goneat_core::Category;
    use goneat_core::CategoryResult;
    use goneat_core::FixedClock;
    use goneat_core::Issue;
    use goneat_core::Runner;
    use goneat_core::RunnerError;
    use goneat_core::Severity;
    use time::macros::datetime;

    use super::*;

    struct Counting {
        category: Category,
        concurrent: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        parallel: bool,
        delay: Duration,
        fail: bool,
        panics: bool,
    }

    #[async_trait]
    impl Runner for Counting {
        fn category(&self) -> Category {
            self.category
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn can_run_in_parallel(&self) -> bool {
            self.parallel
        }

        fn estimated_time(&self, _target: &Path) -> Duration {
            self.delay
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn assess(&self, _ctx: &AssessmentContext<'_>, _target: &Path) -> Result<CategoryResult, RunnerError> {
            if self.panics {
                panic!("deliberate test panic");
            }
            let now = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.concurrent.fetch_sub(1, Ordering::SeqCst);

            if self.fail {
                return Err(RunnerError::Execution("synthetic failure".to_string()));
            }
            Ok(CategoryResult::success(
                self.category,
                "counting",
                vec![Issue::new(self.category, Severity::Low, "finding")],
                self.delay,
                self.delay,
            ))
        }
    }

    fn clock() -> FixedClock {
        FixedClock(datetime!(2026 - 07 - 28 00:00:00 UTC))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn parallel_runners_respect_the_concurrency_bound() {
        let mut registry = RunnerRegistry::new();
        let concurrent = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for category in [Category::Format, Category::Lint, Category::Security, Category::Dependencies] {
            registry.register(Arc::new(Counting {
                category,
                concurrent: Arc::clone(&concurrent),
                peak: Arc::clone(&peak),
                parallel: true,
                delay: Duration::from_millis(20),
                fail: false,
                panics: false,
            }));
        }

        let config = AssessmentConfig {
            categories: [Category::Format, Category::Lint, Category::Security, Category::Dependencies].into_iter().collect(),
            concurrency: 2,
            ..AssessmentConfig::default()
        };

        let report = run(Path::new("."), &config, &clock(), &registry).await;

        assert_eq!(report.categories.len(), 4);
        assert!(peak.load(Ordering::SeqCst) <= 2, "never more than 2 runners should run at once");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn exclusive_runners_never_overlap_each_other() {
        let mut registry = RunnerRegistry::new();
        let concurrent = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for category in [Category::Dates, Category::Tools] {
            registry.register(Arc::new(Counting {
                category,
                concurrent: Arc::clone(&concurrent),
                peak: Arc::clone(&peak),
                parallel: false,
                delay: Duration::from_millis(20),
                fail: false,
                panics: false,
            }));
        }

        let config = AssessmentConfig {
            categories: [Category::Dates, Category::Tools].into_iter().collect(),
            concurrency: 8,
            ..AssessmentConfig::default()
        };

        let report = run(Path::new("."), &config, &clock(), &registry).await;

        assert_eq!(report.categories.len(), 2);
        assert_eq!(peak.load(Ordering::SeqCst), 1, "exclusive runners must never overlap");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn an_exclusive_runner_never_overlaps_a_parallel_one() {
        let mut registry = RunnerRegistry::new();
        let concurrent = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        registry.register(Arc::new(Counting {
            category: Category::Format,
            concurrent: Arc::clone(&concurrent),
            peak: Arc::clone(&peak),
            parallel: true,
            delay: Duration::from_millis(20),
            fail: false,
            panics: false,
        }));
        registry.register(Arc::new(Counting {
            category: Category::Dates,
            concurrent: Arc::clone(&concurrent),
            peak: Arc::clone(&peak),
            parallel: false,
            delay: Duration::from_millis(20),
            fail: false,
            panics: false,
        }));

        let config = AssessmentConfig {
            categories: [Category::Format, Category::Dates].into_iter().collect(),
            concurrency: 8,
            ..AssessmentConfig::default()
        };

        let report = run(Path::new("."), &config, &clock(), &registry).await;

        assert_eq!(report.categories.len(), 2);
        assert_eq!(peak.load(Ordering::SeqCst), 1, "an exclusive runner must never overlap a parallel-lane one");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn a_missing_runner_is_recorded_as_no_runner_without_blocking_the_rest() {
        let mut registry = RunnerRegistry::new();
        registry.register(Arc::new(Counting {
            category: Category::Format,
            concurrent: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            parallel: true,
            delay: Duration::from_millis(1),
            fail: false,
            panics: false,
        }));

        let config = AssessmentConfig {
            categories: [Category::Format, Category::Security].into_iter().collect(),
            ..AssessmentConfig::default()
        };

        let report = run(Path::new("."), &config, &clock(), &registry).await;

        assert!(report.categories.contains_key(&Category::Format));
        assert!(!report.categories.contains_key(&Category::Security));
        assert!(report.failed_runners.iter().any(|f| f.category == Category::Security));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn a_panicking_runner_is_contained_and_recorded_against_its_category() {
        let mut registry = RunnerRegistry::new();
        registry.register(Arc::new(Counting {
            category: Category::Security,
            concurrent: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            parallel: true,
            delay: Duration::ZERO,
            fail: false,
            panics: true,
        }));
        registry.register(Arc::new(Counting {
            category: Category::Format,
            concurrent: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            parallel: true,
            delay: Duration::from_millis(1),
            fail: false,
            panics: false,
        }));

        let config = AssessmentConfig {
            categories: [Category::Security, Category::Format].into_iter().collect(),
            ..AssessmentConfig::default()
        };

        let report = run(Path::new("."), &config, &clock(), &registry).await;

        assert!(report.categories.contains_key(&Category::Format), "a sibling panic must not take down other runners");
        assert!(report.failed_runners.iter().any(|f| f.category == Category::Security && f.error.contains("panicked")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn a_runner_error_is_folded_as_a_failed_category() {
        let mut registry = RunnerRegistry::new();
        registry.register(Arc::new(Counting {
            category: Category::Maturity,
            concurrent: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            parallel: true,
            delay: Duration::ZERO,
            fail: true,
            panics: false,
        }));

        let config = AssessmentConfig {
            categories: [Category::Maturity].into_iter().collect(),
            ..AssessmentConfig::default()
        };

        let report = run(Path::new("."), &config, &clock(), &registry).await;

        let result = report.categories.get(&Category::Maturity).expect("category result recorded");
        assert!(!result.success);
        assert!(report.failed_runners.iter().any(|f| f.category == Category::Maturity));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_with_diagnostics_reports_the_plan_and_the_unresolved_category() {
        use std::sync::Mutex;

        use goneat_core::DiagnosticsSink;
        use goneat_core::Level;

        struct RecordingSink(Mutex<Vec<String>>);

        impl DiagnosticsSink for RecordingSink {
            fn min_level(&self) -> Level {
                Level::Debug
            }

            fn write(&self, _level: Level, message: &str) {
                self.0.lock().expect("lock").push(message.to_string());
            }
        }

        let mut registry = RunnerRegistry::new();
        registry.register(Arc::new(Counting {
            category: Category::Format,
            concurrent: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            parallel: true,
            delay: Duration::from_millis(1),
            fail: false,
            panics: false,
        }));

        let config = AssessmentConfig {
            categories: [Category::Format, Category::Security].into_iter().collect(),
            ..AssessmentConfig::default()
        };
        let sink = RecordingSink(Mutex::new(Vec::new()));

        let report = run_with_diagnostics(Path::new("."), &config, &clock(), &registry, &sink).await;

        assert_eq!(report.categories.len(), 1);
        let lines = sink.0.lock().expect("lock");
        assert!(lines.iter().any(|line| line.contains("plan constructed")));
        assert!(lines.iter().any(|line| line.contains("no runner registered for category security")));
        assert!(lines.iter().any(|line| line.contains("assessment finished")));
    }
}
