// crates/goneat-orchestrator/src/execute.rs
// ============================================================================
// Module: Execution Engine
// Description: Runs a Plan's runners concurrently, bounded, with per-runner
//              timeouts, cooperative cancellation, and panic containment
//              (§4.3, §5).
// Purpose: Turn a Plan into an AssessmentReport.
// Dependencies: goneat-core, goneat-registry, tokio, tokio-util
// ============================================================================

//! ## Overview
//! The pool runs `plan.parallel` entries concurrently, bounded by
//! `config.concurrency` permits on a [`tokio::sync::Semaphore`]. The
//! `plan.exclusive` lane only starts once every parallel-lane runner has
//! finished, and its own entries run one at a time through a single-permit
//! semaphore: the two lanes never overlap each other in time, so a
//! non-parallel-safe runner never overlaps any other runner, of either kind.
//!
//! Each runner is driven on its own `tokio::spawn`'d task wrapped in
//! `tokio::time::timeout`. Spawning (rather than calling `assess` inline)
//! gets panic containment for free: a panicking runner unwinds only its own
//! task, and `JoinSet::join_next_with_id` reports it as a `JoinError` keyed
//! by that task's id, which we map back to the runner's category and fold
//! into a `RunnerFailureKind::Panicked` entry instead of taking down the
//! whole assessment (§4.3 "panic containment").
//!
//! Cancellation is cooperative: callers can pass a [`CancellationToken`] (for
//! example wired to SIGINT in the CLI). Once cancelled, the engine stops
//! *starting* new runners but gives in-flight ones up to
//! [`CANCELLATION_GRACE`] to finish before the report is folded with
//! whatever completed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use goneat_core::AssessmentConfig;
use goneat_core::AssessmentContext;
use goneat_core::AssessmentReport;
use goneat_core::Category;
use goneat_core::CategoryResult;
use goneat_core::Clock;
use goneat_core::Runner;
use goneat_core::RunnerError;
use goneat_core::RunnerFailureKind;
use goneat_core::Timestamp;
use tokio::sync::Semaphore;
use tokio::task::Id;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::plan::Plan;
use crate::plan::PlanEntry;

/// Upper bound on how long in-flight runners get to finish after
/// cancellation before the engine stops waiting and folds partial results.
pub const CANCELLATION_GRACE: Duration = Duration::from_secs(5);

/// Resolves `config.concurrency == 0` ("auto", per `AssessmentConfig`'s
/// invariant) to the host's available parallelism, falling back to 1 if it
/// cannot be queried.
fn resolve_concurrency(requested: u32) -> usize {
    if requested != 0 {
        return requested as usize;
    }
    std::thread::available_parallelism().map(std::num::NonZeroUsize::get).unwrap_or(1)
}

/// Outcome of running a single plan entry, before it is folded into a report.
enum RunOutcome {
    Success {
        category: Category,
        result: CategoryResult,
    },
    Failure {
        category: Category,
        command_name: String,
        kind: RunnerFailureKind,
        message: String,
        execution_time: Duration,
    },
}

/// Runs every entry in `plan` against `target`, folding results into an
/// [`AssessmentReport`] stamped with `clock.now()`.
///
/// Categories in `plan.unresolved` (selected but with no registered runner)
/// are recorded as `NoRunner` failures before any runner executes. The
/// exclusive lane is spawned only after the parallel lane has fully drained,
/// so an exclusive-lane runner never overlaps a parallel-lane one (§4.3).
pub async fn execute(
    target: &Path,
    config: &AssessmentConfig,
    clock: &dyn Clock,
    plan: Plan,
    cancellation: CancellationToken,
) -> AssessmentReport {
    let started_at = Timestamp::now(clock);
    let mut report = AssessmentReport::new(target.to_string_lossy(), config.mode, started_at);

    for category in &plan.unresolved {
        report.record_no_runner(*category);
    }

    let semaphore = Arc::new(Semaphore::new(resolve_concurrency(config.concurrency)));
    let mut parallel_joins: JoinSet<RunOutcome> = JoinSet::new();
    let mut parallel_categories: HashMap<Id, Category> = HashMap::new();
    for entry in plan.parallel {
        if cancellation.is_cancelled() {
            break;
        }
        spawn_entry(&mut parallel_joins, &mut parallel_categories, entry, target, config, Arc::clone(&semaphore), cancellation.clone());
    }
    drain(&mut parallel_joins, &parallel_categories, &mut report, cancellation.clone()).await;

    let exclusive_semaphore = Arc::new(Semaphore::new(1));
    let mut exclusive_joins: JoinSet<RunOutcome> = JoinSet::new();
    let mut exclusive_categories: HashMap<Id, Category> = HashMap::new();
    for entry in plan.exclusive {
        if cancellation.is_cancelled() {
            break;
        }
        spawn_entry(
            &mut exclusive_joins,
            &mut exclusive_categories,
            entry,
            target,
            config,
            Arc::clone(&exclusive_semaphore),
            cancellation.clone(),
        );
    }
    drain(&mut exclusive_joins, &exclusive_categories, &mut report, cancellation).await;

    report
}

/// Spawns one plan entry as its own task, gated by a semaphore permit and a
/// per-runner timeout drawn from `config.timeout`. Records the task's id so
/// a later panic can be attributed back to `entry.category`.
fn spawn_entry(
    joins: &mut JoinSet<RunOutcome>,
    categories_by_task: &mut HashMap<Id, Category>,
    entry: PlanEntry,
    target: &Path,
    config: &AssessmentConfig,
    semaphore: Arc<Semaphore>,
    cancellation: CancellationToken,
) {
    let category = entry.category;
    let runner: Arc<dyn Runner> = entry.runner;
    let target = target.to_path_buf();
    let timeout = config.timeout;
    let config_for_ctx = config.clone();

    let handle = joins.spawn(async move {
        let command_name = runner.name().to_string();
        let Ok(_permit) = semaphore.acquire_owned().await else {
            return RunOutcome::Failure {
                category,
                command_name,
                kind: RunnerFailureKind::Cancelled,
                message: "worker pool closed before this runner could start".to_string(),
                execution_time: Duration::ZERO,
            };
        };

        if cancellation.is_cancelled() {
            return RunOutcome::Failure {
                category,
                command_name,
                kind: RunnerFailureKind::Cancelled,
                message: "assessment cancelled before this runner started".to_string(),
                execution_time: Duration::ZERO,
            };
        }

        run_one(&runner, &config_for_ctx, &target, timeout).await
    });
    categories_by_task.insert(handle.id(), category);
}

/// Runs a single runner under a timeout, mapping every failure path to the
/// appropriate [`RunnerFailureKind`].
async fn run_one(runner: &Arc<dyn Runner>, config: &AssessmentConfig, target: &PathBuf, timeout: Duration) -> RunOutcome {
    let category = runner.category();
    let command_name = runner.name().to_string();
    let ctx = AssessmentContext::new(config, timeout);
    let started = tokio::time::Instant::now();

    if !runner.is_available() {
        return RunOutcome::Failure {
            category,
            command_name,
            kind: RunnerFailureKind::RunnerExecution,
            message: format!("{command_name} is unavailable on this host"),
            execution_time: Duration::ZERO,
        };
    }

    match tokio::time::timeout(timeout, runner.assess(&ctx, target)).await {
        Ok(Ok(result)) => RunOutcome::Success { category, result },
        Ok(Err(RunnerError::ToolUnavailable(message))) => RunOutcome::Failure {
            category,
            command_name,
            kind: RunnerFailureKind::RunnerExecution,
            message,
            execution_time: started.elapsed(),
        },
        Ok(Err(err)) => RunOutcome::Failure {
            category,
            command_name,
            kind: RunnerFailureKind::RunnerExecution,
            message: err.to_string(),
            execution_time: started.elapsed(),
        },
        Err(_elapsed) => RunOutcome::Failure {
            category,
            command_name,
            kind: RunnerFailureKind::Timeout,
            message: format!("runner exceeded its {timeout:?} deadline"),
            execution_time: timeout,
        },
    }
}

/// Drains `joins`, folding each outcome into `report`. Honors
/// [`CANCELLATION_GRACE`] once `cancellation` fires: tasks still running
/// after the grace window are abandoned and recorded as `Cancelled`.
async fn drain(
    joins: &mut JoinSet<RunOutcome>,
    categories_by_task: &HashMap<Id, Category>,
    report: &mut AssessmentReport,
    cancellation: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            biased;
            () = cancellation.cancelled(), if !joins.is_empty() => {
                wait_out_grace(joins, categories_by_task, report).await;
                return;
            }
            joined = joins.join_next_with_id() => joined,
        };

        match next {
            Some(Ok((_id, outcome))) => fold(report, outcome),
            Some(Err(join_error)) => fold_join_error(report, categories_by_task, &join_error),
            None => return,
        }
    }
}

/// After cancellation fires, gives remaining tasks [`CANCELLATION_GRACE`] to
/// finish, then records anything still outstanding as `Cancelled`.
async fn wait_out_grace(joins: &mut JoinSet<RunOutcome>, categories_by_task: &HashMap<Id, Category>, report: &mut AssessmentReport) {
    let deadline = tokio::time::Instant::now() + CANCELLATION_GRACE;
    loop {
        if joins.is_empty() {
            return;
        }
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            break;
        }
        match tokio::time::timeout(remaining, joins.join_next_with_id()).await {
            Ok(Some(Ok((_id, outcome)))) => fold(report, outcome),
            Ok(Some(Err(join_error))) => fold_join_error(report, categories_by_task, &join_error),
            Ok(None) | Err(_) => break,
        }
    }
    joins.abort_all();
    while let Some(result) = joins.join_next_with_id().await {
        if let Err(join_error) = result {
            record_kind_failure(
                report,
                categories_by_task.get(&join_error.id()).copied().unwrap_or(Category::RepoStatus),
                "unknown",
                RunnerFailureKind::Cancelled,
                "runner aborted after cancellation grace window elapsed",
                CANCELLATION_GRACE,
            );
        }
    }
}

/// Translates a [`tokio::task::JoinError`] (panic or abort) into a report
/// entry. This is the panic-containment boundary referenced in §4.3.
fn fold_join_error(report: &mut AssessmentReport, categories_by_task: &HashMap<Id, Category>, join_error: &tokio::task::JoinError) {
    let category = categories_by_task.get(&join_error.id()).copied().unwrap_or(Category::RepoStatus);
    if join_error.is_panic() {
        record_kind_failure(
            report,
            category,
            "unknown",
            RunnerFailureKind::Panicked,
            &format!("runner task panicked: {join_error}"),
            Duration::ZERO,
        );
    } else {
        record_kind_failure(report, category, "unknown", RunnerFailureKind::Cancelled, "runner task was cancelled", Duration::ZERO);
    }
}

/// Folds a single runner's outcome into the report.
fn fold(report: &mut AssessmentReport, outcome: RunOutcome) {
    match outcome {
        RunOutcome::Success { category, result } => report.record_success(category, result),
        RunOutcome::Failure {
            category,
            command_name,
            kind,
            message,
            execution_time,
        } => record_kind_failure(report, category, &command_name, kind, &message, execution_time),
    }
}

/// Builds the `CategoryResult::failed` entry and records it alongside its
/// `RunnerFailureKind` label, per the §7 error taxonomy.
fn record_kind_failure(
    report: &mut AssessmentReport,
    category: Category,
    command_name: &str,
    kind: RunnerFailureKind,
    message: &str,
    execution_time: Duration,
) {
    let labeled = format!("[{}] {message}", kind.as_str());
    let result = CategoryResult::failed(category, command_name, labeled.clone(), execution_time);
    report.record_failure(category, result, labeled);
}

/// Convenience wrapper around [`execute`] for callers that don't need to
/// manage their own cancellation token (e.g. tests and the common CLI path).
pub async fn assess(target: &Path, config: &AssessmentConfig, clock: &dyn Clock, plan: Plan) -> AssessmentReport {
    execute(target, config, clock, plan, CancellationToken::new()).await
}
