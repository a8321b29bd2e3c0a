// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Fake `Runner` implementations shared across the S1-S7
//              scenarios, standing in for real tool integrations.
// Purpose: Keep the scenarios deterministic without spawning real tools.
// Dependencies: goneat-core, async-trait, tokio
// ============================================================================

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use goneat_core::AssessmentContext;
use goneat_core::Category;
use goneat_core::CategoryResult;
use goneat_core::Issue;
use goneat_core::Runner;
use goneat_core::RunnerError;
use goneat_core::Severity;
use tokio::time::Instant;

/// A runner that returns a fixed set of issues after an optional delay.
pub struct ScriptedRunner {
    pub category: Category,
    pub issues: Vec<Issue>,
    pub delay: Duration,
    pub priority: i32,
    pub parallel: bool,
    /// Records this runner's `assess` start time, for ordering assertions.
    pub started_at: Arc<Mutex<Option<Instant>>>,
}

impl ScriptedRunner {
    /// Builds a runner that returns `issues` immediately.
    #[must_use]
    pub fn with_issues(category: Category, issues: Vec<Issue>) -> Self {
        Self {
            category,
            issues,
            delay: Duration::ZERO,
            priority: goneat_core::config::DEFAULT_PRIORITY,
            parallel: true,
            started_at: Arc::new(Mutex::new(None)),
        }
    }

    /// Builds a runner that sleeps for `delay` before returning no issues.
    #[must_use]
    pub fn sleeping(category: Category, delay: Duration) -> Self {
        Self {
            category,
            issues: Vec::new(),
            delay,
            priority: goneat_core::config::DEFAULT_PRIORITY,
            parallel: true,
            started_at: Arc::new(Mutex::new(None)),
        }
    }

    /// Sets this runner's declared priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[async_trait]
impl Runner for ScriptedRunner {
    fn category(&self) -> Category {
        self.category
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn can_run_in_parallel(&self) -> bool {
        self.parallel
    }

    fn default_priority(&self) -> i32 {
        self.priority
    }

    fn estimated_time(&self, _target: &Path) -> Duration {
        self.delay
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn assess(&self, _ctx: &AssessmentContext<'_>, _target: &Path) -> Result<CategoryResult, RunnerError> {
        *self.started_at.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(Instant::now());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(CategoryResult::success(self.category, "scripted", self.issues.clone(), self.delay, self.delay))
    }
}

/// Builds a two-issue set matching S1/S2: one `high`, one `low`.
#[must_use]
pub fn high_and_low_issues(category: Category) -> Vec<Issue> {
    vec![Issue::new(category, Severity::High, "hardcoded credential"), Issue::new(category, Severity::Low, "missing newline at EOF")]
}
