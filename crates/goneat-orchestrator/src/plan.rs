// crates/goneat-orchestrator/src/plan.rs
// ============================================================================
// Module: Execution Plan
// Description: Resolves selected categories against the registry and orders
//              the resulting runners for execution (§4.3).
// Purpose: Separate "what to run, in what order" from "how to run it".
// Dependencies: goneat-core, goneat-registry
// ============================================================================

//! ## Overview
//! A [`Plan`] is the pure, synchronous half of the orchestrator: given the
//! selected categories and the registry, it decides which runners execute,
//! in which lane (parallel pool vs. exclusive serialization lane, per §5),
//! and in what order within each lane. Building a plan never touches the
//! filesystem or the clock and never runs a runner.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use goneat_core::AssessmentConfig;
use goneat_core::Category;
use goneat_core::Runner;
use goneat_registry::RunnerRegistry;

// ============================================================================
// SECTION: Plan entry
// ============================================================================

/// A single runner selected for execution, with its resolved priority.
#[derive(Clone)]
pub struct PlanEntry {
    /// Category this entry assesses.
    pub category: Category,
    /// Runner instance to invoke.
    pub runner: Arc<dyn Runner>,
    /// Resolved priority: a config override, or the runner's own default.
    pub priority: i32,
}

/// Ordered sets of runners to execute, split by concurrency lane (§5).
///
/// `parallel` entries may run concurrently, bounded by the worker pool.
/// `exclusive` entries run one at a time in category order, regardless of
/// how many pool slots are free, because [`Runner::can_run_in_parallel`]
/// reported `false` for them.
#[derive(Clone, Default)]
pub struct Plan {
    /// Runners eligible to run concurrently in the bounded pool.
    pub parallel: Vec<PlanEntry>,
    /// Runners that must run one at a time.
    pub exclusive: Vec<PlanEntry>,
    /// Categories the config selected but the registry has no runner for.
    pub unresolved: Vec<Category>,
}

impl Plan {
    /// Total number of runners that will actually execute.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parallel.len() + self.exclusive.len()
    }

    /// Whether the plan has nothing to execute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parallel.is_empty() && self.exclusive.is_empty()
    }
}

/// Builds an execution plan for `config.categories` against `registry`.
///
/// Entries are sorted by `(priority, category name)` ascending: lower
/// priority numbers run first, and equal priorities tie-break
/// lexicographically by category name (resolved Open Question #1, §9).
#[must_use]
pub fn build_plan(config: &AssessmentConfig, registry: &RunnerRegistry) -> Plan {
    let mut parallel = Vec::new();
    let mut exclusive = Vec::new();
    let mut unresolved = Vec::new();

    for category in &config.categories {
        let Some(runner) = registry.get(*category) else {
            unresolved.push(*category);
            continue;
        };
        let priority = config.priority_for(*category, runner.default_priority());
        let entry = PlanEntry {
            category: *category,
            runner,
            priority,
        };
        if entry.runner.can_run_in_parallel() {
            parallel.push(entry);
        } else {
            exclusive.push(entry);
        }
    }

    let by_priority_then_name =
        |a: &PlanEntry, b: &PlanEntry| a.priority.cmp(&b.priority).then_with(|| a.category.as_str().cmp(b.category.as_str()));
    parallel.sort_by(by_priority_then_name);
    exclusive.sort_by(by_priority_then_name);
    unresolved.sort_by_key(Category::as_str);

    Plan {
        parallel,
        exclusive,
        unresolved,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use async_trait::async_trait;
    use goneat_core::AssessmentContext;
    use goneat_core::CategoryResult;
    use goneat_core::RunnerError;

    use super::*;

    struct FakeRunner {
        category: Category,
        parallel: bool,
        default_priority: i32,
    }

    #[async_trait]
    impl Runner for FakeRunner {
        fn category(&self) -> Category {
            self.category
        }

        fn name(&self) -> &str {
            "fake"
        }

        fn can_run_in_parallel(&self) -> bool {
            self.parallel
        }

        fn default_priority(&self) -> i32 {
            self.default_priority
        }

        fn estimated_time(&self, _target: &Path) -> Duration {
            Duration::from_millis(1)
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn assess(
            &self,
            _ctx: &AssessmentContext<'_>,
            _target: &Path,
        ) -> Result<CategoryResult, RunnerError> {
            Ok(CategoryResult::success(self.category, "fake", Vec::new(), Duration::ZERO, Duration::ZERO))
        }
    }

    fn registry_with(entries: &[(Category, bool, i32)]) -> RunnerRegistry {
        let mut registry = RunnerRegistry::new();
        for &(category, parallel, default_priority) in entries {
            registry.register(Arc::new(FakeRunner {
                category,
                parallel,
                default_priority,
            }));
        }
        registry
    }

    #[test]
    fn selected_categories_without_a_runner_are_unresolved() {
        let config = AssessmentConfig {
            categories: [Category::Format, Category::Security].into_iter().collect(),
            ..AssessmentConfig::default()
        };
        let registry = registry_with(&[(Category::Format, true, 100)]);

        let plan = build_plan(&config, &registry);

        assert_eq!(plan.parallel.len(), 1);
        assert_eq!(plan.unresolved, vec![Category::Security]);
    }

    #[test]
    fn non_parallel_runners_land_in_the_exclusive_lane() {
        let config = AssessmentConfig {
            categories: [Category::Dates].into_iter().collect(),
            ..AssessmentConfig::default()
        };
        let registry = registry_with(&[(Category::Dates, false, 100)]);

        let plan = build_plan(&config, &registry);

        assert!(plan.parallel.is_empty());
        assert_eq!(plan.exclusive.len(), 1);
    }

    #[test]
    fn entries_sort_by_priority_then_lexicographic_category_name() {
        let config = AssessmentConfig {
            categories: [Category::Security, Category::Format, Category::Lint].into_iter().collect(),
            ..AssessmentConfig::default()
        };
        let registry = registry_with(&[
            (Category::Security, true, 50),
            (Category::Format, true, 50),
            (Category::Lint, true, 10),
        ]);

        let plan = build_plan(&config, &registry);
        let order: Vec<Category> = plan.parallel.iter().map(|e| e.category).collect();

        assert_eq!(order, vec![Category::Lint, Category::Format, Category::Security]);
    }

    #[test]
    fn priority_override_changes_execution_order() {
        let mut config = AssessmentConfig {
            categories: [Category::Security, Category::Format].into_iter().collect(),
            ..AssessmentConfig::default()
        };
        config.priority_overrides.insert(Category::Security, 1);
        let registry = registry_with(&[(Category::Security, true, 100), (Category::Format, true, 50)]);

        let plan = build_plan(&config, &registry);
        let order: Vec<Category> = plan.parallel.iter().map(|e| e.category).collect();

        assert_eq!(order, vec![Category::Security, Category::Format]);
    }
}
