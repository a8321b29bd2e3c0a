// crates/goneat-registry/src/lib.rs
// ============================================================================
// Crate: goneat-registry
// Description: Process-wide mapping from Category to Runner (§4.1).
// Purpose: Let the orchestrator resolve a plan's categories to concrete
//          runners, and let tests substitute fakes via snapshot/restore.
// Dependencies: goneat-core
// ============================================================================

//! ## Overview
//! The registry has exactly one piece of state: a `Category -> Runner`
//! mapping. Registration is idempotent per category (re-registering replaces
//! the prior entry, per §4.1) so tests can drop in a fake runner for a
//! category without needing a fresh process. It performs no I/O and holds no
//! locks across anything but the map access itself.
//!
//! It is deliberately *not* a global singleton: the CLI constructs one at
//! startup and hands it to the orchestrator by reference, matching the §9
//! design note that ambient mutable state should be explicit, not implicit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use goneat_core::Category;
use goneat_core::Runner;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Process-wide mapping from [`Category`] to the [`Runner`] that implements it.
///
/// # Invariants
/// - At most one runner is registered per category at any time.
/// - Re-registering a category replaces the prior entry (§4.1); this is not
///   an error, it is how tests substitute fakes.
#[derive(Clone, Default)]
pub struct RunnerRegistry {
    runners: BTreeMap<Category, Arc<dyn Runner>>,
}

impl RunnerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `runner` under its own [`Runner::category`], replacing any
    /// previously registered runner for that category.
    pub fn register(&mut self, runner: Arc<dyn Runner>) {
        self.runners.insert(runner.category(), runner);
    }

    /// Returns the runner registered for `category`, if any.
    ///
    /// Looking up a category with nothing registered is not an error here —
    /// the orchestrator is responsible for turning a miss into a `NoRunner`
    /// failure entry (§4.1).
    #[must_use]
    pub fn get(&self, category: Category) -> Option<Arc<dyn Runner>> {
        self.runners.get(&category).cloned()
    }

    /// Returns every registered runner, in category order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Runner>> {
        self.runners.values()
    }

    /// Returns every registered category, in order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.runners.keys().copied()
    }

    /// Number of registered categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runners.len()
    }

    /// Whether the registry has no registered categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// Captures the current state for later restoration via [`Self::restore`].
    ///
    /// Intended for test isolation: a test can `snapshot`, register fakes,
    /// run its assertions, then `restore` to undo the substitution without
    /// affecting other tests sharing a registry.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            runners: self.runners.clone(),
        }
    }

    /// Restores a previously captured [`RegistrySnapshot`], discarding any
    /// registrations made since it was taken.
    pub fn restore(&mut self, snapshot: RegistrySnapshot) {
        self.runners = snapshot.runners;
    }
}

/// Opaque capture of a [`RunnerRegistry`]'s state for test isolation.
#[derive(Clone)]
pub struct RegistrySnapshot {
    runners: BTreeMap<Category, Arc<dyn Runner>>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
