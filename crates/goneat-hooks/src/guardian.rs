// crates/goneat-hooks/src/guardian.rs
// ============================================================================
// Module: Guardian Check Seam
// Description: The trait a generated hook's `goneat guardian check <scope>
//              <operation>` invocation resolves to.
// Purpose: Represent "a pre-operation check that may deny execution" without
//          specifying the policy engine behind it (out of scope here).
// Dependencies: async-trait
// ============================================================================

//! ## Overview
//! Nothing in this crate calls [`GuardianCheck`]; it is invoked by the
//! generated shell script as a subprocess (`goneat guardian check ...`), not
//! as a Rust trait call. The trait exists so the CLI crate that implements
//! the `guardian check` subcommand has a documented seam to implement
//! against, consistent with [`crate::manifest::GuardianConfig`] describing
//! only the scope/operation the script passes through.

use async_trait::async_trait;

/// A pre-operation approval gate, checked before a hook's entries run.
#[async_trait]
pub trait GuardianCheck: Send + Sync {
    /// Returns `true` when `operation` within `scope` is approved to proceed.
    async fn check(&self, scope: &str, operation: &str) -> bool;
}

/// A [`GuardianCheck`] that approves every operation.
///
/// Used as the default until a real policy engine is wired in; never
/// appropriate for a production guardian configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllGuardian;

#[async_trait]
impl GuardianCheck for AllowAllGuardian {
    async fn check(&self, _scope: &str, _operation: &str) -> bool {
        true
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_all_guardian_approves_everything() {
        let guardian = AllowAllGuardian;
        assert!(guardian.check("branch", "force-push").await);
    }
}
