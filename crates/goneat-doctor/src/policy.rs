// crates/goneat-doctor/src/policy.rs
// ============================================================================
// Module: Version & Cooling Policy
// Description: Evaluates an installed tool version against a policy's
//              minimum/recommended/disallowed versions and its cooling
//              (minimum release age) rule (§4.4).
// Purpose: Keep the evaluation pure and synchronous; callers supply the
//          installed version and the release metadata, already fetched.
// Dependencies: goneat-core, semver, time
// ============================================================================

//! ## Overview
//! Two independent questions, both answered here: "is this installed version
//! allowed at all" ([`evaluate_version`]) and "is the latest release too
//! fresh to require yet" ([`evaluate_cooling`]). The orchestrator-facing
//! `doctor` module combines both into one [`crate::doctor::ToolCheck`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use semver::Version;
use semver::VersionReq;
use time::Duration as TimeDuration;
use time::OffsetDateTime;

use crate::platform::Platform;

// ============================================================================
// SECTION: Tool Policy
// ============================================================================

/// Policy governing one tool's acceptable versions and platform scope.
///
/// # Invariants
/// - `supported_platforms` empty means "every platform" (§4.4).
#[derive(Debug, Clone)]
pub struct ToolPolicy {
    /// Tool identifier, e.g. `"golangci-lint"`.
    pub tool: String,
    /// Platforms this policy applies to; empty means all.
    pub supported_platforms: Vec<Platform>,
    /// Version requirements that are explicitly forbidden, e.g. a yanked release.
    pub disallowed: Vec<VersionReq>,
    /// Oldest version still accepted without escalating to `BelowMinimum`.
    pub minimum_version: Option<Version>,
    /// Version below which a non-fatal `BelowRecommended` verdict is raised.
    pub recommended_version: Option<Version>,
    /// Minimum age a new upstream release must reach before it is required.
    pub minimum_release_age: TimeDuration,
    /// When `true`, a cooling or version verdict is reported but never fails the run.
    pub alert_only: bool,
}

// ============================================================================
// SECTION: Version Verdict
// ============================================================================

/// Outcome of evaluating an installed version against a [`ToolPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionVerdict {
    /// The installed version satisfies the policy.
    Allowed,
    /// The installed version matches an explicitly disallowed requirement.
    Disallowed {
        /// The `VersionReq` (as text) the installed version matched.
        matched: String,
    },
    /// The installed version is older than `minimum_version`.
    BelowMinimum {
        /// Installed version.
        installed: Version,
        /// Policy's minimum version.
        minimum: Version,
    },
    /// The installed version meets the minimum but not the recommendation.
    BelowRecommended {
        /// Installed version.
        installed: Version,
        /// Policy's recommended version.
        recommended: Version,
    },
}

/// Evaluates `installed` against `policy`'s disallowed/minimum/recommended rules.
///
/// Checks run in order: `disallowed` first (a hard stop regardless of how
/// new the version is), then `minimum_version`, then `recommended_version`.
#[must_use]
pub fn evaluate_version(installed: &Version, policy: &ToolPolicy) -> VersionVerdict {
    for req in &policy.disallowed {
        if req.matches(installed) {
            return VersionVerdict::Disallowed { matched: req.to_string() };
        }
    }
    if let Some(minimum) = &policy.minimum_version {
        if installed < minimum {
            return VersionVerdict::BelowMinimum {
                installed: installed.clone(),
                minimum: minimum.clone(),
            };
        }
    }
    if let Some(recommended) = &policy.recommended_version {
        if installed < recommended {
            return VersionVerdict::BelowRecommended {
                installed: installed.clone(),
                recommended: recommended.clone(),
            };
        }
    }
    VersionVerdict::Allowed
}

// ============================================================================
// SECTION: Cooling Verdict
// ============================================================================

/// Outcome of evaluating a fresh upstream release against the cooling rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoolingVerdict {
    /// Whether the release has cooled long enough to be required/recommended.
    pub cooled: bool,
    /// How much longer until the release cools, if not yet cooled.
    pub remaining: Option<TimeDuration>,
    /// Mirrors [`ToolPolicy::alert_only`]: when set, callers must not fail on this.
    pub alert_only: bool,
}

/// Evaluates whether `released_at` has aged past `policy.minimum_release_age`,
/// relative to `now`.
#[must_use]
pub fn evaluate_cooling(released_at: OffsetDateTime, now: OffsetDateTime, policy: &ToolPolicy) -> CoolingVerdict {
    let age = now - released_at;
    if age >= policy.minimum_release_age {
        return CoolingVerdict {
            cooled: true,
            remaining: None,
            alert_only: policy.alert_only,
        };
    }
    CoolingVerdict {
        cooled: false,
        remaining: Some(policy.minimum_release_age - age),
        alert_only: policy.alert_only,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn policy() -> ToolPolicy {
        ToolPolicy {
            tool: "golangci-lint".to_string(),
            supported_platforms: Vec::new(),
            disallowed: Vec::new(),
            minimum_version: Some(Version::parse("1.50.0").expect("valid semver")),
            recommended_version: Some(Version::parse("1.55.0").expect("valid semver")),
            minimum_release_age: TimeDuration::days(7),
            alert_only: false,
        }
    }

    #[test]
    fn version_above_recommended_is_allowed() {
        let installed = Version::parse("1.60.0").expect("valid semver");
        assert_eq!(evaluate_version(&installed, &policy()), VersionVerdict::Allowed);
    }

    #[test]
    fn version_between_minimum_and_recommended_is_below_recommended() {
        let installed = Version::parse("1.52.0").expect("valid semver");
        let verdict = evaluate_version(&installed, &policy());
        assert!(matches!(verdict, VersionVerdict::BelowRecommended { .. }));
    }

    #[test]
    fn version_below_minimum_is_below_minimum_not_below_recommended() {
        let installed = Version::parse("1.10.0").expect("valid semver");
        let verdict = evaluate_version(&installed, &policy());
        assert!(matches!(verdict, VersionVerdict::BelowMinimum { .. }));
    }

    #[test]
    fn a_disallowed_requirement_wins_even_above_recommended() {
        let mut policy = policy();
        policy.disallowed = vec![VersionReq::parse("=1.60.0").expect("valid req")];
        let installed = Version::parse("1.60.0").expect("valid semver");
        assert!(matches!(evaluate_version(&installed, &policy), VersionVerdict::Disallowed { .. }));
    }

    #[test]
    fn a_release_younger_than_the_minimum_age_has_not_cooled() {
        let policy = policy();
        let released = datetime!(2026 - 07 - 25 00:00:00 UTC);
        let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
        let verdict = evaluate_cooling(released, now, &policy);
        assert!(!verdict.cooled);
        assert!(verdict.remaining.is_some());
    }

    #[test]
    fn a_release_older_than_the_minimum_age_has_cooled() {
        let policy = policy();
        let released = datetime!(2026 - 07 - 01 00:00:00 UTC);
        let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
        let verdict = evaluate_cooling(released, now, &policy);
        assert!(verdict.cooled);
        assert!(verdict.remaining.is_none());
    }

    #[test]
    fn alert_only_is_carried_through_to_the_cooling_verdict() {
        let mut policy = policy();
        policy.alert_only = true;
        let released = datetime!(2026 - 07 - 27 00:00:00 UTC);
        let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
        assert!(evaluate_cooling(released, now, &policy).alert_only);
    }
}
