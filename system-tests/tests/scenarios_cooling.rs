// system-tests/tests/scenarios_cooling.rs
// ============================================================================
// Module: Cooling Policy Scenario
// Description: S7 from the tool-doctor acceptance suite.
// Purpose: Exercise `check_cooling` against a fake upstream fetcher and a
//          real in-memory cache, for both a blocking and an alert-only policy.
// Dependencies: goneat-doctor, async-trait, semver, time, tokio
// ============================================================================

use std::error::Error;

use async_trait::async_trait;
use goneat_doctor::DEFAULT_TTL;
use goneat_doctor::DoctorResult;
use goneat_doctor::MetadataFetcher;
use goneat_doctor::ReleaseMetadata;
use goneat_doctor::ToolMetadataCache;
use goneat_doctor::ToolPolicy;
use goneat_doctor::check_cooling;
use semver::Version;
use time::Duration as TimeDuration;
use time::macros::datetime;

/// Always reports the same release, published a fixed number of days before
/// whatever `now` the caller evaluates against.
struct FixedRelease {
    published_at: time::OffsetDateTime,
}

#[async_trait]
impl MetadataFetcher for FixedRelease {
    async fn latest_release(&self, tool: &str) -> DoctorResult<ReleaseMetadata> {
        Ok(ReleaseMetadata { tool: tool.to_string(), version: Version::new(1, 2, 3), published_at: self.published_at })
    }
}

fn policy(alert_only: bool) -> ToolPolicy {
    ToolPolicy {
        tool: "golangci-lint".to_string(),
        supported_platforms: Vec::new(),
        disallowed: Vec::new(),
        minimum_version: None,
        recommended_version: None,
        minimum_release_age: TimeDuration::days(14),
        alert_only,
    }
}

/// S7: a release published 3 days ago against a 14-day cooling policy has
/// not cooled; with `alert_only=false` this must block an install decision.
#[tokio::test(flavor = "multi_thread")]
async fn a_release_inside_its_cooling_window_blocks_install_when_not_alert_only() -> Result<(), Box<dyn Error>> {
    let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
    let published_at = now - TimeDuration::days(3);
    let fetcher = FixedRelease { published_at };
    let cache = ToolMetadataCache::open_in_memory(DEFAULT_TTL)?;

    let verdict = check_cooling(&policy(false), &cache, &fetcher, now).await?;

    assert!(!verdict.cooled, "a 3-day-old release must not satisfy a 14-day cooling policy");
    assert!(!verdict.alert_only);
    assert!(verdict.remaining.is_some());
    Ok(())
}

/// Same release and policy, but `alert_only=true`: the verdict still reports
/// `cooled=false`, but carries `alert_only=true` so the CLI layer proceeds
/// with the install instead of blocking it.
#[tokio::test(flavor = "multi_thread")]
async fn the_same_uncooled_release_is_reported_but_not_blocking_when_alert_only() -> Result<(), Box<dyn Error>> {
    let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
    let published_at = now - TimeDuration::days(3);
    let fetcher = FixedRelease { published_at };
    let cache = ToolMetadataCache::open_in_memory(DEFAULT_TTL)?;

    let verdict = check_cooling(&policy(true), &cache, &fetcher, now).await?;

    assert!(!verdict.cooled);
    assert!(verdict.alert_only, "an alert-only policy must let the caller skip blocking on a not-yet-cooled release");
    Ok(())
}

/// A release already older than the cooling window reports `cooled=true`
/// regardless of `alert_only`.
#[tokio::test(flavor = "multi_thread")]
async fn a_release_older_than_the_cooling_window_has_cooled() -> Result<(), Box<dyn Error>> {
    let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
    let published_at = now - TimeDuration::days(30);
    let fetcher = FixedRelease { published_at };
    let cache = ToolMetadataCache::open_in_memory(DEFAULT_TTL)?;

    let verdict = check_cooling(&policy(false), &cache, &fetcher, now).await?;

    assert!(verdict.cooled);
    assert!(verdict.remaining.is_none());
    Ok(())
}
