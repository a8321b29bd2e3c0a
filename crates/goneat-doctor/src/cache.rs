// crates/goneat-doctor/src/cache.rs
// ============================================================================
// Module: Durable Metadata Cache
// Description: SQLite-backed, WAL-mode, TTL'd cache of upstream release
//              metadata, with a single-flight guarantee per tool (§4.4).
// Purpose: Avoid hammering the metadata source when many runners/processes
//          ask about the same tool within the same TTL window.
// Dependencies: goneat-core, rusqlite, semver, time, tokio
// ============================================================================

//! ## Overview
//! Grounded on `decision-gate-store-sqlite`'s `SqliteRunStateStore`: a
//! `Mutex`-guarded `rusqlite::Connection`, WAL journal mode, a busy timeout,
//! and a `store_meta` schema-version row checked on open. The cache adds one
//! thing the store doesn't need: an in-process single-flight lock per tool,
//! so concurrent callers asking about the same tool within one TTL window
//! collapse into a single upstream fetch instead of stampeding it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use semver::Version;
use time::Duration as TimeDuration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex as AsyncMutex;

use crate::error::DoctorError;
use crate::error::DoctorResult;
use crate::fetch::MetadataFetcher;
use crate::fetch::ReleaseMetadata;

/// Default time-to-live for a cached release entry before it is refetched.
pub const DEFAULT_TTL: TimeDuration = TimeDuration::hours(24);

/// `SQLite` schema version for the metadata cache.
const SCHEMA_VERSION: i64 = 1;

// ============================================================================
// SECTION: Cache
// ============================================================================

/// Durable, TTL'd, single-flight cache of [`ReleaseMetadata`] keyed by tool.
pub struct ToolMetadataCache {
    connection: Arc<StdMutex<Connection>>,
    ttl: TimeDuration,
    inflight: AsyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ToolMetadataCache {
    /// Opens (or creates) a durable cache at `path`, applying WAL mode and a
    /// busy timeout the way `decision-gate-store-sqlite` does.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::Cache`] when the database cannot be opened or
    /// its schema initialized.
    pub fn open(path: &Path, ttl: TimeDuration) -> DoctorResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| DoctorError::Cache(err.to_string()))?;
        }
        let connection = Connection::open(path).map_err(|err| DoctorError::Cache(err.to_string()))?;
        apply_pragmas(&connection)?;
        initialize_schema(&connection)?;
        Ok(Self {
            connection: Arc::new(StdMutex::new(connection)),
            ttl,
            inflight: AsyncMutex::new(HashMap::new()),
        })
    }

    /// Opens an in-memory cache, useful for tests that don't want a temp file.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::Cache`] if schema initialization fails.
    pub fn open_in_memory(ttl: TimeDuration) -> DoctorResult<Self> {
        let connection = Connection::open_in_memory().map_err(|err| DoctorError::Cache(err.to_string()))?;
        initialize_schema(&connection)?;
        Ok(Self {
            connection: Arc::new(StdMutex::new(connection)),
            ttl,
            inflight: AsyncMutex::new(HashMap::new()),
        })
    }

    /// Returns the cached entry for `tool` if present and not yet expired as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::Cache`] on a database error.
    pub fn get(&self, tool: &str, now: OffsetDateTime) -> DoctorResult<Option<ReleaseMetadata>> {
        let connection = self.connection.lock().map_err(|_| DoctorError::Cache("cache mutex poisoned".to_string()))?;
        let row: Option<(String, String, String)> = connection
            .query_row(
                "SELECT version, published_at, fetched_at FROM tool_release_cache WHERE tool = ?1",
                params![tool],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(|err| DoctorError::Cache(err.to_string()))?;

        let Some((version, published_at, fetched_at)) = row else {
            return Ok(None);
        };
        let fetched_at =
            OffsetDateTime::parse(&fetched_at, &Rfc3339).map_err(|err| DoctorError::Cache(format!("corrupt fetched_at: {err}")))?;
        if now - fetched_at >= self.ttl {
            return Ok(None);
        }
        let version = Version::parse(&version).map_err(|err| DoctorError::Cache(format!("corrupt cached version: {err}")))?;
        let published_at =
            OffsetDateTime::parse(&published_at, &Rfc3339).map_err(|err| DoctorError::Cache(format!("corrupt published_at: {err}")))?;
        Ok(Some(ReleaseMetadata {
            tool: tool.to_string(),
            version,
            published_at,
        }))
    }

    /// Upserts `release` into the cache, stamping it with `fetched_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::Cache`] on a database error.
    pub fn put(&self, release: &ReleaseMetadata, fetched_at: OffsetDateTime) -> DoctorResult<()> {
        let connection = self.connection.lock().map_err(|_| DoctorError::Cache("cache mutex poisoned".to_string()))?;
        connection
            .execute(
                "INSERT INTO tool_release_cache (tool, version, published_at, fetched_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(tool) DO UPDATE SET
                    version = excluded.version,
                    published_at = excluded.published_at,
                    fetched_at = excluded.fetched_at",
                params![
                    release.tool,
                    release.version.to_string(),
                    release.published_at.format(&Rfc3339).map_err(|err| DoctorError::Cache(err.to_string()))?,
                    fetched_at.format(&Rfc3339).map_err(|err| DoctorError::Cache(err.to_string()))?,
                ],
            )
            .map_err(|err| DoctorError::Cache(err.to_string()))?;
        Ok(())
    }

    /// Returns the cached release for `tool`, fetching through `fetcher` and
    /// caching the result on a miss or expiry.
    ///
    /// Concurrent callers for the same `tool` within the same miss collapse
    /// into a single upstream fetch: later callers wait on the first
    /// caller's in-flight lock and then re-check the cache, which the first
    /// caller will have just populated.
    ///
    /// # Errors
    ///
    /// Propagates [`DoctorError::Cache`] from the store and
    /// [`DoctorError::Fetch`]/[`DoctorError::InvalidMetadata`] from `fetcher`.
    pub async fn get_or_fetch(&self, tool: &str, fetcher: &dyn MetadataFetcher, now: OffsetDateTime) -> DoctorResult<ReleaseMetadata> {
        if let Some(cached) = self.get(tool, now)? {
            return Ok(cached);
        }

        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(inflight.entry(tool.to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))))
        };
        let _guard = lock.lock().await;

        // Re-check: the fetch that held this lock before us may have just populated it.
        if let Some(cached) = self.get(tool, now)? {
            return Ok(cached);
        }

        let release = fetcher.latest_release(tool).await?;
        self.put(&release, now)?;
        Ok(release)
    }
}

/// Applies the same durability pragmas `decision-gate-store-sqlite` uses.
fn apply_pragmas(connection: &Connection) -> DoctorResult<()> {
    connection.execute_batch("PRAGMA journal_mode = WAL;").map_err(|err| DoctorError::Cache(err.to_string()))?;
    connection.busy_timeout(std::time::Duration::from_millis(5_000)).map_err(|err| DoctorError::Cache(err.to_string()))?;
    Ok(())
}

/// Creates the cache table if it does not already exist.
fn initialize_schema(connection: &Connection) -> DoctorResult<()> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS cache_meta (version INTEGER NOT NULL);
             CREATE TABLE IF NOT EXISTS tool_release_cache (
                tool TEXT PRIMARY KEY,
                version TEXT NOT NULL,
                published_at TEXT NOT NULL,
                fetched_at TEXT NOT NULL
             );",
        )
        .map_err(|err| DoctorError::Cache(err.to_string()))?;
    let existing: Option<i64> =
        connection.query_row("SELECT version FROM cache_meta LIMIT 1", params![], |row| row.get(0)).optional().map_err(|err| DoctorError::Cache(err.to_string()))?;
    if existing.is_none() {
        connection
            .execute("INSERT INTO cache_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
            .map_err(|err| DoctorError::Cache(err.to_string()))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;
    use time::macros::datetime;

    use super::*;

    struct CountingFetcher {
        calls: AtomicUsize,
        version: Version,
    }

    #[async_trait]
    impl MetadataFetcher for CountingFetcher {
        async fn latest_release(&self, tool: &str) -> DoctorResult<ReleaseMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ReleaseMetadata {
                tool: tool.to_string(),
                version: self.version.clone(),
                published_at: datetime!(2026 - 07 - 01 00:00:00 UTC),
            })
        }
    }

    #[tokio::test]
    async fn a_cold_cache_fetches_then_serves_from_cache_on_the_next_call() {
        let cache = ToolMetadataCache::open_in_memory(DEFAULT_TTL).expect("open cache");
        let fetcher = CountingFetcher { calls: AtomicUsize::new(0), version: Version::parse("1.0.0").expect("valid semver") };
        let now = datetime!(2026 - 07 - 28 00:00:00 UTC);

        let first = cache.get_or_fetch("tool", &fetcher, now).await.expect("first fetch");
        let second = cache.get_or_fetch("tool", &fetcher, now).await.expect("second call hits cache");

        assert_eq!(first.version, second.version);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn an_expired_entry_triggers_a_refetch() {
        let cache = ToolMetadataCache::open_in_memory(TimeDuration::hours(1)).expect("open cache");
        let fetcher = CountingFetcher { calls: AtomicUsize::new(0), version: Version::parse("1.0.0").expect("valid semver") };
        let fetched_at = datetime!(2026 - 07 - 28 00:00:00 UTC);
        let later = fetched_at + TimeDuration::hours(2);

        cache.get_or_fetch("tool", &fetcher, fetched_at).await.expect("first fetch");
        cache.get_or_fetch("tool", &fetcher, later).await.expect("refetch after expiry");

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn a_durable_cache_survives_being_reopened_from_the_same_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tools.sqlite3");
        let now = datetime!(2026 - 07 - 28 00:00:00 UTC);
        let release = ReleaseMetadata {
            tool: "ripgrep".to_string(),
            version: Version::parse("14.1.0").expect("valid semver"),
            published_at: datetime!(2026 - 06 - 01 00:00:00 UTC),
        };

        {
            let cache = ToolMetadataCache::open(&path, DEFAULT_TTL).expect("open cache");
            cache.put(&release, now).expect("put");
        }
        let reopened = ToolMetadataCache::open(&path, DEFAULT_TTL).expect("reopen cache");
        let cached = reopened.get("ripgrep", now).expect("get").expect("entry persisted across reopen");
        assert_eq!(cached.version, release.version);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_misses_for_the_same_tool_collapse_into_one_fetch() {
        let cache = Arc::new(ToolMetadataCache::open_in_memory(DEFAULT_TTL).expect("open cache"));
        let fetcher = Arc::new(CountingFetcher { calls: AtomicUsize::new(0), version: Version::parse("2.0.0").expect("valid semver") });
        let now = datetime!(2026 - 07 - 28 00:00:00 UTC);

        let mut joins = tokio::task::JoinSet::new();
        for _ in 0 .. 8 {
            let cache = Arc::clone(&cache);
            let fetcher = Arc::clone(&fetcher);
            joins.spawn(async move { cache.get_or_fetch("same-tool", fetcher.as_ref(), now).await });
        }
        while let Some(result) = joins.join_next().await {
            result.expect("task did not panic").expect("fetch succeeded");
        }

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }
}
