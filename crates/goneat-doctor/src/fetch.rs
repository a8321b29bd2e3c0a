// crates/goneat-doctor/src/fetch.rs
// ============================================================================
// Module: Metadata Fetcher
// Description: Pluggable source of "latest upstream release" metadata (§4.4).
// Purpose: Let the default GitHub-releases source be swapped for a test
//          double or a mirror, the way decision-gate-broker pluggably wires
//          sources behind one dispatcher trait.
// Dependencies: async-trait, reqwest, semver, serde_json, time
// ============================================================================

//! ## Overview
//! [`MetadataFetcher`] is the seam the cache calls through. The default
//! implementation, [`GitHubReleaseFetcher`], hits the public GitHub releases
//! API; tests substitute an in-memory fake instead of making network calls.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use semver::Version;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::DoctorError;
use crate::error::DoctorResult;

// ============================================================================
// SECTION: Release Metadata
// ============================================================================

/// One upstream release, as reported by a [`MetadataFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMetadata {
    /// Tool identifier the release belongs to.
    pub tool: String,
    /// Parsed semantic version of the release.
    pub version: Version,
    /// When the release was published upstream.
    pub published_at: OffsetDateTime,
}

// ============================================================================
// SECTION: Fetcher Trait
// ============================================================================

/// Source of "what is the latest release of this tool" metadata.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetches the latest known release for `tool`.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::Fetch`] on a network/transport failure or
    /// non-success response, and [`DoctorError::InvalidMetadata`] when the
    /// response cannot be parsed into a [`ReleaseMetadata`].
    async fn latest_release(&self, tool: &str) -> DoctorResult<ReleaseMetadata>;
}

// ============================================================================
// SECTION: GitHub Releases Fetcher
// ============================================================================

/// Default [`MetadataFetcher`]: GitHub's `/repos/{owner}/{repo}/releases/latest` API.
pub struct GitHubReleaseFetcher {
    client: reqwest::Client,
    /// Maps a tool name to its `owner/repo` slug on GitHub.
    repo_for_tool: std::collections::BTreeMap<String, String>,
    /// Optional token, sent as a bearer credential to raise the rate limit.
    token: Option<String>,
}

impl GitHubReleaseFetcher {
    /// Builds a fetcher over the given tool-to-repo mapping.
    #[must_use]
    pub fn new(repo_for_tool: std::collections::BTreeMap<String, String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            repo_for_tool,
            token,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct GitHubReleaseResponse {
    tag_name: String,
    published_at: String,
}

#[async_trait]
impl MetadataFetcher for GitHubReleaseFetcher {
    async fn latest_release(&self, tool: &str) -> DoctorResult<ReleaseMetadata> {
        let repo = self
            .repo_for_tool
            .get(tool)
            .ok_or_else(|| DoctorError::Fetch(format!("no GitHub repo configured for tool '{tool}'")))?;
        let url = format!("https://api.github.com/repos/{repo}/releases/latest");

        let mut request = self.client.get(&url).header("User-Agent", "goneat-doctor");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| DoctorError::Fetch(err.to_string()))?;
        if !response.status().is_success() {
            return Err(DoctorError::Fetch(format!("GitHub returned {status} for {repo}", status = response.status())));
        }
        let body: GitHubReleaseResponse = response.json().await.map_err(|err| DoctorError::InvalidMetadata(err.to_string()))?;

        parse_release(tool, &body.tag_name, &body.published_at)
    }
}

/// Parses a GitHub tag (`v1.2.3` or `1.2.3`) and an RFC 3339 timestamp into
/// a [`ReleaseMetadata`].
fn parse_release(tool: &str, tag_name: &str, published_at: &str) -> DoctorResult<ReleaseMetadata> {
    let version_text = tag_name.strip_prefix('v').unwrap_or(tag_name);
    let version = Version::parse(version_text).map_err(|err| DoctorError::InvalidMetadata(format!("invalid tag '{tag_name}': {err}")))?;
    let published_at =
        OffsetDateTime::parse(published_at, &Rfc3339).map_err(|err| DoctorError::InvalidMetadata(format!("invalid published_at: {err}")))?;
    Ok(ReleaseMetadata {
        tool: tool.to_string(),
        version,
        published_at,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_v_prefixed_tag_parses_to_its_bare_semver() {
        let release = parse_release("golangci-lint", "v1.55.2", "2026-01-10T00:00:00Z").expect("parses");
        assert_eq!(release.version, Version::parse("1.55.2").expect("valid semver"));
    }

    #[test]
    fn an_unprefixed_tag_also_parses() {
        let release = parse_release("ripgrep", "14.1.0", "2025-06-01T00:00:00Z").expect("parses");
        assert_eq!(release.version, Version::parse("14.1.0").expect("valid semver"));
    }

    #[test]
    fn a_non_semver_tag_is_rejected() {
        assert!(parse_release("tool", "latest", "2025-06-01T00:00:00Z").is_err());
    }
}
