// crates/goneat-config/src/tools.rs
// ============================================================================
// Module: Tools Manifest
// Description: `.goneat/tools.yaml`'s shape and conversion into
//              `goneat_doctor::ToolPolicy` (§4.4, §4.6).
// Purpose: Let the doctor's version/cooling policy be authored as data
//          instead of compiled in, the same way hook behavior is authored
//          through `.goneat/hooks.yaml`.
// Dependencies: goneat-core, goneat-doctor, jsonschema, semver, serde,
//               serde_json, serde_yaml, time
// ============================================================================

//! ## Overview
//! Validated the same two-step way as
//! [`goneat_hooks::manifest::parse_manifest`]: the raw YAML is converted to
//! JSON and checked against an embedded Draft 2020-12 schema before a single
//! [`semver::Version`] or [`time::Duration`] is parsed, so a malformed entry
//! never partially constructs a [`goneat_doctor::ToolPolicy`].

use std::time::Duration as StdDuration;

use goneat_core::CoreError;
use goneat_core::CoreResult;
use goneat_core::time::parse_duration_go_style;
use goneat_doctor::Platform;
use goneat_doctor::ToolPolicy;
use jsonschema::Draft;
use semver::Version;
use semver::VersionReq;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use time::Duration as TimeDuration;

use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Current `.goneat/tools.yaml` schema version this crate understands.
pub const TOOLS_MANIFEST_VERSION: u32 = 1;

/// Default tools manifest path, relative to the project root.
pub const TOOLS_MANIFEST_FILE_NAME: &str = ".goneat/tools.yaml";

/// One entry in `.goneat/tools.yaml`, before conversion to a [`ToolPolicy`].
#[derive(Debug, Clone, Deserialize)]
struct ToolEntryDto {
    tool: String,
    #[serde(default)]
    version_flag: Option<String>,
    #[serde(default)]
    supported_platforms: Vec<String>,
    #[serde(default)]
    disallowed: Vec<String>,
    #[serde(default)]
    minimum_version: Option<String>,
    #[serde(default)]
    recommended_version: Option<String>,
    #[serde(default)]
    minimum_release_age: Option<String>,
    #[serde(default)]
    alert_only: bool,
    /// Named scope this tool belongs to (`--scope`/`--list-scopes`); the
    /// empty string means "ungrouped".
    #[serde(default)]
    scope: String,
    /// `argv` to run for `doctor tools --install`; empty means not installable.
    #[serde(default)]
    install: Vec<String>,
    /// `owner/repo` slug queried by `doctor tools --check-updates`; absent
    /// means this tool has no known GitHub release feed.
    #[serde(default)]
    github_repo: Option<String>,
}

/// Deserialized `.goneat/tools.yaml` document, before conversion.
#[derive(Debug, Clone, Deserialize)]
struct ToolsManifestDto {
    version: u32,
    #[serde(default)]
    tools: Vec<ToolEntryDto>,
}

/// A loaded tool policy paired with the flag used to print its version,
/// matching `goneat_doctor::ToolsRunner::new`'s expected input shape.
pub type ToolPolicyEntry = (ToolPolicy, String);

/// One fully-converted `.goneat/tools.yaml` entry, carrying the fields
/// `doctor tools` needs (`scope`, `install`, `github_repo`) alongside the
/// `ToolPolicy`/`version_flag` pair `assess`'s `ToolsRunner` needs.
///
/// Kept separate from [`ToolPolicy`] itself rather than widening that type,
/// since scope/install/repo are CLI-surface concerns `goneat-doctor` has no
/// use for during an `assess` run.
#[derive(Debug, Clone)]
pub struct ToolManifestEntry {
    /// The version/cooling policy, unchanged from what `assess` registers.
    pub policy: ToolPolicy,
    /// Flag passed to the tool binary to print its version (e.g. `--version`).
    pub version_flag: String,
    /// Named scope this tool belongs to; empty means ungrouped.
    pub scope: String,
    /// `argv` to run for `doctor tools --install`; empty means not installable.
    pub install: Vec<String>,
    /// `owner/repo` slug for `GitHubReleaseFetcher`, when known.
    pub github_repo: Option<String>,
}

impl ToolManifestEntry {
    /// Narrows to the `(ToolPolicy, version_flag)` pair `ToolsRunner::new`
    /// expects for the `assess` path.
    #[must_use]
    pub fn as_policy_entry(&self) -> ToolPolicyEntry {
        (self.policy.clone(), self.version_flag.clone())
    }
}

/// Narrows a full set of manifest entries to the `assess`-path input shape.
#[must_use]
pub fn to_policy_entries(entries: &[ToolManifestEntry]) -> Vec<ToolPolicyEntry> {
    entries.iter().map(ToolManifestEntry::as_policy_entry).collect()
}

/// Builds the `tool -> owner/repo` map `GitHubReleaseFetcher::new` expects,
/// skipping entries with no known GitHub release feed.
#[must_use]
pub fn repo_for_tool(entries: &[ToolManifestEntry]) -> std::collections::BTreeMap<String, String> {
    entries
        .iter()
        .filter_map(|entry| entry.github_repo.as_ref().map(|repo| (entry.policy.tool.clone(), repo.clone())))
        .collect()
}

/// Returns the embedded Draft 2020-12 JSON Schema for `.goneat/tools.yaml`.
#[must_use]
pub fn embedded_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": ["version"],
        "properties": {
            "version": { "type": "integer", "minimum": 1 },
            "tools": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["tool"],
                    "properties": {
                        "tool": { "type": "string", "minLength": 1 },
                        "version_flag": { "type": "string" },
                        "supported_platforms": {
                            "type": "array",
                            "items": { "type": "string", "enum": ["linux", "macos", "windows"] }
                        },
                        "disallowed": { "type": "array", "items": { "type": "string" } },
                        "minimum_version": { "type": "string" },
                        "recommended_version": { "type": "string" },
                        "minimum_release_age": { "type": "string" },
                        "alert_only": { "type": "boolean" },
                        "scope": { "type": "string" },
                        "install": { "type": "array", "items": { "type": "string" } },
                        "github_repo": { "type": "string", "pattern": "^[^/\\s]+/[^/\\s]+$" }
                    }
                }
            }
        }
    })
}

/// Validates `value` against [`embedded_schema`].
///
/// # Errors
///
/// Returns [`CoreError::SchemaInvalid`] carrying every validation message
/// when `value` does not conform.
pub fn validate_tools_manifest(value: &Value) -> CoreResult<()> {
    let schema = embedded_schema();
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| CoreError::SchemaInvalid(err.to_string()))?;
    let errors: Vec<String> = compiled.iter_errors(value).map(|err| err.to_string()).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::SchemaInvalid(errors.join("; ")))
    }
}

/// Parses and validates a `.goneat/tools.yaml` document into a list of
/// policies ready for [`goneat_doctor::ToolsRunner::new`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed YAML, [`ConfigError::Schema`]
/// for a schema violation, and [`ConfigError::Invalid`] when an entry's
/// version requirement or duration string is individually unparsable despite
/// matching the schema's (looser) string shape.
pub fn parse_tools_manifest(yaml: &str) -> ConfigResult<Vec<ToolManifestEntry>> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|err| ConfigError::Parse {
        path: "tools.yaml".to_string(),
        reason: err.to_string(),
    })?;
    let value = serde_json::to_value(&raw).map_err(|err| ConfigError::Parse {
        path: "tools.yaml".to_string(),
        reason: err.to_string(),
    })?;
    validate_tools_manifest(&value).map_err(ConfigError::Schema)?;
    let dto: ToolsManifestDto = serde_json::from_value(value).map_err(|err| ConfigError::Parse {
        path: "tools.yaml".to_string(),
        reason: err.to_string(),
    })?;
    dto.tools.into_iter().map(convert_entry).collect()
}

/// Reads and parses `<project_root>/.goneat/tools.yaml`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read, and whatever
/// [`parse_tools_manifest`] returns for a malformed or invalid document.
pub fn load_tools_manifest(project_root: &std::path::Path) -> ConfigResult<Vec<ToolManifestEntry>> {
    let path = project_root.join(TOOLS_MANIFEST_FILE_NAME);
    let raw = std::fs::read_to_string(&path).map_err(|err| ConfigError::Io {
        path: path.display().to_string(),
        source: err.to_string(),
    })?;
    parse_tools_manifest(&raw)
}

/// Converts one validated DTO entry into a [`ToolManifestEntry`].
fn convert_entry(entry: ToolEntryDto) -> ConfigResult<ToolManifestEntry> {
    let supported_platforms = entry
        .supported_platforms
        .iter()
        .map(|name| parse_platform(name))
        .collect::<ConfigResult<Vec<Platform>>>()?;
    let disallowed = entry
        .disallowed
        .iter()
        .map(|req| VersionReq::parse(req).map_err(|err| ConfigError::Invalid(format!("{}: disallowed {req:?}: {err}", entry.tool))))
        .collect::<ConfigResult<Vec<VersionReq>>>()?;
    let minimum_version = entry
        .minimum_version
        .as_deref()
        .map(|v| Version::parse(v).map_err(|err| ConfigError::Invalid(format!("{}: minimum_version {v:?}: {err}", entry.tool))))
        .transpose()?;
    let recommended_version = entry
        .recommended_version
        .as_deref()
        .map(|v| Version::parse(v).map_err(|err| ConfigError::Invalid(format!("{}: recommended_version {v:?}: {err}", entry.tool))))
        .transpose()?;
    let minimum_release_age = entry
        .minimum_release_age
        .as_deref()
        .map(|raw| parse_duration_go_style(raw).map_err(|reason| ConfigError::Invalid(format!("{}: minimum_release_age {raw:?}: {reason}", entry.tool))))
        .transpose()?
        .map(std_to_time_duration)
        .unwrap_or(TimeDuration::ZERO);

    let policy = ToolPolicy {
        tool: entry.tool.clone(),
        supported_platforms,
        disallowed,
        minimum_version,
        recommended_version,
        minimum_release_age,
        alert_only: entry.alert_only,
    };
    let version_flag = entry.version_flag.unwrap_or_else(|| "--version".to_string());
    Ok(ToolManifestEntry {
        policy,
        version_flag,
        scope: entry.scope,
        install: entry.install,
        github_repo: entry.github_repo,
    })
}

/// Converts a `std::time::Duration` to a `time::Duration`, saturating at
/// `time::Duration::MAX` rather than panicking on overflow.
fn std_to_time_duration(duration: StdDuration) -> TimeDuration {
    TimeDuration::try_from(duration).unwrap_or(TimeDuration::MAX)
}

/// Parses a platform name as it appears in the schema's `enum`.
fn parse_platform(name: &str) -> ConfigResult<Platform> {
    match name {
        "linux" => Ok(Platform::Linux),
        "macos" => Ok(Platform::MacOs),
        "windows" => Ok(Platform::Windows),
        other => Err(ConfigError::Invalid(format!("unrecognized platform {other:?}"))),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_minimal_manifest_parses_with_defaults() {
        let yaml = "version: 1\ntools:\n  - tool: golangci-lint\n";
        let entries = parse_tools_manifest(yaml).expect("valid manifest");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].policy.tool, "golangci-lint");
        assert_eq!(entries[0].version_flag, "--version");
        assert!(entries[0].policy.supported_platforms.is_empty());
        assert_eq!(entries[0].scope, "");
        assert!(entries[0].install.is_empty());
        assert_eq!(entries[0].github_repo, None);
    }

    #[test]
    fn a_full_entry_converts_every_field() {
        let yaml = "\
version: 1
tools:
  - tool: golangci-lint
    version_flag: version
    supported_platforms: [linux, macos]
    disallowed: [\"=1.50.1\"]
    minimum_version: 1.50.0
    recommended_version: 1.55.0
    minimum_release_age: 168h
    alert_only: true
    scope: lint
    install: [\"go\", \"install\", \"github.com/golangci/golangci-lint/cmd/golangci-lint@latest\"]
    github_repo: golangci/golangci-lint
";
        let entries = parse_tools_manifest(yaml).expect("valid manifest");
        let entry = &entries[0];
        assert_eq!(entry.version_flag, "version");
        assert_eq!(entry.policy.supported_platforms, vec![Platform::Linux, Platform::MacOs]);
        assert_eq!(entry.policy.disallowed.len(), 1);
        assert!(entry.policy.alert_only);
        assert_eq!(entry.policy.minimum_release_age, TimeDuration::hours(168));
        assert_eq!(entry.scope, "lint");
        assert_eq!(entry.install.len(), 3);
        assert_eq!(entry.github_repo.as_deref(), Some("golangci/golangci-lint"));

        let policy_entries = to_policy_entries(&entries);
        assert_eq!(policy_entries[0].1, "version");
        let repos = repo_for_tool(&entries);
        assert_eq!(repos.get("golangci-lint").map(String::as_str), Some("golangci/golangci-lint"));
    }

    #[test]
    fn a_github_repo_missing_the_owner_slash_repo_shape_fails_schema_validation() {
        let yaml = "version: 1\ntools:\n  - tool: x\n    github_repo: not-a-slug\n";
        assert!(parse_tools_manifest(yaml).is_err());
    }

    #[test]
    fn an_unknown_top_level_field_fails_schema_validation() {
        let yaml = "version: 1\nunexpected: true\n";
        assert!(parse_tools_manifest(yaml).is_err());
    }

    #[test]
    fn a_missing_tool_name_fails_schema_validation() {
        let yaml = "version: 1\ntools:\n  - version_flag: v\n";
        assert!(parse_tools_manifest(yaml).is_err());
    }

    #[test]
    fn an_unparsable_semver_fails_after_schema_validation_passes() {
        let yaml = "version: 1\ntools:\n  - tool: x\n    minimum_version: not-a-version\n";
        assert!(parse_tools_manifest(yaml).is_err());
    }

    #[test]
    fn an_unrecognized_platform_enum_value_fails_schema_validation() {
        let yaml = "version: 1\ntools:\n  - tool: x\n    supported_platforms: [plan9]\n";
        assert!(parse_tools_manifest(yaml).is_err());
    }

    #[test]
    fn a_missing_manifest_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(load_tools_manifest(dir.path()), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn a_present_manifest_file_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".goneat")).expect("mkdir");
        std::fs::write(dir.path().join(TOOLS_MANIFEST_FILE_NAME), "version: 1\ntools:\n  - tool: golangci-lint\n").expect("write tools.yaml");
        let entries = load_tools_manifest(dir.path()).expect("valid manifest");
        assert_eq!(entries.len(), 1);
    }
}
