// crates/goneat-hooks/src/manifest.rs
// ============================================================================
// Module: Hook Manifest
// Description: `.goneat/hooks.yaml` document shape, embedded JSON Schema, and
//              parsing (§4.5).
// Purpose: Be the sole source of truth the generator, installer, and
//          inspector all read from.
// Dependencies: goneat-core, jsonschema, serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! A manifest is never acted on until it has passed [`validate_manifest`]
//! against the embedded schema: the generator, installer, and inspector all
//! go through [`parse_manifest`], which validates before deserializing, so a
//! malformed manifest can never produce a partially-generated hook.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use jsonschema::Draft;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use goneat_core::CoreError;
use goneat_core::CoreResult;

use crate::error::HooksError;
use crate::error::HooksResult;

/// Current manifest schema version this crate understands.
pub const MANIFEST_VERSION: u32 = 1;

// ============================================================================
// SECTION: Hook Name
// ============================================================================

/// A git hook this manifest can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookName {
    /// Runs before a commit is created.
    PreCommit,
    /// Runs before a push leaves the local repository.
    PrePush,
    /// Runs before a destructive reset, when configured.
    PreReset,
}

impl HookName {
    /// All recognized hook names, in a stable order.
    pub const ALL: [Self; 3] = [Self::PreCommit, Self::PrePush, Self::PreReset];

    /// Returns the kebab-case wire name, also used as the installed filename.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::PrePush => "pre-push",
            Self::PreReset => "pre-reset",
        }
    }

    /// Parses a hook name from its kebab-case wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == normalized)
    }
}

// ============================================================================
// SECTION: Hook Entries
// ============================================================================

/// Whether a configured command is one goneat recognizes internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// One of goneat's own subcommands (`assess`, `format`, `dependencies`).
    Internal,
    /// An arbitrary external command.
    External,
}

/// Internal commands a hook entry may name.
const INTERNAL_COMMANDS: [&str; 3] = ["assess", "format", "dependencies"];

/// One command to run as part of a hook, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Command name: `assess`/`format`/`dependencies`, or an external binary.
    pub command: String,
    /// Extra arguments appended after the derived invocation flags.
    #[serde(default)]
    pub args: Vec<String>,
    /// Whether this entry re-stages files it fixed (`mode=fix` commands only).
    #[serde(default)]
    pub stage_fixed: bool,
    /// Lower runs earlier within the same hook.
    #[serde(default)]
    pub priority: i32,
    /// Optional per-entry timeout override.
    #[serde(default, with = "optional_duration_go_style")]
    pub timeout: Option<Duration>,
    /// Command to fall back to when this entry's command is unavailable.
    #[serde(default)]
    pub fallback: Option<String>,
}

impl HookEntry {
    /// Classifies this entry as internal or external (§4.5).
    #[must_use]
    pub fn classification(&self) -> EntryKind {
        if INTERNAL_COMMANDS.contains(&self.command.as_str()) {
            EntryKind::Internal
        } else {
            EntryKind::External
        }
    }
}

// ============================================================================
// SECTION: Optimization
// ============================================================================

/// Where hook-scoped runners should read file content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// The git index (staged content), used by `pre-commit`.
    Index,
    /// The working tree, used by `pre-push`/`pre-reset`.
    Working,
}

/// Requested parallelism strategy for hook-scoped runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelMode {
    /// Let the orchestrator pick (`concurrency = 0`).
    Auto,
    /// Use the host's full parallelism budget.
    Max,
    /// Force single-runner execution (`concurrency = 1`).
    Sequential,
}

/// Hook-scoped execution tuning (§4.5).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimization {
    /// Restrict runners to changed files (⇒ `--staged-only`).
    #[serde(default = "default_true")]
    pub only_changed_files: bool,
    /// Where "changed" content is read from.
    #[serde(default = "default_content_source")]
    pub content_source: ContentSource,
    /// Requested parallelism strategy.
    #[serde(default = "default_parallel_mode")]
    pub parallel: ParallelMode,
    /// Whether to reuse the doctor's metadata cache across hook invocations.
    #[serde(default = "default_true")]
    pub cache_results: bool,
}

/// Serde default for `only_changed_files`/`cache_results`.
const fn default_true() -> bool {
    true
}

/// Serde default for `optimization.content_source`.
const fn default_content_source() -> ContentSource {
    ContentSource::Index
}

/// Serde default for `optimization.parallel`.
const fn default_parallel_mode() -> ParallelMode {
    ParallelMode::Auto
}

impl Default for Optimization {
    fn default() -> Self {
        Self { only_changed_files: true, content_source: ContentSource::Index, parallel: ParallelMode::Auto, cache_results: true }
    }
}

// ============================================================================
// SECTION: Guardian
// ============================================================================

/// Pre-operation approval gate a generated hook invokes before its entries.
///
/// The policy engine behind `goneat guardian check` is out of scope here;
/// this is the configuration seam the generated script reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Scope argument passed to `goneat guardian check`.
    pub scope: String,
    /// Operation argument passed to `goneat guardian check`.
    pub operation: String,
}

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// The persisted `.goneat/hooks.yaml` document.
///
/// # Invariants
/// - Never constructed from raw YAML without passing [`validate_manifest`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookManifest {
    /// Schema version of this document.
    pub version: u32,
    /// Per-hook ordered command entries.
    #[serde(default)]
    pub hooks: BTreeMap<HookName, Vec<HookEntry>>,
    /// Execution tuning shared across all configured hooks.
    #[serde(default)]
    pub optimization: Optimization,
    /// Optional pre-operation approval gate.
    #[serde(default)]
    pub guardian: Option<GuardianConfig>,
}

impl Default for HookManifest {
    fn default() -> Self {
        Self { version: MANIFEST_VERSION, hooks: BTreeMap::new(), optimization: Optimization::default(), guardian: None }
    }
}

impl HookManifest {
    /// Serializes this manifest to YAML, for writing to `.goneat/hooks.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`HooksError::Manifest`] if serialization fails (it should not,
    /// for a value built from this type).
    pub fn to_yaml(&self) -> HooksResult<String> {
        serde_yaml::to_string(self).map_err(|err| HooksError::Manifest(err.to_string()))
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Builds the embedded JSON Schema for `.goneat/hooks.yaml`.
///
/// Rebuilt on every call rather than cached: manifests are small and
/// validated once per CLI invocation, not in a hot loop.
fn embedded_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["version"],
        "additionalProperties": false,
        "properties": {
            "version": { "type": "integer", "minimum": 1 },
            "hooks": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "pre-commit": { "$ref": "#/$defs/entries" },
                    "pre-push": { "$ref": "#/$defs/entries" },
                    "pre-reset": { "$ref": "#/$defs/entries" }
                }
            },
            "optimization": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "only_changed_files": { "type": "boolean" },
                    "content_source": { "enum": ["index", "working"] },
                    "parallel": { "enum": ["auto", "max", "sequential"] },
                    "cache_results": { "type": "boolean" }
                }
            },
            "guardian": {
                "type": "object",
                "required": ["scope", "operation"],
                "additionalProperties": false,
                "properties": {
                    "scope": { "type": "string", "minLength": 1 },
                    "operation": { "type": "string", "minLength": 1 }
                }
            }
        },
        "$defs": {
            "entries": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["command"],
                    "additionalProperties": false,
                    "properties": {
                        "command": { "type": "string", "minLength": 1 },
                        "args": { "type": "array", "items": { "type": "string" } },
                        "stage_fixed": { "type": "boolean" },
                        "priority": { "type": "integer" },
                        "timeout": { "type": "string" },
                        "fallback": { "type": "string" }
                    }
                }
            }
        }
    })
}

/// Validates a raw manifest value against the embedded schema.
///
/// # Errors
///
/// Returns [`CoreError::SchemaInvalid`] on the first violation, joining all
/// violations found into one message.
pub fn validate_manifest(value: &Value) -> CoreResult<()> {
    let schema = embedded_schema();
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| CoreError::SchemaInvalid(format!("invalid embedded hooks schema: {err}")))?;
    let messages: Vec<String> = compiled.iter_errors(value).map(|err| err.to_string()).collect();
    if messages.is_empty() { Ok(()) } else { Err(CoreError::SchemaInvalid(messages.join("; "))) }
}

/// Parses `yaml` into a [`HookManifest`], validating against the embedded
/// schema before attempting strong-typed deserialization.
///
/// # Errors
///
/// Returns [`HooksError::Manifest`] for unparsable YAML, or
/// [`HooksError::Schema`] when the document fails schema validation.
pub fn parse_manifest(yaml: &str) -> HooksResult<HookManifest> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|err| HooksError::Manifest(err.to_string()))?;
    let as_json = serde_json::to_value(&raw).map_err(|err| HooksError::Manifest(err.to_string()))?;
    validate_manifest(&as_json)?;
    serde_yaml::from_str(yaml).map_err(|err| HooksError::Manifest(err.to_string()))
}

/// Serde helper for `Option<Duration>` fields rendered as Go-style strings.
mod optional_duration_go_style {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    use goneat_core::time::format_duration_go_style;
    use goneat_core::time::parse_duration_go_style;

    /// Serializes `value` as an optional Go-style duration string.
    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&format_duration_go_style(*duration)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional Go-style duration string into `Option<Duration>`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| parse_duration_go_style(&text).map_err(serde::de::Error::custom)).transpose()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_name_round_trips_through_as_str() {
        for name in HookName::ALL {
            assert_eq!(HookName::parse(name.as_str()), Some(name));
        }
    }

    #[test]
    fn assess_format_and_dependencies_are_internal() {
        for command in INTERNAL_COMMANDS {
            let entry = HookEntry { command: command.to_string(), args: Vec::new(), stage_fixed: false, priority: 0, timeout: None, fallback: None };
            assert_eq!(entry.classification(), EntryKind::Internal);
        }
    }

    #[test]
    fn an_arbitrary_binary_is_external() {
        let entry = HookEntry { command: "eslint".to_string(), args: Vec::new(), stage_fixed: false, priority: 0, timeout: None, fallback: None };
        assert_eq!(entry.classification(), EntryKind::External);
    }

    #[test]
    fn a_minimal_manifest_parses_and_validates() {
        let yaml = "version: 1\nhooks:\n  pre-commit:\n    - command: assess\n";
        let manifest = parse_manifest(yaml).expect("minimal manifest is valid");
        assert_eq!(manifest.version, 1);
        assert_eq!(manifest.hooks[&HookName::PreCommit].len(), 1);
        assert!(manifest.optimization.only_changed_files, "default optimization is populated by serde defaults");
    }

    #[test]
    fn an_unknown_top_level_field_fails_schema_validation() {
        let yaml = "version: 1\nnonsense_field: true\n";
        let result = parse_manifest(yaml);
        assert!(matches!(result, Err(HooksError::Schema(CoreError::SchemaInvalid(_)))));
    }

    #[test]
    fn a_missing_command_on_an_entry_fails_schema_validation() {
        let yaml = "version: 1\nhooks:\n  pre-commit:\n    - args: [\"--fix\"]\n";
        assert!(parse_manifest(yaml).is_err());
    }

    #[test]
    fn timeout_round_trips_as_a_go_style_duration_string() {
        let entry = HookEntry {
            command: "assess".to_string(),
            args: Vec::new(),
            stage_fixed: false,
            priority: 0,
            timeout: Some(Duration::from_secs(90)),
            fallback: None,
        };
        let json = serde_json::to_value(&entry).expect("serializable");
        assert_eq!(json["timeout"], "1m30s");
        let back: HookEntry = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn manifest_round_trips_through_yaml() {
        let mut manifest = HookManifest::default();
        manifest.hooks.insert(
            HookName::PreCommit,
            vec![HookEntry { command: "assess".to_string(), args: Vec::new(), stage_fixed: false, priority: 0, timeout: None, fallback: None }],
        );
        let yaml = manifest.to_yaml().expect("serializable manifest");
        let parsed = parse_manifest(&yaml).expect("round-tripped manifest is still valid");
        assert_eq!(parsed, manifest);
    }
}
