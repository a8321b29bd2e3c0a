// crates/goneat-config/src/lib.rs
// ============================================================================
// Crate: goneat-config
// Description: Layered configuration loading — `goneat.yaml`, CLI flags,
//              `.goneat/tools.yaml`, `.goneat/hooks.yaml`, and the
//              environment variables goneat recognizes (§4.6).
// Purpose: Be the one place the CLI goes to turn on-disk and command-line
//          input into validated `goneat-core`/`goneat-doctor`/`goneat-hooks`
//          types.
// Dependencies: goneat-core, goneat-doctor, goneat-hooks, jsonschema, semver,
//               serde, serde_json, serde_yaml, thiserror, time
// ============================================================================

//! ## Overview
//! Five modules: [`env`] (recognized environment variables, kept separate
//! from `AssessmentConfig` since they govern ambient behavior, not assessment
//! fields), [`flags`] (raw `&str` parsers shared by the CLI's clap value
//! parsers and file loading), [`assessment`] (the `goneat.yaml` < flags
//! fallthrough ladder), [`tools`] (`.goneat/tools.yaml`), and [`hooks`]
//! (`.goneat/hooks.yaml`, delegating to `goneat-hooks` for shape/validation).

pub mod assessment;
pub mod env;
pub mod error;
pub mod flags;
pub mod hooks;
pub mod tools;

pub use assessment::PROJECT_CONFIG_FILE_NAME;
pub use assessment::PartialAssessmentConfig;
pub use assessment::load_project_assessment_defaults;
pub use assessment::merge_assessment_config;
pub use env::EnvOverrides;
pub use error::ConfigError;
pub use error::ConfigResult;
pub use flags::parse_categories_csv;
pub use flags::parse_concurrency;
pub use flags::parse_priority_override;
pub use flags::parse_priority_overrides;
pub use flags::parse_severity;
pub use flags::parse_timeout;
pub use hooks::HOOKS_MANIFEST_FILE_NAME;
pub use hooks::load_hooks_manifest;
pub use tools::TOOLS_MANIFEST_FILE_NAME;
pub use tools::TOOLS_MANIFEST_VERSION;
pub use tools::ToolManifestEntry;
pub use tools::ToolPolicyEntry;
pub use tools::load_tools_manifest;
pub use tools::parse_tools_manifest;
pub use tools::repo_for_tool;
pub use tools::to_policy_entries;
pub use tools::validate_tools_manifest;
