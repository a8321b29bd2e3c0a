// crates/goneat-config/src/assessment.rs
// ============================================================================
// Module: Assessment Config Loading
// Description: Layers `goneat.yaml` defaults under CLI flag overrides to
//              produce a validated `goneat_core::AssessmentConfig` (§4.6).
// Purpose: Give the CLI one call that resolves the full fallthrough ladder:
//          embedded default < project file < flags.
// Dependencies: goneat-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! [`PartialAssessmentConfig`] mirrors every [`AssessmentConfig`] field as an
//! `Option`, so both `goneat.yaml` and the CLI's parsed flags can be
//! expressed as "what did this layer actually set" without inventing a
//! sentinel value per field. [`merge_assessment_config`] folds the layers in
//! priority order and [`AssessmentConfig::validate`] still runs last, so a
//! merged result can never escape with a zero timeout.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use goneat_core::AssessmentConfig;
use goneat_core::Category;
use goneat_core::Mode;
use goneat_core::Severity;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Default project config file name, relative to the target root.
pub const PROJECT_CONFIG_FILE_NAME: &str = "goneat.yaml";

/// One layer's worth of `AssessmentConfig` overrides; every field is
/// optional because a layer (file or flags) may leave any field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialAssessmentConfig {
    /// Overrides [`AssessmentConfig::categories`] when set.
    pub categories: Option<BTreeSet<Category>>,
    /// Overrides [`AssessmentConfig::mode`] when set.
    pub mode: Option<Mode>,
    /// Overrides [`AssessmentConfig::concurrency`] when set.
    pub concurrency: Option<u32>,
    /// Overrides [`AssessmentConfig::timeout`] when set.
    #[serde(with = "duration_string_option")]
    pub timeout: Option<Duration>,
    /// Overrides [`AssessmentConfig::fail_on`] when set.
    pub fail_on: Option<Severity>,
    /// Overrides [`AssessmentConfig::priority_overrides`] when set; merged
    /// key-by-key rather than wholesale, so a flag can override a single
    /// category without discarding the file's other overrides.
    pub priority_overrides: Option<BTreeMap<Category, i32>>,
    /// Overrides [`AssessmentConfig::selected_paths`] when set.
    pub selected_paths: Option<Vec<PathBuf>>,
    /// Overrides [`AssessmentConfig::verbose`] when set.
    pub verbose: Option<bool>,
}

/// Folds `base`, then `file`, then `flags` into one [`AssessmentConfig`],
/// each layer's `Some` fields winning over the previous layer's, and
/// validates the result.
///
/// # Errors
///
/// Returns [`ConfigError::Schema`] when the merged config fails
/// [`AssessmentConfig::validate`] (currently: a zero timeout).
pub fn merge_assessment_config(
    base: AssessmentConfig,
    file: &PartialAssessmentConfig,
    flags: &PartialAssessmentConfig,
) -> ConfigResult<AssessmentConfig> {
    let mut merged = base;
    apply_layer(&mut merged, file);
    apply_layer(&mut merged, flags);
    merged.validate().map_err(ConfigError::Schema)?;
    Ok(merged)
}

/// Applies one layer's `Some` fields onto `merged` in place.
fn apply_layer(merged: &mut AssessmentConfig, layer: &PartialAssessmentConfig) {
    if let Some(categories) = &layer.categories {
        merged.categories = categories.clone();
    }
    if let Some(mode) = layer.mode {
        merged.mode = mode;
    }
    if let Some(concurrency) = layer.concurrency {
        merged.concurrency = concurrency;
    }
    if let Some(timeout) = layer.timeout {
        merged.timeout = timeout;
    }
    if let Some(fail_on) = layer.fail_on {
        merged.fail_on = fail_on;
    }
    if let Some(overrides) = &layer.priority_overrides {
        for (category, priority) in overrides {
            merged.priority_overrides.insert(*category, *priority);
        }
    }
    if let Some(paths) = &layer.selected_paths {
        merged.selected_paths = paths.clone();
    }
    if let Some(verbose) = layer.verbose {
        merged.verbose = verbose;
    }
}

/// Reads `<project_root>/goneat.yaml` if present and parses it into a
/// [`PartialAssessmentConfig`]; a missing file is not an error and yields
/// the all-`None` default.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file exists but cannot be read, or
/// [`ConfigError::Parse`] when its contents are not valid YAML matching
/// [`PartialAssessmentConfig`]'s shape.
pub fn load_project_assessment_defaults(project_root: &Path) -> ConfigResult<PartialAssessmentConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(PartialAssessmentConfig::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|err| ConfigError::Io {
        path: path.display().to_string(),
        source: err.to_string(),
    })?;
    serde_yaml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Serde helper for `Option<Duration>` as a Go-style duration string,
/// mirroring `goneat_core::time::duration_go_style` for the `Option` case.
mod duration_string_option {
    use std::time::Duration;

    use goneat_core::time::format_duration_go_style;
    use goneat_core::time::parse_duration_go_style;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub(super) fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&format_duration_go_style(*duration)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| parse_duration_go_style(&text).map_err(serde::de::Error::custom)).transpose()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
