// crates/goneat-config/src/flags.rs
// ============================================================================
// Module: CLI Flag Parsing Helpers
// Description: Parses the raw string forms of `--categories`, `--fail-on`,
//              `--concurrency`, `--timeout`, and `--priority` into validated
//              values (§4.6).
// Purpose: Reject malformed flag values at the parsing boundary, before they
//          ever reach an `AssessmentConfig`, matching §7's "invalid
//          configuration is a parse-time error" contract.
// Dependencies: goneat-core
// ============================================================================

//! ## Overview
//! These functions are plain `&str -> Result<_, ConfigError>` conversions so
//! they can back a clap `value_parser` directly as well as a `goneat.yaml`
//! loader; neither caller needs to know about clap.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::time::Duration;

use goneat_core::Category;
use goneat_core::Severity;
use goneat_core::time::parse_duration_go_style;

use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Parses a comma-separated `--categories` value into a set of [`Category`].
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming the first unrecognized category.
pub fn parse_categories_csv(value: &str) -> ConfigResult<BTreeSet<Category>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            Category::parse(token).ok_or_else(|| ConfigError::Invalid(format!("unrecognized category {token:?}")))
        })
        .collect()
}

/// Parses a `--fail-on` value into a [`Severity`].
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `value` is not a recognized severity.
pub fn parse_severity(value: &str) -> ConfigResult<Severity> {
    Severity::parse(value).ok_or_else(|| ConfigError::Invalid(format!("unrecognized severity {value:?}")))
}

/// Parses a repeated `--priority category=N` value into one override entry.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `value` is not `category=integer`,
/// the category is unrecognized, or the integer does not parse.
pub fn parse_priority_override(value: &str) -> ConfigResult<(Category, i32)> {
    let (category_str, priority_str) = value
        .split_once('=')
        .ok_or_else(|| ConfigError::Invalid(format!("priority override {value:?} must be category=N")))?;
    let category = Category::parse(category_str.trim())
        .ok_or_else(|| ConfigError::Invalid(format!("unrecognized category {category_str:?}")))?;
    let priority: i32 = priority_str
        .trim()
        .parse()
        .map_err(|_err| ConfigError::Invalid(format!("priority {priority_str:?} is not an integer")))?;
    Ok((category, priority))
}

/// Parses every `--priority` occurrence into the `priority_overrides` map.
///
/// # Errors
///
/// Returns the first [`ConfigError::Invalid`] raised by [`parse_priority_override`].
pub fn parse_priority_overrides<'a>(values: impl IntoIterator<Item = &'a str>) -> ConfigResult<BTreeMap<Category, i32>> {
    values.into_iter().map(parse_priority_override).collect()
}

/// Parses a `--concurrency` value, rejecting negative input.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `value` does not parse as a
/// non-negative integer.
pub fn parse_concurrency(value: &str) -> ConfigResult<u32> {
    let trimmed = value.trim();
    if trimmed.starts_with('-') {
        return Err(ConfigError::Invalid(format!("concurrency must not be negative, got {trimmed:?}")));
    }
    trimmed
        .parse()
        .map_err(|_err| ConfigError::Invalid(format!("concurrency {trimmed:?} is not a non-negative integer")))
}

/// Parses a `--timeout` value in Go-style duration syntax, rejecting zero
/// and negative durations per [`goneat_core::AssessmentConfig::validate`].
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `value` fails to parse or parses to
/// zero.
pub fn parse_timeout(value: &str) -> ConfigResult<Duration> {
    let trimmed = value.trim();
    if trimmed.starts_with('-') {
        return Err(ConfigError::Invalid(format!("timeout must not be negative, got {trimmed:?}")));
    }
    let duration = parse_duration_go_style(trimmed).map_err(ConfigError::Invalid)?;
    if duration.is_zero() {
        return Err(ConfigError::Invalid("timeout must be greater than zero".to_string()));
    }
    Ok(duration)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_csv_parses_and_trims() {
        let parsed = parse_categories_csv(" format, lint ,security").expect("valid categories");
        assert_eq!(parsed, BTreeSet::from([Category::Format, Category::Lint, Category::Security]));
    }

    #[test]
    fn categories_csv_rejects_unknown_category() {
        assert!(parse_categories_csv("format,performance").is_err());
    }

    #[test]
    fn empty_categories_csv_is_the_empty_set() {
        assert_eq!(parse_categories_csv("").expect("valid"), BTreeSet::new());
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!(parse_severity("HIGH").expect("valid"), Severity::High);
    }

    #[test]
    fn severity_rejects_unknown_value() {
        assert!(parse_severity("urgent").is_err());
    }

    #[test]
    fn priority_override_parses_category_equals_integer() {
        assert_eq!(parse_priority_override("security=1").expect("valid"), (Category::Security, 1));
    }

    #[test]
    fn priority_override_rejects_missing_equals() {
        assert!(parse_priority_override("security").is_err());
    }

    #[test]
    fn priority_override_rejects_unknown_category() {
        assert!(parse_priority_override("performance=1").is_err());
    }

    #[test]
    fn priority_override_rejects_non_integer_value() {
        assert!(parse_priority_override("security=fast").is_err());
    }

    #[test]
    fn priority_overrides_collects_every_entry() {
        let overrides = parse_priority_overrides(["security=1", "lint=50"]).expect("valid");
        assert_eq!(overrides.get(&Category::Security), Some(&1));
        assert_eq!(overrides.get(&Category::Lint), Some(&50));
    }

    #[test]
    fn concurrency_rejects_negative_values() {
        assert!(parse_concurrency("-1").is_err());
    }

    #[test]
    fn concurrency_accepts_zero_as_auto() {
        assert_eq!(parse_concurrency("0").expect("valid"), 0);
    }

    #[test]
    fn timeout_rejects_negative_and_zero() {
        assert!(parse_timeout("-5s").is_err());
        assert!(parse_timeout("0s").is_err());
    }

    #[test]
    fn timeout_parses_go_style_duration() {
        assert_eq!(parse_timeout("2m30s").expect("valid"), Duration::from_secs(150));
    }
}
