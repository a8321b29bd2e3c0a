// crates/goneat-core/src/severity.rs
// ============================================================================
// Module: Severity Model
// Description: Canonical, totally-ordered severity scale shared by all checkers.
// Purpose: Give every runner and the fail-on evaluator a single ordering to compare on.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Severity is the only axis issues are compared on. Comparisons must go
//! through [`Severity`]'s derived ordering rather than through string
//! matching or ad hoc numeric codes, so that a new severity inserted at the
//! wrong place in this file is the only way to break `fail-on` semantics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Severity Scale
// ============================================================================

/// Canonical severity scale, ordered from least to most severe.
///
/// # Invariants
/// - Declaration order is the comparison order (`derive(Ord)` over variants).
/// - Serializes/deserializes in lowercase for stable JSON output (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding; never gates a build by itself.
    Info,
    /// Low-impact finding.
    Low,
    /// Medium-impact finding.
    Medium,
    /// High-impact finding.
    High,
    /// Critical finding; should usually gate a release.
    Critical,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 5] = [Self::Info, Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the lowercase wire name used in CLI flags and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parses a severity from its lowercase wire name.
    ///
    /// # Errors
    ///
    /// Returns `None` when `value` (case-insensitively) is not one of the
    /// five recognized severities.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "info" => Some(Self::Info),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Severity;

    #[test]
    fn ordering_matches_declaration() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn parse_round_trips_through_as_str() {
        for severity in Severity::ALL {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(Severity::parse(" High \n"), Some(Severity::High));
        assert_eq!(Severity::parse("CRITICAL"), Some(Severity::Critical));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(Severity::parse("urgent"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Severity::High).expect("serialize severity");
        assert_eq!(json, "\"high\"");
    }
}
