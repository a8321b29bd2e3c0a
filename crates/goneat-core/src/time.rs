// crates/goneat-core/src/time.rs
// ============================================================================
// Module: Goneat Time Model
// Description: Injectable wall-clock access and Go-style duration rendering.
// Purpose: Keep the orchestrator's scheduling decisions deterministic and
//          testable by never reading wall-clock time directly.
// Dependencies: time, serde
// ============================================================================

//! ## Overview
//! The orchestrator never calls `SystemTime::now()` or `Instant::now()`
//! directly. Every timestamp it stamps onto a report comes from a
//! caller-supplied [`Clock`], so tests can substitute a fixed or stepped
//! clock and assert on exact `generated_at` values and elapsed durations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of wall-clock time for the orchestrator and doctor.
///
/// # Invariants
/// - `now()` must be monotonically non-decreasing within a single process
///   for any implementation used outside of tests.
pub trait Clock: Send + Sync {
    /// Returns the current wall-clock time.
    fn now(&self) -> OffsetDateTime;
}

/// [`Clock`] backed by the operating system's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// [`Clock`] that always returns a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

// ============================================================================
// SECTION: Report Timestamp
// ============================================================================

/// RFC 3339 timestamp recorded on a report or cache entry.
///
/// # Invariants
/// - Always UTC; constructed only from a [`Clock`], never from local system calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "timestamp_rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Captures the current instant from `clock`.
    #[must_use]
    pub fn now(clock: &dyn Clock) -> Self {
        Self(clock.now())
    }

    /// Returns the underlying `OffsetDateTime`.
    #[must_use]
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// Returns the whole-second Unix epoch value.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }
}

mod timestamp_rfc3339 {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub(super) fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let rendered = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&raw, &Rfc3339).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Duration Rendering
// ============================================================================

/// Renders a [`Duration`] the way Go's `time.Duration` would (`"2m30s"`,
/// `"450ms"`, `"1h0m5s"`), matching the §6 contract for JSON output.
#[must_use]
pub fn format_duration_go_style(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }
    let total_millis = duration.as_millis();
    if total_millis < 1000 {
        return format!("{total_millis}ms");
    }
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = duration.subsec_millis();
    let mut rendered = String::new();
    if hours > 0 {
        rendered.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        rendered.push_str(&format!("{minutes}m"));
    }
    if millis > 0 {
        rendered.push_str(&format!("{seconds}.{millis:03}s"));
    } else {
        rendered.push_str(&format!("{seconds}s"));
    }
    rendered
}

/// Parses a Go-style duration string (`"2m30s"`, `"450ms"`, `"1h0m5s"`, `"5s"`).
///
/// # Errors
///
/// Returns an error message when `input` contains no recognized unit or a
/// non-numeric magnitude.
pub fn parse_duration_go_style(input: &str) -> Result<Duration, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total = Duration::ZERO;
    let mut chars = trimmed.char_indices().peekable();
    let mut start = 0usize;
    let mut saw_unit = false;

    while let Some(&(idx, ch)) = chars.peek() {
        if ch.is_ascii_digit() || ch == '.' {
            chars.next();
            continue;
        }
        // Unit letters: consume until the next digit or end of input.
        let unit_start = idx;
        let mut unit_end = idx;
        while let Some(&(unit_idx, unit_ch)) = chars.peek() {
            if unit_ch.is_ascii_digit() || unit_ch == '.' {
                break;
            }
            unit_end = unit_idx + unit_ch.len_utf8();
            chars.next();
        }
        let magnitude_str = &trimmed[start..unit_start];
        let unit_str = &trimmed[unit_start..unit_end];
        let magnitude: f64 = magnitude_str
            .parse()
            .map_err(|_err| format!("invalid numeric magnitude {magnitude_str:?} in {trimmed:?}"))?;
        let unit_seconds = match unit_str {
            "ms" => 0.001,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            other => return Err(format!("unrecognized duration unit {other:?} in {trimmed:?}")),
        };
        total += Duration::from_secs_f64(magnitude * unit_seconds);
        saw_unit = true;
        start = unit_end;
    }

    if !saw_unit {
        return Err(format!("missing duration unit in {trimmed:?}"));
    }
    Ok(total)
}

/// Serde helper module for `#[serde(with = "crate::time::duration_go_style")]`
/// fields, rendering [`Duration`] the same way [`format_duration_go_style`] does.
pub mod duration_go_style {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    use super::format_duration_go_style;
    use super::parse_duration_go_style;

    /// Serializes `value` as a Go-style duration string.
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration_go_style(*value))
    }

    /// Deserializes a Go-style duration string into a [`Duration`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_duration_go_style(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::macros::datetime;

    use super::FixedClock;
    use super::Timestamp;
    use super::format_duration_go_style;
    use super::parse_duration_go_style;

    #[test]
    fn fixed_clock_yields_stable_timestamp() {
        let clock = FixedClock(datetime!(2026 - 07 - 28 12:00:00 UTC));
        let first = Timestamp::now(&clock);
        let second = Timestamp::now(&clock);
        assert_eq!(first, second);
    }

    #[test]
    fn duration_formatting_matches_go_style() {
        assert_eq!(format_duration_go_style(Duration::from_millis(0)), "0s");
        assert_eq!(format_duration_go_style(Duration::from_millis(450)), "450ms");
        assert_eq!(format_duration_go_style(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration_go_style(Duration::from_secs(150)), "2m30s");
        assert_eq!(format_duration_go_style(Duration::from_secs(3605)), "1h0m5s");
    }

    #[test]
    fn parse_duration_round_trips_common_forms() {
        assert_eq!(parse_duration_go_style("50ms").unwrap(), Duration::from_millis(50));
        assert_eq!(parse_duration_go_style("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration_go_style("2m30s").unwrap(), Duration::from_secs(150));
        assert_eq!(parse_duration_go_style("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn parse_duration_rejects_missing_unit() {
        assert!(parse_duration_go_style("30").is_err());
        assert!(parse_duration_go_style("").is_err());
    }

    #[test]
    fn timestamp_round_trips_through_json() {
        let clock = FixedClock(datetime!(2026 - 07 - 28 12:00:00 UTC));
        let stamp = Timestamp::now(&clock);
        let json = serde_json::to_string(&stamp).expect("serialize timestamp");
        let restored: Timestamp = serde_json::from_str(&json).expect("deserialize timestamp");
        assert_eq!(stamp, restored);
    }
}
