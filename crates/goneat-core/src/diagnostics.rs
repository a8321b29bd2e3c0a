// crates/goneat-core/src/diagnostics.rs
// ============================================================================
// Module: Diagnostics Sink
// Description: Leveled diagnostic events (plan constructed, runner
//              started/finished/timed out, cooling decisions, hook
//              install/remove) decoupled from any specific backend (§4.7).
// Purpose: Let the orchestrator, doctor, and hooks modules report what
//          they're doing without depending on a concrete logging crate, and
//          without ever writing to stdout (reserved for the report body).
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`DiagnosticsSink`] mirrors the sink-trait shape used elsewhere in this
//! workspace for one-way delivery: implementations receive a [`Level`] and a
//! message and decide whether to surface it. [`StderrSink`] is the default —
//! it writes leveled lines to stderr through an explicit `Write` handle,
//! never `eprintln!`, and its minimum level is `warn` unless raised to
//! `debug` by `--verbose`.

use std::io::Stderr;
use std::io::Write as _;
use std::io::stderr;

// ============================================================================
// SECTION: Level
// ============================================================================

/// Diagnostic severity, ordered least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Fine-grained detail, shown only under `--verbose`.
    Debug,
    /// Routine progress, same visibility as `Debug`.
    Info,
    /// Unexpected but non-fatal condition; the default minimum level.
    Warn,
    /// A failure worth a line even without `--verbose`.
    Error,
}

impl Level {
    /// Returns the label used in rendered diagnostic lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

// ============================================================================
// SECTION: Sink Trait
// ============================================================================

/// Receives diagnostic events from the orchestrator, doctor, and hooks
/// modules.
///
/// # Invariants
/// - Implementations must never write to stdout; that stream is reserved for
///   the assessment report body.
pub trait DiagnosticsSink: Send + Sync {
    /// The minimum level this sink will emit.
    fn min_level(&self) -> Level;

    /// Writes `message` at `level`. Called only when `level >= min_level()`.
    fn write(&self, level: Level, message: &str);

    /// Emits `message` at `level` if it meets this sink's minimum level.
    fn emit(&self, level: Level, message: &str) {
        if level >= self.min_level() {
            self.write(level, message);
        }
    }
}

// ============================================================================
// SECTION: Default Sink
// ============================================================================

/// Default [`DiagnosticsSink`]: leveled lines on stderr.
#[derive(Debug)]
pub struct StderrSink {
    min_level: Level,
}

impl StderrSink {
    /// Builds a sink whose minimum level is `debug` when `verbose` is set,
    /// `warn` otherwise.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self {
            min_level: if verbose { Level::Debug } else { Level::Warn },
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DiagnosticsSink for StderrSink {
    fn min_level(&self) -> Level {
        self.min_level
    }

    fn write(&self, level: Level, message: &str) {
        let mut handle: Stderr = stderr();
        // A closed stderr is not this sink's problem to report; dropping the
        // write is preferable to panicking a runner over a logging failure.
        let _ = writeln!(handle, "[{}] {message}", level.as_str());
    }
}

/// A sink that discards every event; used where no diagnostics are wanted
/// (e.g. library embedding, tests asserting on report output alone).
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn min_level(&self) -> Level {
        Level::Error
    }

    fn write(&self, _level: Level, _message: &str) {}

    fn emit(&self, _level: Level, _message: &str) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
