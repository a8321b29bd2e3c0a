// crates/goneat-config/src/error.rs
// ============================================================================
// Module: Config Error Taxonomy
// Description: Error kinds for config file loading, merging, and parsing of
//              CLI-flag-shaped values.
// Purpose: Give the CLI a single error type to map to exit code 2 (§6, §7).
// Dependencies: goneat-core, thiserror
// ============================================================================

//! ## Overview
//! Schema failures (`hooks.yaml`/`tools.yaml`) reuse
//! [`goneat_core::CoreError::SchemaInvalid`] so they share the same exit-code
//! mapping as every other schema-validated document in the workspace.

use thiserror::Error;

/// Errors raised while resolving, reading, or merging configuration.
///
/// # Invariants
/// - Variants are stable for CLI exit-code mapping.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file failed schema validation.
    #[error(transparent)]
    Schema(#[from] goneat_core::CoreError),
    /// A config file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error, rendered.
        source: String,
    },
    /// A config file's contents could not be parsed.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// Parser error message.
        reason: String,
    },
    /// A flag or merged field value is semantically invalid.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// A hook manifest failed to load.
    #[error(transparent)]
    Hooks(#[from] goneat_hooks::HooksError),
}

/// Result alias for fallible config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
