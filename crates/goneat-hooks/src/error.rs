// crates/goneat-hooks/src/error.rs
// ============================================================================
// Module: Hooks Error Taxonomy
// Description: Error kinds for manifest parsing, schema validation, and
//              hook install/remove filesystem operations.
// Purpose: Give the CLI a stable, matchable error shape (§7) distinct from
//          runner-level report data.
// Dependencies: goneat-core, thiserror
// ============================================================================

//! ## Overview
//! Schema validation failures reuse [`goneat_core::CoreError::SchemaInvalid`]
//! so the CLI's exit-code mapping (§6: `SchemaInvalid` → exit 2) applies
//! uniformly across `goneat-config` and `goneat-hooks`.

use thiserror::Error;

/// Errors raised while parsing, validating, generating, or installing hooks.
///
/// # Invariants
/// - Variants are stable for CLI exit-code mapping.
#[derive(Debug, Error)]
pub enum HooksError {
    /// The manifest failed embedded JSON Schema validation, or core
    /// validation rejected it outright.
    #[error(transparent)]
    Schema(#[from] goneat_core::CoreError),
    /// The manifest could not be parsed as YAML.
    #[error("invalid hook manifest: {0}")]
    Manifest(String),
    /// A filesystem operation (read/write/rename/chmod) failed.
    #[error("hook filesystem error: {0}")]
    Io(String),
    /// The requested hook name has no entries in the manifest.
    #[error("no entries configured for hook '{0}'")]
    NotFound(String),
}

/// Result alias for fallible hooks operations.
pub type HooksResult<T> = Result<T, HooksError>;
