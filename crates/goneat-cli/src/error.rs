// crates/goneat-cli/src/error.rs
// ============================================================================
// Module: CLI Error
// Description: The one error type every command function returns (§6, §7).
// Purpose: Keep `main` a single small `match`, with every command's failure
//          reduced to one displayable message before it gets there.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Mirrors `decision-gate-cli`'s `CliError`: a single message-carrying
//! struct rather than a variant per failure mode, since the CLI's job is to
//! report a clear cause, not let callers match on it.

use thiserror::Error;

/// A command-level failure, already rendered to its final message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    message: String,
}

impl CliError {
    /// Builds a new [`CliError`] from an already-formatted message.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self { message }
    }
}

/// Result alias for fallible CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<goneat_config::ConfigError> for CliError {
    fn from(err: goneat_config::ConfigError) -> Self {
        Self::new(format!("configuration error: {err}"))
    }
}

impl From<goneat_hooks::HooksError> for CliError {
    fn from(err: goneat_hooks::HooksError) -> Self {
        Self::new(format!("hooks error: {err}"))
    }
}

impl From<goneat_doctor::DoctorError> for CliError {
    fn from(err: goneat_doctor::DoctorError) -> Self {
        Self::new(format!("doctor error: {err}"))
    }
}

impl From<goneat_core::CoreError> for CliError {
    fn from(err: goneat_core::CoreError) -> Self {
        Self::new(format!("invalid configuration: {err}"))
    }
}
