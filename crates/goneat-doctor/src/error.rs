// crates/goneat-doctor/src/error.rs
// ============================================================================
// Module: Doctor Errors
// Description: Error taxonomy for tool detection, metadata fetch, and cache I/O.
// Dependencies: thiserror
// ============================================================================

use thiserror::Error;

/// Errors surfaced by the doctor subsystem.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// The metadata source could not be reached or returned a non-success status.
    #[error("metadata fetch failed: {0}")]
    Fetch(String),
    /// A fetched or cached payload could not be parsed.
    #[error("metadata payload invalid: {0}")]
    InvalidMetadata(String),
    /// The durable cache's underlying database failed.
    #[error("metadata cache error: {0}")]
    Cache(String),
    /// An install command could not be spawned or exited non-zero.
    #[error("install failed: {0}")]
    Install(String),
}

/// Result alias for fallible doctor operations.
pub type DoctorResult<T> = Result<T, DoctorError>;
