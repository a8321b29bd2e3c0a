// crates/goneat-doctor/src/lib.rs
// ============================================================================
// Crate: goneat-doctor
// Description: Tool availability, version/cooling policy evaluation, and a
//              durable metadata cache (§4.4).
// Purpose: Back both the `goneat doctor` subcommand and the `Tools` category
//          runner with one shared implementation.
// Dependencies: goneat-core, async-trait, reqwest, rusqlite, semver, tokio
// ============================================================================

//! ## Overview
//! Four modules, each independently testable: [`platform`] (host filtering),
//! [`policy`] (pure version/cooling evaluation), [`fetch`] (pluggable
//! upstream metadata source), [`cache`] (durable TTL + single-flight cache),
//! and [`doctor`] (the operations that combine them), plus [`runner`] which
//! wires the result into the orchestrator as `Category::Tools`.

pub mod cache;
pub mod doctor;
pub mod error;
pub mod fetch;
pub mod platform;
pub mod policy;
pub mod runner;

pub use cache::DEFAULT_TTL;
pub use cache::ToolMetadataCache;
pub use doctor::InstallOutcome;
pub use doctor::ToolCheck;
pub use doctor::check;
pub use doctor::check_cooling;
pub use doctor::install;
pub use error::DoctorError;
pub use error::DoctorResult;
pub use fetch::GitHubReleaseFetcher;
pub use fetch::MetadataFetcher;
pub use fetch::ReleaseMetadata;
pub use platform::Platform;
pub use platform::applies_to_current_host;
pub use policy::CoolingVerdict;
pub use policy::ToolPolicy;
pub use policy::VersionVerdict;
pub use policy::evaluate_cooling;
pub use policy::evaluate_version;
pub use runner::ToolsRunner;
