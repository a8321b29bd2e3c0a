// crates/goneat-hooks/src/lib.rs
// ============================================================================
// Crate: goneat-hooks
// Description: Hook manifest types, generator, install/remove, state
//              detection, and inspection (§4.5).
// Purpose: Back the `goneat hooks {init|generate|install|validate|inspect|
//          remove|upgrade}` subcommand family.
// Dependencies: goneat-core, async-trait, jsonschema, serde, serde_json,
//               serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Six modules, read top to bottom in the order a hook moves through them:
//! [`manifest`] (parse + validate `.goneat/hooks.yaml`), [`generator`]
//! (render a script), [`install`] (place it under `.git/hooks/`), [`state`]
//! (derive the current lifecycle state), [`inspect`] (machine-readable
//! health report), and [`guardian`] (the pre-operation approval seam a
//! generated script invokes).

pub mod error;
pub mod generator;
pub mod guardian;
pub mod inspect;
pub mod install;
pub mod manifest;
pub mod state;

pub use error::HooksError;
pub use error::HooksResult;
pub use generator::BINARY_SEARCH_ORDER;
pub use generator::GONEAT_MARKER;
pub use generator::GeneratedHook;
pub use generator::ShellFlavor;
pub use generator::render_hook;
pub use generator::write_generated;
pub use guardian::AllowAllGuardian;
pub use guardian::GuardianCheck;
pub use inspect::EntryInspection;
pub use inspect::HookHealth;
pub use inspect::HookInspection;
pub use inspect::MAX_HEALTH_SCORE;
pub use inspect::ManifestInspection;
pub use inspect::MutatorFlags;
pub use inspect::inspect;
pub use install::InstallOutcome;
pub use install::install_hook;
pub use install::remove_hook;
pub use manifest::ContentSource;
pub use manifest::EntryKind;
pub use manifest::GuardianConfig;
pub use manifest::HookEntry;
pub use manifest::HookManifest;
pub use manifest::HookName;
pub use manifest::MANIFEST_VERSION;
pub use manifest::Optimization;
pub use manifest::ParallelMode;
pub use manifest::parse_manifest;
pub use manifest::validate_manifest;
pub use state::HookState;
pub use state::detect_state;
