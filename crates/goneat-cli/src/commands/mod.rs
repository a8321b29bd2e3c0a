// crates/goneat-cli/src/commands/mod.rs
// ============================================================================
// Module: Command Dispatch
// Description: One submodule per top-level subcommand (§6).
// Purpose: Keep `main.rs` a thin parse-and-dispatch shell.
// ============================================================================

pub mod assess;
pub mod doctor;
pub mod hooks;
