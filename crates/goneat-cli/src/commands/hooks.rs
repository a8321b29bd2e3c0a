// crates/goneat-cli/src/commands/hooks.rs
// ============================================================================
// Module: `goneat hooks`
// Description: Manifest lifecycle — init, generate, install, validate,
//              inspect, remove, upgrade, and policy editing (§4.5, §6).
// Purpose: Translate each `hooks` subcommand into the corresponding
//          `goneat-hooks`/`goneat-config` calls and a stdout summary.
// Dependencies: goneat-config, goneat-hooks
// ============================================================================

//! ## Overview
//! Operates against the current working directory as the project root —
//! `hooks`/`doctor` have no `--target` flag, unlike `assess` (§6). `generate`
//! and `install` both iterate [`HookName::ALL`] and skip a hook with no
//! configured entries rather than treating [`goneat_hooks::HooksError::NotFound`]
//! as fatal.

use std::path::Path;
use std::path::PathBuf;

use goneat_config::HOOKS_MANIFEST_FILE_NAME;
use goneat_config::load_hooks_manifest;
use goneat_hooks::ContentSource;
use goneat_hooks::HookManifest;
use goneat_hooks::HookName;
use goneat_hooks::HooksError;
use goneat_hooks::MAX_HEALTH_SCORE;
use goneat_hooks::ParallelMode;
use goneat_hooks::inspect;
use goneat_hooks::install_hook;
use goneat_hooks::parse_manifest;
use goneat_hooks::remove_hook;
use goneat_hooks::render_hook;
use goneat_hooks::write_generated;

use crate::cli::HooksArgs;
use crate::cli::HooksCommand;
use crate::cli::HooksPolicyArgs;
use crate::cli::HooksPolicyCommand;
use crate::cli::HooksPolicySetArgs;
use crate::cli::HooksRemoveArgs;
use crate::error::CliError;
use crate::error::CliResult;
use crate::output;

/// Runs `goneat hooks <subcommand>` against the current directory.
pub fn run(args: HooksArgs) -> CliResult<()> {
    let root = current_root()?;
    match args.command {
        HooksCommand::Init => init(&root),
        HooksCommand::Generate => generate(&root),
        HooksCommand::Install => install(&root),
        HooksCommand::Validate => validate(&root),
        HooksCommand::Inspect => inspect_manifest(&root),
        HooksCommand::Remove(remove_args) => remove(&root, &remove_args),
        HooksCommand::Upgrade => upgrade(&root),
        HooksCommand::Policy(policy_args) => policy(&root, policy_args),
    }
}

/// Resolves the project root `hooks`/`doctor` operate against.
fn current_root() -> CliResult<PathBuf> {
    std::env::current_dir().map_err(|err| CliError::new(format!("failed to resolve current directory: {err}")))
}

/// Path to `<root>/.goneat/hooks.yaml`.
fn manifest_path(root: &Path) -> PathBuf {
    root.join(HOOKS_MANIFEST_FILE_NAME)
}

/// Path to `<root>/.goneat/hooks/`, where rendered scripts are written.
fn generated_dir(root: &Path) -> PathBuf {
    root.join(".goneat").join("hooks")
}

/// Path to `<root>/.git/hooks/`, where scripts are installed.
fn git_hooks_dir(root: &Path) -> PathBuf {
    root.join(".git").join("hooks")
}

/// Writes one line to stdout, mapping any I/O failure to a [`CliError`].
fn write_line(message: &str) -> CliResult<()> {
    output::write_stdout_line(message).map_err(|err| CliError::new(err.to_string()))
}

/// Serializes `manifest` and writes it to `<root>/.goneat/hooks.yaml`.
fn write_manifest(root: &Path, manifest: &HookManifest) -> CliResult<()> {
    let path = manifest_path(root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| CliError::new(format!("failed to create {}: {err}", parent.display())))?;
    }
    let yaml = manifest.to_yaml()?;
    std::fs::write(&path, yaml).map_err(|err| CliError::new(format!("failed to write {}: {err}", path.display())))
}

/// Writes a starter manifest if none exists; a no-op otherwise.
fn init(root: &Path) -> CliResult<()> {
    let path = manifest_path(root);
    if path.exists() {
        return write_line(&format!("hooks manifest already exists at {}", path.display()));
    }
    write_manifest(root, &HookManifest::default())?;
    write_line(&format!("wrote starter hooks manifest to {}", path.display()))
}

/// Renders every configured hook's script under `.goneat/hooks/`.
fn generate(root: &Path) -> CliResult<()> {
    let manifest = load_hooks_manifest(root)?;
    let dir = generated_dir(root);
    for name in HookName::ALL {
        match render_hook(&manifest, name) {
            Ok(generated) => {
                let path = write_generated(&dir, &generated)?;
                write_line(&format!("generated {}", path.display()))?;
            }
            Err(HooksError::NotFound(_)) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Renders and installs every configured hook's script under `.git/hooks/`.
fn install(root: &Path) -> CliResult<()> {
    let manifest = load_hooks_manifest(root)?;
    let git_dir = git_hooks_dir(root);
    for name in HookName::ALL {
        match render_hook(&manifest, name) {
            Ok(generated) => {
                let outcome = install_hook(&git_dir, &generated)?;
                let backup_note = if outcome.backed_up { " (previous hook backed up)" } else { "" };
                write_line(&format!("installed {} at {}{backup_note}", name.as_str(), outcome.installed_path.display()))?;
            }
            Err(HooksError::NotFound(_)) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Re-parses and re-validates the manifest against its embedded schema.
fn validate(root: &Path) -> CliResult<()> {
    let path = manifest_path(root);
    let raw = std::fs::read_to_string(&path).map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
    parse_manifest(&raw)?;
    write_line("hooks manifest is valid")
}

/// Prints the manifest's health score and a per-hook breakdown of entries.
fn inspect_manifest(root: &Path) -> CliResult<()> {
    let manifest = load_hooks_manifest(root)?;
    let inspection = inspect(&manifest);
    write_line(&format!("health: {}/{}", inspection.health.score, MAX_HEALTH_SCORE))?;
    for finding in &inspection.health.findings {
        write_line(&format!("  finding: {finding}"))?;
    }
    for hook in &inspection.hooks {
        write_line(&format!("{}: {}", hook.name.as_str(), hook.effective_invocation))?;
        for entry in &hook.entries {
            let mutator_note = if entry.mutator.is_mutator() { " [mutator]" } else { "" };
            write_line(&format!("  - {} ({:?}){mutator_note}", entry.command, entry.classification))?;
        }
    }
    Ok(())
}

/// Uninstalls every hook script from `.git/hooks/`, restoring the hook it
/// replaced unless `--no-restore` was given.
fn remove(root: &Path, args: &HooksRemoveArgs) -> CliResult<()> {
    let git_dir = git_hooks_dir(root);
    for name in HookName::ALL {
        let restored = remove_hook(&git_dir, name, !args.no_restore)?;
        let restore_note = if restored { " (restored previous hook)" } else { "" };
        write_line(&format!("removed {}{restore_note}", name.as_str()))?;
    }
    Ok(())
}

/// Regenerates and reinstalls every hook script from the current manifest.
fn upgrade(root: &Path) -> CliResult<()> {
    generate(root)?;
    install(root)
}

/// Dispatches `hooks policy <show|set|reset|validate>`.
fn policy(root: &Path, args: HooksPolicyArgs) -> CliResult<()> {
    match args.command {
        HooksPolicyCommand::Show => show_policy(root),
        HooksPolicyCommand::Set(set_args) => set_policy(root, &set_args),
        HooksPolicyCommand::Reset => reset_policy(root),
        HooksPolicyCommand::Validate => validate(root),
    }
}

/// Prints the manifest's current `optimization` settings.
fn show_policy(root: &Path) -> CliResult<()> {
    let manifest = load_hooks_manifest(root)?;
    let optimization = &manifest.optimization;
    write_line(&format!("only_changed_files: {}", optimization.only_changed_files))?;
    write_line(&format!("content_source: {:?}", optimization.content_source))?;
    write_line(&format!("parallel: {:?}", optimization.parallel))?;
    write_line(&format!("cache_results: {}", optimization.cache_results))
}

/// Sets one `optimization` field by name and persists the manifest.
fn set_policy(root: &Path, args: &HooksPolicySetArgs) -> CliResult<()> {
    let mut manifest = load_hooks_manifest(root)?;
    match args.field.as_str() {
        "only-changed-files" => manifest.optimization.only_changed_files = parse_policy_bool(&args.value)?,
        "cache-results" => manifest.optimization.cache_results = parse_policy_bool(&args.value)?,
        "content-source" => {
            manifest.optimization.content_source = match args.value.as_str() {
                "index" => ContentSource::Index,
                "working" => ContentSource::Working,
                other => return Err(CliError::new(format!("unknown content-source '{other}'; expected 'index' or 'working'"))),
            };
        }
        "parallel" => {
            manifest.optimization.parallel = match args.value.as_str() {
                "auto" => ParallelMode::Auto,
                "max" => ParallelMode::Max,
                "sequential" => ParallelMode::Sequential,
                other => return Err(CliError::new(format!("unknown parallel mode '{other}'; expected 'auto', 'max', or 'sequential'"))),
            };
        }
        other => return Err(CliError::new(format!("unknown policy field '{other}'"))),
    }
    write_manifest(root, &manifest)?;
    write_line(&format!("set {} = {}", args.field, args.value))
}

/// Parses a `true`/`false` CLI value for a boolean policy field.
fn parse_policy_bool(value: &str) -> CliResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CliError::new(format!("expected 'true' or 'false', got '{other}'"))),
    }
}

/// Resets `optimization` to its defaults and persists the manifest.
fn reset_policy(root: &Path) -> CliResult<()> {
    let mut manifest = load_hooks_manifest(root)?;
    manifest.optimization = goneat_hooks::Optimization::default();
    write_manifest(root, &manifest)?;
    write_line("optimization reset to defaults")
}
