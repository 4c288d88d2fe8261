//! Post-sync trigger: recompile the plugin cache when the manifest changed.

use nvsync_core::{editor, CommandRunner, Environment, SyncError, UpdatedFiles};

use crate::bootstrap;

/// Recompile if the trigger file is among `updated`.
///
/// Returns whether recompilation ran. Already-copied files are never
/// touched on failure.
pub fn maybe_recompile(
    updated: &UpdatedFiles,
    env: &Environment,
    runner: &dyn CommandRunner,
) -> Result<bool, SyncError> {
    let trigger = &env.settings.trigger_file;
    if !updated.contains_file_name(trigger) {
        return Ok(false);
    }

    tracing::info!(
        "{trigger} updated, recompiling {} cache...",
        env.settings.plugin_manager.name
    );
    recompile(env, runner)?;
    Ok(true)
}

/// Install the manager if needed, then run its compile command headless.
pub fn recompile(env: &Environment, runner: &dyn CommandRunner) -> Result<(), SyncError> {
    bootstrap::ensure_installed(env, runner)?;

    let manager = &env.settings.plugin_manager;
    let invocation = editor::until_event(
        &env.editor,
        &manager.compile_event,
        &manager.compile_command,
    );
    runner.run(&invocation)?.check(&invocation)?;
    Ok(())
}
