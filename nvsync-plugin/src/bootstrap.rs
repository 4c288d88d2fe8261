//! Plugin manager bootstrap.
//!
//! 1. Require the version-control binary.
//! 2. Shallow-clone the manager into `<plugin_root>/start/<checkout>`.
//! 3. Run its install command headless, quitting on the install event.

use std::path::PathBuf;

use nvsync_core::{editor, CommandRunner, Environment, Invocation, SyncError};

/// Where the manager's repository is cloned.
pub fn checkout_dir(env: &Environment) -> PathBuf {
    env.paths
        .plugin_root
        .join("start")
        .join(&env.settings.plugin_manager.checkout)
}

/// The manager counts as installed once its install root exists.
pub fn is_installed(env: &Environment) -> bool {
    env.paths.plugin_root.exists()
}

/// Clone the plugin manager and run its install command.
pub fn install(env: &Environment, runner: &dyn CommandRunner) -> Result<(), SyncError> {
    let manager = &env.settings.plugin_manager;
    tracing::info!("Installing {}...", manager.checkout);

    let git = env.require_git()?;
    let target = checkout_dir(env);
    let clone = Invocation::new(git)
        .args(["clone", "--depth", "1"])
        .arg(&manager.repo_url)
        .arg(&target)
        .capture();
    let result = runner.run(&clone)?;
    if !result.is_success() {
        if let Some(output) = result.output.as_deref() {
            tracing::debug!("clone output: {}", output.trim());
        }
        return Err(SyncError::CloneFailed {
            url: manager.repo_url.clone(),
            exit_code: result.exit_code,
        });
    }

    let invocation = editor::until_event(
        &env.editor,
        &manager.install_event,
        &manager.install_command,
    );
    runner.run(&invocation)?.check(&invocation)?;
    Ok(())
}

/// Install unless already present. Returns whether an install ran.
pub fn ensure_installed(env: &Environment, runner: &dyn CommandRunner) -> Result<bool, SyncError> {
    if is_installed(env) {
        tracing::debug!("{} already installed", env.settings.plugin_manager.name);
        return Ok(false);
    }
    install(env, runner)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvsync_core::testing::RecordingRunner;
    use nvsync_core::{EnvironmentPaths, Settings};

    fn env(git: Option<&str>) -> Environment {
        Environment {
            editor: PathBuf::from("/usr/bin/nvim"),
            git: git.map(PathBuf::from),
            repo_root: PathBuf::from("/repo"),
            paths: EnvironmentPaths::new("/cfg".into(), "/data".into(), "packer"),
            settings: Settings::default(),
        }
    }

    #[test]
    fn clones_shallow_then_installs() {
        let runner = RecordingRunner::new();
        install(&env(Some("/usr/bin/git")), &runner).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, PathBuf::from("/usr/bin/git"));
        assert_eq!(
            calls[0].arg_strings(),
            vec![
                "clone",
                "--depth",
                "1",
                "https://github.com/wbthomason/packer.nvim",
                "/data/site/pack/packer/start/packer.nvim",
            ]
        );
        assert_eq!(
            calls[1].arg_strings(),
            vec![
                "--headless",
                "-c",
                "autocmd User PackerComplete qa",
                "-c",
                "PackerInstall"
            ]
        );
    }

    #[test]
    fn missing_git_fails_before_running_anything() {
        let runner = RecordingRunner::new();
        let err = install(&env(None), &runner).unwrap_err();
        assert!(matches!(err, SyncError::ExecutableNotFound { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn failed_clone_skips_install_command() {
        let runner = RecordingRunner::new();
        runner.respond_exit(128);
        let err = install(&env(Some("git")), &runner).unwrap_err();
        assert!(matches!(
            err,
            SyncError::CloneFailed {
                exit_code: Some(128),
                ..
            }
        ));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn failed_install_command_is_external_failure() {
        let runner = RecordingRunner::new();
        runner.respond_exit(0);
        runner.respond_exit(1);
        let err = install(&env(Some("git")), &runner).unwrap_err();
        assert!(matches!(
            err,
            SyncError::ExternalCommandFailed {
                exit_code: Some(1),
                ..
            }
        ));
    }
}
