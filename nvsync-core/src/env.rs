//! Environment resolution: locate binaries and ask the editor where it
//! keeps its config and data.
//!
//! The resulting [`Environment`] is built once per run and never mutated;
//! every component takes it by reference.

use std::path::{Path, PathBuf};

use crate::editor::{self, StdPath};
use crate::error::SyncError;
use crate::exec::{self, CommandRunner};
use crate::fs::ensure_dir;
use crate::settings::Settings;

/// Resolved absolute directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    /// `<data>/site/pack/<manager>`.
    pub plugin_root: PathBuf,
}

impl EnvironmentPaths {
    pub fn new(config_dir: PathBuf, data_dir: PathBuf, manager: &str) -> Self {
        let plugin_root = plugin_root(&data_dir, manager);
        Self {
            config_dir,
            data_dir,
            plugin_root,
        }
    }
}

pub fn plugin_root(data_dir: &Path, manager: &str) -> PathBuf {
    data_dir.join("site").join("pack").join(manager)
}

/// Immutable context shared by the differ, the engine, and the plugin steps.
#[derive(Debug, Clone)]
pub struct Environment {
    pub editor: PathBuf,
    /// Only needed for bootstrap, so its absence is reported lazily.
    pub git: Option<PathBuf>,
    pub repo_root: PathBuf,
    pub paths: EnvironmentPaths,
    pub settings: Settings,
}

impl Environment {
    /// Locate the editor on `PATH` and resolve everything else from it.
    pub fn resolve(
        runner: &dyn CommandRunner,
        repo_root: PathBuf,
        settings: Settings,
    ) -> Result<Self, SyncError> {
        let editor = exec::locate(&settings.editor)?;
        let git = exec::locate(&settings.git).ok();
        Self::resolve_with(runner, editor, git, repo_root, settings)
    }

    /// Resolve directories through an already located editor.
    pub fn resolve_with(
        runner: &dyn CommandRunner,
        editor: PathBuf,
        git: Option<PathBuf>,
        repo_root: PathBuf,
        settings: Settings,
    ) -> Result<Self, SyncError> {
        let config_dir = editor::query_stdpath(runner, &editor, StdPath::Config)?;
        let data_dir = editor::query_stdpath(runner, &editor, StdPath::Data)?;

        if !config_dir.exists() {
            tracing::info!("Creating editor config directory {}", config_dir.display());
        }
        ensure_dir(&config_dir)?;
        if !data_dir.exists() {
            tracing::info!("Creating editor data directory {}", data_dir.display());
        }
        ensure_dir(&data_dir)?;

        let paths = EnvironmentPaths::new(config_dir, data_dir, &settings.plugin_manager.name);
        Ok(Self {
            editor,
            git,
            repo_root,
            paths,
            settings,
        })
    }

    /// Version-control binary, or [`SyncError::ExecutableNotFound`].
    pub fn require_git(&self) -> Result<&Path, SyncError> {
        self.git
            .as_deref()
            .ok_or_else(|| SyncError::ExecutableNotFound {
                name: self.settings.git.clone(),
            })
    }
}
