pub mod bootstrap;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use nvsync_core::{CommandRunner, Environment, Settings};

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Silence informational messages.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Repository root holding the versioned config files.
    #[arg(long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Settings file (default: <repo>/nvsync.yaml, then the user config dir).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    fn repo_root(&self) -> Result<PathBuf> {
        match &self.repo {
            Some(repo) => repo
                .canonicalize()
                .with_context(|| format!("cannot resolve repository '{}'", repo.display())),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }

    /// Build the run's immutable environment.
    pub fn environment(&self, runner: &dyn CommandRunner) -> Result<Environment> {
        let repo_root = self.repo_root()?;
        let settings = Settings::discover(self.config.as_deref(), &repo_root)?;
        Ok(Environment::resolve(runner, repo_root, settings)?)
    }
}
