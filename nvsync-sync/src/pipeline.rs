//! Shared sync pipeline entrypoint used by `push` and `pull`.

use nvsync_core::{CommandRunner, Environment, SyncDirection, SyncError, UpdatedFiles};

use crate::engine::{Engine, FileOutcome, FileRecord, SyncOptions};
use crate::prompt::Prompter;
use crate::scan::scan;

/// Outcome of one full pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub direction: SyncDirection,
    pub records: Vec<FileRecord>,
    pub updated: UpdatedFiles,
    /// Whether the plugin cache was recompiled afterwards.
    pub recompiled: bool,
}

impl SyncReport {
    fn count(&self, pred: impl Fn(FileOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(r.outcome)).count()
    }

    pub fn copied(&self) -> usize {
        self.count(FileOutcome::is_copied)
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| o == FileOutcome::Unchanged)
    }

    pub fn declined(&self) -> usize {
        self.count(|o| o == FileOutcome::Declined)
    }
}

/// Run one pass in `direction`, then the post-sync trigger.
pub fn run(
    direction: SyncDirection,
    env: &Environment,
    options: SyncOptions,
    runner: &dyn CommandRunner,
    prompter: &mut dyn Prompter,
) -> Result<SyncReport, SyncError> {
    let (source_root, target_root) = direction.roots(&env.repo_root, &env.paths.config_dir);
    tracing::debug!(
        "{direction}: {} -> {} (force={})",
        source_root.display(),
        target_root.display(),
        options.force
    );

    let files = scan(source_root, &env.settings);
    let mut engine = Engine::new(runner, prompter, &env.settings.pager, options);
    let (records, updated) = engine.resolve_all(files, source_root, target_root)?;

    let recompiled = nvsync_plugin::maybe_recompile(&updated, env, runner)?;

    Ok(SyncReport {
        direction,
        records,
        updated,
        recompiled,
    })
}
