//! Resolution engine: decide and act on each source file.
//!
//! Per file:
//!
//! 1. Classify the target (missing / identical / differs).
//! 2. Derive a [`SyncDecision`] from the classification and `force`.
//! 3. For `ViewDiffThenDecide`, drive [`ConfirmState`] until it terminates.
//! 4. Copy if decided, recording the target in [`UpdatedFiles`].
//!
//! The first filesystem error aborts the pass; files already copied stay.

use std::path::{Path, PathBuf};

use nvsync_core::{
    CommandRunner, ConfigFile, CopyMode, Invocation, SyncDecision, SyncError, TargetState,
    UpdatedFiles,
};

use crate::confirm::{self, Answer, ConfirmState};
use crate::prompt::Prompter;
use crate::{diff, writer};

/// Per-pass behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Overwrite differing targets without asking.
    pub force: bool,
    pub copy_mode: CopyMode,
}

/// Terminal state for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Target did not exist and was written.
    Created,
    /// Target differed and was replaced.
    Overwritten,
    /// Target was byte-identical; nothing written, nobody asked.
    Unchanged,
    /// Target differed and the user kept it.
    Declined,
}

impl FileOutcome {
    pub fn is_copied(self) -> bool {
        matches!(self, FileOutcome::Created | FileOutcome::Overwritten)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub file: ConfigFile,
    pub target: PathBuf,
    pub outcome: FileOutcome,
}

pub struct Engine<'a> {
    runner: &'a dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
    pager: &'a [String],
    options: SyncOptions,
}

impl<'a> Engine<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
        pager: &'a [String],
        options: SyncOptions,
    ) -> Self {
        Self {
            runner,
            prompter,
            pager,
            options,
        }
    }

    /// Resolve one source/target pair.
    pub fn resolve_file(&mut self, source: &Path, target: &Path) -> Result<FileOutcome, SyncError> {
        let mode = self.options.copy_mode;
        let state = writer::classify(source, target, mode)?;
        let decision = SyncDecision::derive(state, self.options.force);

        let overwrite = match decision {
            SyncDecision::Skip => {
                tracing::info!("{} unchanged, skipping...", target.display());
                return Ok(FileOutcome::Unchanged);
            }
            SyncDecision::Copy => true,
            SyncDecision::ViewDiffThenDecide => self.confirm(source, target)?,
        };

        if !overwrite {
            tracing::info!("Skipping...");
            return Ok(FileOutcome::Declined);
        }

        writer::copy(source, target, mode)?;
        Ok(match state {
            TargetState::Missing => FileOutcome::Created,
            _ => FileOutcome::Overwritten,
        })
    }

    /// Resolve every file of a scan, in order.
    pub fn resolve_all<I>(
        &mut self,
        files: I,
        source_root: &Path,
        target_root: &Path,
    ) -> Result<(Vec<FileRecord>, UpdatedFiles), SyncError>
    where
        I: IntoIterator<Item = Result<ConfigFile, SyncError>>,
    {
        let mut records = Vec::new();
        let mut updated = UpdatedFiles::new();
        for file in files {
            let file = file?;
            let source = file.under(source_root);
            let target = file.under(target_root);
            let outcome = self.resolve_file(&source, &target)?;
            if outcome.is_copied() {
                updated.push(target.clone());
            }
            records.push(FileRecord {
                file,
                target,
                outcome,
            });
        }
        Ok((records, updated))
    }

    fn confirm(&mut self, source: &Path, target: &Path) -> Result<bool, SyncError> {
        let question = confirm::question(
            &source.display().to_string(),
            &target.display().to_string(),
        );
        let mut state = ConfirmState::Prompting;
        loop {
            if let Some(overwrite) = state.outcome() {
                return Ok(overwrite);
            }
            state = match state {
                ConfirmState::ViewingDiff => {
                    self.show_diff(source, target)?;
                    state.on_diff_shown()
                }
                _ => {
                    let line = self.prompter.ask(&question)?.ok_or(SyncError::InputClosed)?;
                    match Answer::parse(&line) {
                        Ok(Some(answer)) => state.on_answer(answer),
                        Ok(None) => state,
                        Err(invalid) => {
                            self.prompter.reject(&invalid);
                            state
                        }
                    }
                }
            };
        }
    }

    fn show_diff(&mut self, source: &Path, target: &Path) -> Result<(), SyncError> {
        let mode = self.options.copy_mode;
        let old = writer::diff_view(target, mode)?;
        let new = writer::diff_view(source, mode)?;
        let text = diff::colorize(&diff::unified(
            &old,
            &new,
            &target.display().to_string(),
            &source.display().to_string(),
        ));

        let Some((program, args)) = self.pager.split_first() else {
            return self.prompter.display(&text);
        };
        let invocation = Invocation::new(program)
            .args(args.iter().map(String::as_str))
            .stdin(text.into_bytes());
        self.runner.run(&invocation)?.check(&invocation)?;
        Ok(())
    }
}
