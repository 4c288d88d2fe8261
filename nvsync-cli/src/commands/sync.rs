//! `nvsync push` / `nvsync pull` — one sync pass in either direction.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use nvsync_core::{CopyMode, SyncDirection, SystemRunner};
use nvsync_sync::{pipeline, StdioPrompter, SyncOptions, SyncReport};

use super::GlobalArgs;

/// Flags of a sync pass (`push` / `pull`).
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Don't ask whether or not to overwrite files.
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Copy the contents behind symbolic links instead of the links.
    #[arg(long)]
    pub follow_symlinks: bool,
}

impl SyncArgs {
    /// Copy mode for this pass; `--follow-symlinks` overrides the settings.
    pub fn copy_mode(&self, configured: CopyMode) -> CopyMode {
        if self.follow_symlinks {
            CopyMode::Follow
        } else {
            configured
        }
    }
}

pub fn run(global: &GlobalArgs, args: &SyncArgs, direction: SyncDirection) -> Result<()> {
    let runner = SystemRunner;
    let env = global.environment(&runner)?;
    let options = SyncOptions {
        force: args.force,
        copy_mode: args.copy_mode(env.settings.copy_mode),
    };

    let mut prompter = StdioPrompter;
    let report = pipeline::run(direction, &env, options, &runner, &mut prompter)?;

    if !global.quiet {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SyncReport) {
    println!(
        "{} {} complete ({} copied, {} unchanged, {} skipped)",
        "✓".green().bold(),
        report.direction,
        report.copied(),
        report.unchanged(),
        report.declined()
    );
    for path in report.updated.iter() {
        println!("  ✎  {}", path.display());
    }
    if report.recompiled {
        println!("  plugin cache recompiled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_symlinks_overrides_configured_mode() {
        let args = SyncArgs {
            follow_symlinks: true,
            ..SyncArgs::default()
        };
        assert_eq!(args.copy_mode(CopyMode::Preserve), CopyMode::Follow);
        assert_eq!(
            SyncArgs::default().copy_mode(CopyMode::Follow),
            CopyMode::Follow
        );
        assert_eq!(
            SyncArgs::default().copy_mode(CopyMode::Preserve),
            CopyMode::Preserve
        );
    }
}
