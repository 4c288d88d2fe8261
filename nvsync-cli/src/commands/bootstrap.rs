//! `nvsync bootstrap` — install the plugin manager if it is missing.

use anyhow::Result;
use colored::Colorize;

use nvsync_core::SystemRunner;

use super::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let runner = SystemRunner;
    let env = global.environment(&runner)?;
    let installed = nvsync_plugin::ensure_installed(&env, &runner)?;

    if !global.quiet {
        let name = &env.settings.plugin_manager.name;
        if installed {
            println!("{} {name} installed", "✓".green().bold());
        } else {
            println!("{} {name} already installed", "✓".green().bold());
        }
    }
    Ok(())
}
