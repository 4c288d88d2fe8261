//! Headless editor invocations.
//!
//! The editor is always run with `--headless` and one `-c <cmd>` pair per
//! command. It only exits when a command tells it to, so every builder here
//! ends with a quit, either directly or bound to a plugin-manager event.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::exec::{CommandRunner, Invocation};

/// Directory kinds understood by `stdpath()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdPath {
    Config,
    Data,
}

impl StdPath {
    fn as_str(self) -> &'static str {
        match self {
            StdPath::Config => "config",
            StdPath::Data => "data",
        }
    }
}

/// `<editor> --headless [extra...] -c <cmd>...`
pub fn headless<'a>(
    editor: &Path,
    extra_args: &[&str],
    commands: impl IntoIterator<Item = &'a str>,
) -> Invocation {
    let mut invocation = Invocation::new(editor)
        .arg("--headless")
        .args(extra_args.iter().copied());
    for command in commands {
        invocation = invocation.arg("-c").arg(command);
    }
    invocation
}

/// Query command printing a `stdpath()` directory, without user config.
pub fn stdpath_query(editor: &Path, kind: StdPath) -> Invocation {
    let command = format!("echo stdpath(\"{}\") | q", kind.as_str());
    headless(editor, &["--clean"], [command.as_str()]).capture()
}

/// Run `command` and quit once the plugin manager announces `event`.
///
/// The manager's commands return before their background work finishes, so
/// a plain trailing `qa` would exit too early and omitting it hangs forever.
pub fn until_event(editor: &Path, event: &str, command: &str) -> Invocation {
    let autoquit = format!("autocmd User {event} qa");
    headless(editor, &[], [autoquit.as_str(), command])
}

/// Ask the editor for a directory path and return it.
pub fn query_stdpath(
    runner: &dyn CommandRunner,
    editor: &Path,
    kind: StdPath,
) -> Result<PathBuf, SyncError> {
    let invocation = stdpath_query(editor, kind);
    let output = runner.run(&invocation)?.check(&invocation)?;
    let text = output.output.unwrap_or_default();
    let path = text.trim();
    if path.is_empty() {
        return Err(SyncError::UnexpectedOutput {
            command: invocation.to_string(),
        });
    }
    Ok(PathBuf::from(path))
}
