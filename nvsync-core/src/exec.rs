//! External process seam.
//!
//! Every subprocess nvsync starts (editor queries, the clone, the pager)
//! goes through [`CommandRunner`], so tests can substitute a recorder.

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::SyncError;

/// A single external command to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Capture stdout and stderr instead of inheriting the terminal.
    pub capture: bool,
    /// Bytes written to the child's stdin, which is then closed.
    pub stdin: Option<Vec<u8>>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture: false,
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn stdin(mut self, input: Vec<u8>) -> Self {
        self.stdin = Some(input);
        self
    }

    /// Arguments as lossy strings, for assertions and messages.
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// stdout followed by stderr, present only for captured invocations.
    pub output: Option<String>,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            output: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Map a non-zero exit into [`SyncError::ExternalCommandFailed`].
    pub fn check(self, invocation: &Invocation) -> Result<Self, SyncError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SyncError::ExternalCommandFailed {
                command: invocation.to_string(),
                exit_code: self.exit_code,
            })
        }
    }
}

/// Runs external commands to completion, blocking the caller.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, SyncError>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, SyncError> {
        let program = invocation.program.display().to_string();
        let spawn_err = |source| SyncError::Spawn {
            program: program.clone(),
            source,
        };

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if invocation.stdin.is_some() {
            command.stdin(Stdio::piped());
        }
        if invocation.capture {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        tracing::debug!("running {invocation}");
        let mut child = command.spawn().map_err(spawn_err)?;

        if let Some(input) = &invocation.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                // A pager may quit before reading everything; that is not a failure.
                if let Err(e) = pipe.write_all(input) {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(spawn_err(e));
                    }
                }
            }
        }

        let finished = child.wait_with_output().map_err(spawn_err)?;
        let output = invocation.capture.then(|| {
            let mut text = String::from_utf8_lossy(&finished.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&finished.stderr));
            text
        });

        Ok(CommandOutput {
            exit_code: finished.status.code(),
            output,
        })
    }
}

/// Locate `name` on `PATH`. Absolute or relative paths are checked as given.
pub fn locate(name: &str) -> Result<PathBuf, SyncError> {
    which::which(name).map_err(|_| SyncError::ExecutableNotFound {
        name: display_name(name),
    })
}

fn display_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let inv = Invocation::new("/usr/bin/nvim")
            .arg("--headless")
            .arg("-c")
            .arg("autocmd User PackerComplete qa");
        assert_eq!(
            inv.to_string(),
            "/usr/bin/nvim --headless -c 'autocmd User PackerComplete qa'"
        );
    }

    #[test]
    fn check_maps_non_zero_exit() {
        let inv = Invocation::new("git").arg("clone");
        let out = CommandOutput {
            exit_code: Some(128),
            output: None,
        };
        match out.check(&inv) {
            Err(SyncError::ExternalCommandFailed { exit_code, command }) => {
                assert_eq!(exit_code, Some(128));
                assert_eq!(command, "git clone");
            }
            other => panic!("expected ExternalCommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_binary_is_executable_not_found() {
        let err = locate("nvsync-definitely-not-installed-binary").expect_err("absent");
        match err {
            SyncError::ExecutableNotFound { name } => {
                assert_eq!(name, "nvsync-definitely-not-installed-binary")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn system_runner_captures_both_streams() {
        let inv = Invocation::new("sh")
            .arg("-c")
            .arg("printf out; printf err >&2")
            .capture();
        let out = SystemRunner.run(&inv).unwrap();
        assert!(out.is_success());
        assert_eq!(out.output.as_deref(), Some("outerr"));
    }

    #[test]
    #[cfg(unix)]
    fn system_runner_pipes_stdin() {
        let inv = Invocation::new("sh")
            .arg("-c")
            .arg("cat")
            .stdin(b"piped".to_vec())
            .capture();
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.output.as_deref(), Some("piped"));
    }

    #[test]
    #[cfg(unix)]
    fn system_runner_reports_exit_code() {
        let inv = Invocation::new("sh").arg("-c").arg("exit 3");
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.output, None);
    }
}
