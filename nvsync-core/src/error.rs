//! Error types for nvsync.

use std::path::PathBuf;

use thiserror::Error;

/// All fatal errors that can arise while resolving the environment, syncing,
/// or driving the plugin manager.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A required binary is not on `PATH`.
    #[error("unable to locate {name} binary")]
    ExecutableNotFound { name: String },

    /// A subprocess exited with a non-zero status.
    #[error("{}", describe_exit(.command, .exit_code))]
    ExternalCommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// The plugin manager clone did not succeed.
    #[error("error cloning {url} ({})", exit_label(.exit_code))]
    CloneFailed { url: String, exit_code: Option<i32> },

    /// A filesystem operation failed mid-pass.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The binary exists but could not be launched.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A path query printed nothing usable.
    #[error("no output from `{command}`")]
    UnexpectedOutput { command: String },

    /// Standard input closed while a confirmation was pending.
    #[error("input closed while waiting for confirmation")]
    InputClosed,

    /// The settings file exists but is malformed.
    #[error("failed to parse settings at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn exit_label(exit_code: &Option<i32>) -> String {
    match *exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn describe_exit(command: &str, exit_code: &Option<i32>) -> String {
    format!("{} when running {command}", exit_label(exit_code))
}

/// Convenience constructor for [`SyncError::Io`], used by every crate that
/// touches the filesystem.
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// A confirmation answer that matched none of the accepted choices.
///
/// Never fatal: the caller reports it and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice: {0}")]
pub struct InvalidUserInput(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_failure_message_carries_exit_code() {
        let err = SyncError::ExternalCommandFailed {
            command: "nvim --headless".to_string(),
            exit_code: Some(2),
        };
        assert_eq!(err.to_string(), "exit code 2 when running nvim --headless");
    }

    #[test]
    fn signal_termination_is_reported_without_code() {
        let err = SyncError::CloneFailed {
            url: "https://example.invalid/repo".to_string(),
            exit_code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn io_err_keeps_path() {
        let err = io_err(
            "/tmp/init.lua",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("I/O error at /tmp/init.lua"));
    }
}
