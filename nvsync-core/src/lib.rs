//! nvsync core library — domain types, errors, settings, and the external
//! process seam shared by every other crate.
//!
//! - [`types`] — sync direction, decisions, updated-file set
//! - [`error`] — [`SyncError`]
//! - [`settings`] — [`Settings`] and its YAML loader
//! - [`exec`] — [`CommandRunner`] and the system implementation
//! - [`editor`] — headless editor invocations
//! - [`env`] — [`Environment`] resolution

pub mod editor;
pub mod env;
pub mod error;
pub mod exec;
pub mod fs;
pub mod settings;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use env::{Environment, EnvironmentPaths};
pub use error::SyncError;
pub use exec::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use settings::{CopyMode, PluginManager, Settings};
pub use types::{ConfigFile, SyncDecision, SyncDirection, TargetState, UpdatedFiles};
