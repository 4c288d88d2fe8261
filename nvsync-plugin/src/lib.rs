//! # nvsync-plugin
//!
//! Plugin manager integration: first-time install ([`install`]) and the
//! cache recompilation that follows a manifest update ([`maybe_recompile`]).

pub mod bootstrap;
pub mod trigger;

pub use bootstrap::{ensure_installed, install, is_installed};
pub use trigger::{maybe_recompile, recompile};
