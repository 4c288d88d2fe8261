//! # nvsync-sync
//!
//! Tree differ, resolution engine, and the push/pull pipeline.
//!
//! Call [`pipeline::run`] for a full pass: scan the source root, resolve
//! every file against the target root, then fire the post-sync trigger.

pub mod confirm;
pub mod diff;
pub mod engine;
pub mod pipeline;
pub mod prompt;
pub mod scan;
pub mod writer;

pub use engine::{Engine, FileOutcome, FileRecord, SyncOptions};
pub use nvsync_core::SyncError;
pub use pipeline::SyncReport;
pub use prompt::{Prompter, StdioPrompter};
pub use scan::{scan, Scan};
