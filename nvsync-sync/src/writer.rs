//! Compare and copy a single source/target pair.
//!
//! Comparison reads both files in full; nothing is written unless the
//! caller decides to copy, so identical targets keep their timestamps.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use nvsync_core::error::io_err;
use nvsync_core::fs::ensure_dir;
use nvsync_core::{CopyMode, SyncError, TargetState};

/// What kind of filesystem object sits at a path, without following links.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Absent,
    Link(PathBuf),
    File,
}

fn node(path: &Path) -> Result<Node, SyncError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = fs::read_link(path).map_err(|e| io_err(path, e))?;
            Ok(Node::Link(target))
        }
        Ok(_) => Ok(Node::File),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Node::Absent),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Classify `target` against `source`.
///
/// A pair that resolves to one file on disk (a live file symlinked into the
/// repository, say) is always `Identical`.
pub fn classify(source: &Path, target: &Path, mode: CopyMode) -> Result<TargetState, SyncError> {
    match mode {
        CopyMode::Preserve => match (node(source)?, node(target)?) {
            (_, Node::Absent) => Ok(TargetState::Missing),
            _ if same_file(source, target) => Ok(TargetState::Identical),
            (Node::Link(a), Node::Link(b)) if a == b => Ok(TargetState::Identical),
            (Node::Link(_), Node::Link(_)) => Ok(TargetState::Differs),
            (Node::Link(_), _) | (_, Node::Link(_)) => {
                if resolves(source) && resolves(target) {
                    compare_contents(source, target)
                } else {
                    Ok(TargetState::Differs)
                }
            }
            _ => compare_contents(source, target),
        },
        CopyMode::Follow => match fs::metadata(target) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(TargetState::Missing),
            Err(e) => Err(io_err(target, e)),
            Ok(_) if same_file(source, target) => Ok(TargetState::Identical),
            Ok(_) => compare_contents(source, target),
        },
    }
}

fn resolves(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Whether both paths, links followed, name the same file.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn compare_contents(source: &Path, target: &Path) -> Result<TargetState, SyncError> {
    let source_len = fs::metadata(source).map_err(|e| io_err(source, e))?.len();
    let target_len = fs::metadata(target).map_err(|e| io_err(target, e))?.len();
    if source_len != target_len {
        return Ok(TargetState::Differs);
    }
    let a = fs::read(source).map_err(|e| io_err(source, e))?;
    let b = fs::read(target).map_err(|e| io_err(target, e))?;
    Ok(if a == b {
        TargetState::Identical
    } else {
        TargetState::Differs
    })
}

/// Bytes shown for `path` in a diff. Preserved links show their target.
pub fn diff_view(path: &Path, mode: CopyMode) -> Result<Vec<u8>, SyncError> {
    if mode == CopyMode::Preserve {
        if let Node::Link(target) = node(path)? {
            return Ok(format!("symlink -> {}\n", target.display()).into_bytes());
        }
    }
    fs::read(path).map_err(|e| io_err(path, e))
}

/// Copy `source` to `target`, creating parent directories first.
///
/// A target that `source` resolves to is left alone.
pub fn copy(source: &Path, target: &Path, mode: CopyMode) -> Result<(), SyncError> {
    if same_file(source, target) {
        tracing::info!(
            "{} and {} are the same file, skipping...",
            source.display(),
            target.display()
        );
        return Ok(());
    }

    if let Some(parent) = target.parent() {
        if !parent.exists() {
            tracing::info!("Creating directories for {}...", target.display());
        }
        ensure_dir(parent)?;
    }

    let existing = node(target)?;
    tracing::info!(
        "Copying {} to {}{}...",
        source.display(),
        target.display(),
        if existing == Node::Absent {
            ""
        } else {
            " (overwriting)"
        }
    );

    if mode == CopyMode::Preserve {
        if let Node::Link(link) = node(source)? {
            if existing != Node::Absent {
                fs::remove_file(target).map_err(|e| io_err(target, e))?;
            }
            return make_link(&link, target);
        }
        if matches!(existing, Node::Link(_)) {
            fs::remove_file(target).map_err(|e| io_err(target, e))?;
        }
    }

    fs::copy(source, target).map_err(|e| io_err(target, e))?;
    Ok(())
}

#[cfg(unix)]
fn make_link(link: &Path, at: &Path) -> Result<(), SyncError> {
    std::os::unix::fs::symlink(link, at).map_err(|e| io_err(at, e))
}

#[cfg(windows)]
fn make_link(link: &Path, at: &Path) -> Result<(), SyncError> {
    std::os::windows::fs::symlink_file(link, at).map_err(|e| io_err(at, e))
}
