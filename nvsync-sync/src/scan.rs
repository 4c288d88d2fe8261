//! Tree differ: enumerate recognized config files under a root.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use nvsync_core::error::io_err;
use nvsync_core::{ConfigFile, Settings, SyncError};

/// Lazy walk over one root. Calling [`scan`] again rescans the filesystem.
pub struct Scan {
    root: PathBuf,
    extension: String,
    excluded: String,
    walker: walkdir::IntoIter,
}

/// Every file under `root` with the recognized extension, minus the
/// generated-cache file. Order is by file name within each directory.
pub fn scan(root: &Path, settings: &Settings) -> Scan {
    Scan {
        root: root.to_path_buf(),
        extension: settings.extension.clone(),
        excluded: settings.cache_file.clone(),
        walker: WalkDir::new(root).sort_by_file_name().into_iter(),
    }
}

impl Scan {
    fn accepts(&self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return false;
        }
        if file_type.is_symlink() && entry.path().is_dir() {
            return false;
        }
        if entry.file_name() == OsStr::new(&self.excluded) {
            return false;
        }
        entry.path().extension() == Some(OsStr::new(&self.extension))
    }
}

impl Iterator for Scan {
    type Item = Result<ConfigFile, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(walk_err(&self.root, err))),
            };
            if !self.accepts(&entry) {
                continue;
            }
            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => continue,
            };
            return Some(Ok(ConfigFile::new(relative)));
        }
    }
}

fn walk_err(root: &Path, err: walkdir::Error) -> SyncError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    io_err(path, source)
}
