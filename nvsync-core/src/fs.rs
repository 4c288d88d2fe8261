//! Directory creation with fixed permissions.

use std::fs::DirBuilder;
use std::path::Path;

use crate::error::{io_err, SyncError};

/// Mode for every directory nvsync creates.
pub const DIR_MODE: u32 = 0o755;

/// Create `path` and any missing parents. Existing directories are fine.
pub fn ensure_dir(path: &Path) -> Result<(), SyncError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path).map_err(|e| io_err(path, e))
}
