//! Domain types for a sync pass.
//!
//! All path fields use `PathBuf`; a [`ConfigFile`] is always relative to
//! the root it was discovered under.

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way files flow between the repository and the live config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncDirection {
    /// Repository → live editor config directory.
    Push,
    /// Live editor config directory → repository.
    Pull,
}

impl SyncDirection {
    /// Order `(repo, live)` into `(source, target)` for this direction.
    pub fn roots<'a>(self, repo: &'a Path, live: &'a Path) -> (&'a Path, &'a Path) {
        match self {
            SyncDirection::Push => (repo, live),
            SyncDirection::Pull => (live, repo),
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::Push => f.write_str("push"),
            SyncDirection::Pull => f.write_str("pull"),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigFile
// ---------------------------------------------------------------------------

/// A single recognized config file, identified by its path relative to the
/// root it was found under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigFile {
    pub relative: PathBuf,
}

impl ConfigFile {
    pub fn new(relative: impl Into<PathBuf>) -> Self {
        Self {
            relative: relative.into(),
        }
    }

    /// Absolute location of this file under `root`.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.relative)
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.relative.display().fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// How the target of a source file compares to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Missing,
    Identical,
    Differs,
}

/// What to do with a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    Copy,
    Skip,
    /// Ask the user; the "view diff" answer loops back to the same question.
    ViewDiffThenDecide,
}

impl SyncDecision {
    pub fn derive(state: TargetState, forced: bool) -> Self {
        match state {
            TargetState::Missing => SyncDecision::Copy,
            TargetState::Identical => SyncDecision::Skip,
            TargetState::Differs if forced => SyncDecision::Copy,
            TargetState::Differs => SyncDecision::ViewDiffThenDecide,
        }
    }
}

// ---------------------------------------------------------------------------
// UpdatedFiles
// ---------------------------------------------------------------------------

/// Target paths written during one pass, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatedFiles(Vec<PathBuf>);

impl UpdatedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: PathBuf) {
        self.0.push(path);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter()
    }

    /// True if any updated path has exactly this file name, at any depth.
    pub fn contains_file_name(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == name))
    }
}

impl From<Vec<PathBuf>> for UpdatedFiles {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

impl IntoIterator for UpdatedFiles {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TargetState::Missing, false, SyncDecision::Copy)]
    #[case(TargetState::Missing, true, SyncDecision::Copy)]
    #[case(TargetState::Identical, false, SyncDecision::Skip)]
    #[case(TargetState::Identical, true, SyncDecision::Skip)]
    #[case(TargetState::Differs, true, SyncDecision::Copy)]
    #[case(TargetState::Differs, false, SyncDecision::ViewDiffThenDecide)]
    fn decision_table(
        #[case] state: TargetState,
        #[case] forced: bool,
        #[case] expected: SyncDecision,
    ) {
        assert_eq!(SyncDecision::derive(state, forced), expected);
    }

    #[test]
    fn pull_swaps_roots() {
        let repo = Path::new("/repo");
        let live = Path::new("/home/u/.config/nvim");
        assert_eq!(SyncDirection::Push.roots(repo, live), (repo, live));
        assert_eq!(SyncDirection::Pull.roots(repo, live), (live, repo));
    }

    #[test]
    fn file_name_match_ignores_depth() {
        let updated = UpdatedFiles::from(vec![
            PathBuf::from("/cfg/init.lua"),
            PathBuf::from("/cfg/lua/user/plugins.lua"),
        ]);
        assert!(updated.contains_file_name("plugins.lua"));
        assert!(!updated.contains_file_name("user"));
        assert!(!updated.contains_file_name("packer_compiled.lua"));
    }

    #[test]
    fn file_name_match_is_exact() {
        let updated = UpdatedFiles::from(vec![PathBuf::from("/cfg/my_plugins.lua")]);
        assert!(!updated.contains_file_name("plugins.lua"));
    }
}
