//! User-tunable settings, loaded from YAML.
//!
//! Every field has a default, so an absent or partial file is valid.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, SyncError};

/// File name looked up at the repository root.
pub const REPO_SETTINGS_FILE: &str = "nvsync.yaml";

/// How symbolic links in the source tree are copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    /// Recreate the link itself at the target.
    #[default]
    Preserve,
    /// Copy the contents the link points at.
    Follow,
}

/// The editor's plugin manager and the commands used to drive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginManager {
    /// Directory name under `site/pack/`.
    pub name: String,
    pub repo_url: String,
    /// Directory the repository is cloned into, under `start/`.
    pub checkout: String,
    pub install_command: String,
    pub install_event: String,
    pub compile_command: String,
    pub compile_event: String,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self {
            name: "packer".to_string(),
            repo_url: "https://github.com/wbthomason/packer.nvim".to_string(),
            checkout: "packer.nvim".to_string(),
            install_command: "PackerInstall".to_string(),
            install_event: "PackerComplete".to_string(),
            compile_command: "PackerCompile".to_string(),
            compile_event: "PackerCompileDone".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub editor: String,
    pub git: String,
    /// Program and arguments; the diff is piped to its stdin.
    pub pager: Vec<String>,
    /// Recognized config file extension, without the dot.
    pub extension: String,
    /// Plugin manifest whose update triggers recompilation.
    pub trigger_file: String,
    /// Generated file never treated as a source of truth.
    pub cache_file: String,
    pub copy_mode: CopyMode,
    pub plugin_manager: PluginManager,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: "nvim".to_string(),
            git: "git".to_string(),
            pager: vec!["less".to_string(), "-R".to_string()],
            extension: "lua".to_string(),
            trigger_file: "plugins.lua".to_string(),
            cache_file: "packer_compiled.lua".to_string(),
            copy_mode: CopyMode::Preserve,
            plugin_manager: PluginManager::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let raw = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| SyncError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the first settings file that exists.
    ///
    /// An `explicit` path must exist; otherwise `<repo>/nvsync.yaml` and then
    /// the user config directory are tried, falling back to defaults.
    pub fn discover(explicit: Option<&Path>, repo_root: &Path) -> Result<Self, SyncError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        for candidate in candidate_paths(repo_root) {
            match std::fs::metadata(&candidate) {
                Ok(_) => {
                    tracing::debug!("loading settings from {}", candidate.display());
                    return Self::load(&candidate);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(io_err(candidate, e)),
            }
        }
        Ok(Self::default())
    }
}

fn candidate_paths(repo_root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![repo_root.join(REPO_SETTINGS_FILE)];
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join("nvsync").join("config.yaml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(REPO_SETTINGS_FILE);
        fs::write(
            &path,
            "editor: /opt/nvim/bin/nvim\nplugin_manager:\n  compile_event: Done\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.editor, "/opt/nvim/bin/nvim");
        assert_eq!(settings.plugin_manager.compile_event, "Done");
        assert_eq!(settings.plugin_manager.compile_command, "PackerCompile");
        assert_eq!(settings.trigger_file, "plugins.lua");
        assert_eq!(settings.copy_mode, CopyMode::Preserve);
    }

    #[test]
    fn copy_mode_parses_lowercase() {
        let settings: Settings = serde_yaml::from_str("copy_mode: follow").unwrap();
        assert_eq!(settings.copy_mode, CopyMode::Follow);
    }

    #[test]
    fn repo_file_wins_discovery() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(REPO_SETTINGS_FILE), "extension: vim\n").unwrap();
        let settings = Settings::discover(None, tmp.path()).unwrap();
        assert_eq!(settings.extension, "vim");
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = Settings::discover(Some(&tmp.path().join("nope.yaml")), tmp.path())
            .expect_err("explicit path must exist");
        assert!(matches!(err, SyncError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "pager: [unterminated\n").unwrap();
        let err = Settings::load(&path).expect_err("malformed yaml");
        assert!(matches!(err, SyncError::Config { .. }));
    }

    #[test]
    fn empty_file_is_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }
}
