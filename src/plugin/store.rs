//! plugin::store
//!
//! The plugin store: one file per plugin, directly under the plugins
//! directory, no subdirectories.
//!
//! # Name resolution
//!
//! Resolution tries the exact filename first. If that file does not exist,
//! it falls back to a single wildcard match `<name>.*` (an installed
//! `deploy.sh` answers to `deploy`). Zero or multiple wildcard matches both
//! fail with the lookup sentinel; guessing among ambiguous candidates would
//! execute the wrong binary.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::PluginError;
use crate::session::ClientPaths;

/// Filesystem-backed plugin store.
#[derive(Debug, Clone)]
pub struct PluginStore {
    /// Directory holding the plugin files.
    dir: PathBuf,
}

impl PluginStore {
    /// Create a store at the client's standard plugins directory.
    pub fn new(paths: &ClientPaths) -> Self {
        Self {
            dir: paths.plugins_dir(),
        }
    }

    /// Create a store at a custom directory.
    ///
    /// Primarily useful for tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the plugin files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a named plugin inside the store.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Create the plugins directory (and parents) if missing.
    pub fn ensure_dir(&self) -> Result<(), PluginError> {
        fs::create_dir_all(&self.dir)?;
        #[cfg(unix)]
        fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    /// List installed plugin names in directory-read order.
    ///
    /// Infallible by contract: a read failure (most commonly the directory
    /// not existing yet because nothing was ever installed) degrades to an
    /// empty list.
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Delete a plugin's file by name.
    ///
    /// Propagates whatever the filesystem returns, not-found included.
    pub fn remove(&self, name: &str) -> Result<(), PluginError> {
        fs::remove_file(self.path_of(name))?;
        Ok(())
    }

    /// Resolve a plugin name to the path of its executable.
    ///
    /// Exact filename first; otherwise exactly one `<name>.*` match.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, PluginError> {
        let exact = self.path_of(name);
        if exact.exists() {
            return Ok(exact);
        }
        let mut matches = self.wildcard_matches(name);
        if matches.len() != 1 {
            return Err(PluginError::NotFound(name.to_string()));
        }
        Ok(matches.remove(0))
    }

    /// Files matching `<name>.*` in the store.
    fn wildcard_matches(&self, name: &str) -> Vec<PathBuf> {
        let prefix = format!("{}.", name);
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.is_empty())
            })
            .map(|entry| entry.path())
            .collect()
    }
}
